//! Whole-document compilation.

use serde::Serialize;
use tgbind_define::SchemaDocument;

use super::context::CompilationContext;
use super::declarations::{MARKUP_VARIANTS, TypeBinding, synthesize_type};
use super::methods::{MethodBinding, synthesize_method};
use crate::errors::GeneratorError;
use crate::validation::validate_document;

/// Schema revision details carried into generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

/// Every decision record produced by one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingSet {
    pub metadata: BindingMetadata,
    /// Type declarations in document order.
    pub types: Vec<TypeBinding>,
    /// Method bindings in document order.
    pub methods: Vec<MethodBinding>,
    /// Elements that need an array unwrap helper, sorted.
    pub array_helpers: Vec<String>,
    /// Elements that need an array-of-array unwrap helper, sorted.
    pub array_of_array_helpers: Vec<String>,
    /// Reply-markup variants the document declares.
    pub reply_markup_variants: Vec<String>,
}

impl BindingSet {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }

    /// Union parents, in document order.
    pub fn variant_parents(&self) -> impl Iterator<Item = &TypeBinding> {
        self.types.iter().filter(|t| t.variant_parent)
    }

    pub fn has_file_upload(&self) -> bool {
        self.methods.iter().any(MethodBinding::has_file_upload)
    }
}

/// Compiles a schema document into a [`BindingSet`].
///
/// `None` stands for "no schema available" and yields an empty set. A
/// document is validated first, then every union's subtypes are registered so
/// subtype glue does not depend on where the parent sits in the document.
/// Types are synthesized in document order, then methods.
///
/// ## Errors
///
/// - `GeneratorError::AssumptionViolation` if the document fails validation
/// - `GeneratorError::UnresolvableType` if any token names an unknown type
///
/// ## Examples
///
/// ```
/// use tgbind_gen::resolve::compile;
///
/// let set = compile(None).unwrap();
/// assert!(set.is_empty());
/// ```
pub fn compile(doc: Option<&SchemaDocument>) -> Result<BindingSet, GeneratorError> {
    let Some(doc) = doc else {
        tracing::info!("No schema available, producing empty bindings");
        return Ok(BindingSet::default());
    };

    validate_document(doc)?;

    let mut ctx = CompilationContext::for_document(doc);
    for schema in doc.types.values() {
        for subtype in schema.subtypes() {
            ctx.register_subtype(subtype, &schema.name)?;
        }
    }

    let mut types = Vec::with_capacity(doc.types.len());
    for schema in doc.types.values() {
        types.push(synthesize_type(&mut ctx, schema, &doc.types)?);
    }

    let mut methods = Vec::with_capacity(doc.methods.len());
    for method in doc.methods.values() {
        methods.push(synthesize_method(&mut ctx, method)?);
    }

    let reply_markup_variants = MARKUP_VARIANTS
        .iter()
        .filter(|name| doc.types.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    let set = BindingSet {
        metadata: BindingMetadata {
            version: doc.version.clone(),
            release_date: doc.release_date.clone(),
            changelog: doc.changelog.clone(),
        },
        types,
        methods,
        array_helpers: ctx.array_elements().iter().cloned().collect(),
        array_of_array_helpers: ctx.array_of_array_elements().iter().cloned().collect(),
        reply_markup_variants,
    };

    tracing::info!(
        "Compiled {} types and {} methods ({} array helpers, {} array-of-array helpers)",
        set.types.len(),
        set.methods.len(),
        set.array_helpers.len(),
        set.array_of_array_helpers.len()
    );
    Ok(set)
}
