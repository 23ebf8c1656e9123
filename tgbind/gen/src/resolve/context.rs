//! Compilation state threaded through every resolution call.

use std::collections::{BTreeMap, BTreeSet};

use tgbind_define::SchemaDocument;

use crate::errors::GeneratorError;

/// Registries accumulated during one compilation pass.
///
/// The context owns every piece of shared state a resolution can touch:
///
/// - the set of type names declared by the schema (to reject unknown tokens)
/// - element types seen inside `Array of X` tokens
/// - element types seen inside `Array of Array of X` tokens
/// - the subtype to supertype map built while flattening unions
///
/// All registries are append-only. Membership, not insertion order, drives
/// downstream decisions, so the sets are ordered for deterministic output.
#[derive(Debug, Clone, Default)]
pub struct CompilationContext {
    known_types: BTreeSet<String>,
    array_elements: BTreeSet<String>,
    array_of_array_elements: BTreeSet<String>,
    subtypes: BTreeMap<String, String>,
}

impl CompilationContext {
    /// Creates a context that knows every type declared in the document.
    pub fn for_document(doc: &SchemaDocument) -> Self {
        Self::with_known_types(doc.types.keys().cloned())
    }

    /// Creates a context from an explicit list of type names.
    pub fn with_known_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_types: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_known_type(&self, name: &str) -> bool {
        self.known_types.contains(name)
    }

    /// Records `element` as used inside a single array.
    pub fn register_array_element(&mut self, element: &str) {
        if self.array_elements.insert(element.to_string()) {
            tracing::trace!("Array element registered: {}", element);
        }
    }

    /// Records `element` as used inside an array of arrays.
    pub fn register_array_of_array_element(&mut self, element: &str) {
        if self.array_of_array_elements.insert(element.to_string()) {
            tracing::trace!("Array-of-array element registered: {}", element);
        }
    }

    pub fn needs_array_helper(&self, element: &str) -> bool {
        self.array_elements.contains(element)
    }

    pub fn needs_array_of_array_helper(&self, element: &str) -> bool {
        self.array_of_array_elements.contains(element)
    }

    pub fn array_elements(&self) -> &BTreeSet<String> {
        &self.array_elements
    }

    pub fn array_of_array_elements(&self) -> &BTreeSet<String> {
        &self.array_of_array_elements
    }

    /// Records `subtype` as a concrete variant of `supertype`.
    ///
    /// Registering the same pair again is a no-op.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::AssumptionViolation` if `subtype` is already
    /// registered under a different supertype. The schema is a two-level
    /// hierarchy, not a DAG.
    pub fn register_subtype(
        &mut self,
        subtype: &str,
        supertype: &str,
    ) -> Result<(), GeneratorError> {
        match self.subtypes.get(subtype) {
            Some(existing) if existing != supertype => Err(GeneratorError::assumption(
                subtype,
                format!("listed as a subtype of both '{existing}' and '{supertype}'"),
            )),
            Some(_) => Ok(()),
            None => {
                self.subtypes
                    .insert(subtype.to_string(), supertype.to_string());
                Ok(())
            }
        }
    }

    /// Returns the supertype `subtype` was registered under, if any.
    pub fn supertype_of(&self, subtype: &str) -> Option<&str> {
        self.subtypes.get(subtype).map(String::as_str)
    }

    pub fn subtypes(&self) -> &BTreeMap<String, String> {
        &self.subtypes
    }
}
