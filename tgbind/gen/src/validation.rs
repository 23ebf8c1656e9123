//! Pre-compilation checks on a schema document.
//!
//! Resolution trusts the document's shape. These checks catch the cases
//! where that trust would produce silently wrong bindings and turn them into
//! `GeneratorError::AssumptionViolation` before compilation starts.
//!
//! ## Validation Checks
//!
//! - **Type alternatives**: every field and method parameter lists at least
//!   one type token
//! - **Return alternatives**: every method lists at least one return token
//! - **Subtype references**: every declared subtype exists in the type table
//! - **Single parent**: no subtype is claimed by two union parents
//!
//! ## Examples
//!
//! ```
//! use tgbind_define::SchemaDocument;
//! use tgbind_gen::validation::validate_document;
//!
//! assert!(validate_document(&SchemaDocument::default()).is_ok());
//! ```

use std::collections::HashMap;

use tgbind_define::{SchemaDocument, SchemaField};

use crate::errors::GeneratorError;

/// Validates a schema document before compilation.
///
/// ## Errors
///
/// Returns `GeneratorError::AssumptionViolation` naming the first offending
/// type, method, or field.
pub fn validate_document(doc: &SchemaDocument) -> Result<(), GeneratorError> {
    let mut parents: HashMap<&str, &str> = HashMap::new();

    for schema in doc.types.values() {
        check_alternatives(&schema.name, schema.fields())?;

        for subtype in schema.subtypes() {
            if !doc.types.contains_key(subtype) {
                return Err(GeneratorError::assumption(
                    &schema.name,
                    format!("subtype '{subtype}' is not declared in the schema"),
                ));
            }
            if let Some(existing) = parents.insert(subtype, &schema.name)
                && existing != schema.name
            {
                return Err(GeneratorError::assumption(
                    subtype,
                    format!(
                        "listed as a subtype of both '{existing}' and '{}'",
                        schema.name
                    ),
                ));
            }
        }
    }

    for method in doc.methods.values() {
        check_alternatives(&method.name, method.fields())?;
        if method.returns.is_empty() {
            return Err(GeneratorError::assumption(
                &method.name,
                "method declares no return type",
            ));
        }
    }

    tracing::debug!(
        "Validated {} types and {} methods",
        doc.types.len(),
        doc.methods.len()
    );
    Ok(())
}

fn check_alternatives(owner: &str, fields: &[SchemaField]) -> Result<(), GeneratorError> {
    match fields.iter().find(|f| f.types.is_empty()) {
        Some(field) => Err(GeneratorError::assumption(
            format!("{owner}.{}", field.name),
            "lists no type alternatives",
        )),
        None => Ok(()),
    }
}
