//! Union flattening.
//!
//! A union parent declares no fields of its own; its declaration is the union
//! of its subtypes' fields. Field names are deduplicated with the first
//! subtype that declares a name winning. Field shapes under the same name are
//! assumed identical across subtypes.

use std::collections::HashSet;

use tgbind_define::{SchemaField, TypeTable};

use super::context::CompilationContext;
use super::declarations::DeclaredField;
use super::types::{FieldType, ScalarKind, resolve_field_type};
use crate::errors::GeneratorError;
use crate::naming::upper_camel;

/// Fields whose plain-string alternative is dropped in declarations, keeping
/// only the integer form.
///
/// This is a fixed exception list, not a naming convention.
pub const INTEGER_ONLY_FIELDS: &[&str] = &["chat_id"];

/// Picks the alternative a declaration uses for `field`.
///
/// Every alternative is resolved (so array usage is registered even for
/// alternatives that end up skipped). File-upload alternatives are skipped,
/// as is the string alternative of an [`INTEGER_ONLY_FIELDS`] entry. The
/// first surviving alternative wins; `None` means nothing survived.
///
/// ## Errors
///
/// Propagates `GeneratorError::UnresolvableType` from any alternative.
pub fn declarable_type(
    ctx: &mut CompilationContext,
    field: &SchemaField,
) -> Result<Option<FieldType>, GeneratorError> {
    let mut chosen = None;

    for token in &field.types {
        let resolved = resolve_field_type(ctx, token)?;

        if resolved.descriptor.is_file_upload() {
            tracing::trace!("Skipping file-upload alternative of '{}'", field.name);
            continue;
        }
        if INTEGER_ONLY_FIELDS.contains(&field.name.as_str())
            && resolved.descriptor.is_scalar(ScalarKind::String)
        {
            continue;
        }
        if chosen.is_none() {
            chosen = Some(resolved);
        }
    }

    Ok(chosen)
}

/// Builds the declaration of one schema field, or `None` when no alternative
/// survives [`declarable_type`].
///
/// ## Errors
///
/// Propagates `GeneratorError::UnresolvableType`.
pub fn declare_field(
    ctx: &mut CompilationContext,
    field: &SchemaField,
    keep_description: bool,
) -> Result<Option<DeclaredField>, GeneratorError> {
    let Some(field_type) = declarable_type(ctx, field)? else {
        return Ok(None);
    };

    Ok(Some(DeclaredField {
        wire_name: field.name.clone(),
        binding_name: upper_camel(&field.name),
        descriptor: field_type.descriptor,
        indirect: field_type.indirect,
        required: field.required,
        description: keep_description.then(|| field.description.clone()),
    }))
}

/// Flattens the subtypes of union `parent` into one field list.
///
/// Each subtype is registered under `parent` in the context, then its fields
/// are appended in order, skipping names an earlier subtype already claimed.
/// A claimed name stays claimed even when none of its alternatives survive.
///
/// ## Errors
///
/// - `GeneratorError::AssumptionViolation` if a subtype is missing from the
///   table or already belongs to another parent
/// - `GeneratorError::UnresolvableType` from any field alternative
pub fn flatten_subtypes(
    ctx: &mut CompilationContext,
    parent: &str,
    subtypes: &[String],
    table: &TypeTable,
) -> Result<Vec<DeclaredField>, GeneratorError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut fields = Vec::new();

    for subtype in subtypes {
        ctx.register_subtype(subtype, parent)?;

        let schema = table.get(subtype).ok_or_else(|| {
            GeneratorError::assumption(
                parent,
                format!("subtype '{subtype}' is not declared in the schema"),
            )
        })?;

        for field in schema.fields() {
            if !seen.insert(field.name.as_str()) {
                continue;
            }
            if let Some(declared) = declare_field(ctx, field, false)? {
                fields.push(declared);
            }
        }
    }

    tracing::debug!(
        "Flattened {} subtypes of {} into {} fields",
        subtypes.len(),
        parent,
        fields.len()
    );
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::types::TypeDescriptor;
    use crate::test_utils::{leaf, marker, table, union};

    fn names(fields: &[DeclaredField]) -> Vec<&str> {
        fields.iter().map(|f| f.wire_name.as_str()).collect()
    }

    #[test]
    fn first_writer_wins() {
        let types = table(vec![
            union("Base", &["A", "B"]),
            leaf(
                "A",
                vec![
                    SchemaField::new("x", "String", true),
                    SchemaField::new("y", "Integer", false),
                ],
            ),
            leaf(
                "B",
                vec![
                    SchemaField::new("y", "Integer", true),
                    SchemaField::new("z", "Boolean", false),
                ],
            ),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let fields =
            flatten_subtypes(&mut ctx, "Base", &["A".into(), "B".into()], &types).unwrap();

        assert_eq!(names(&fields), vec!["x", "y", "z"]);
        // `y` comes from A, which declared it optional.
        assert!(!fields[1].required);
        assert_eq!(ctx.supertype_of("A"), Some("Base"));
        assert_eq!(ctx.supertype_of("B"), Some("Base"));
    }

    #[test]
    fn file_upload_fields_are_dropped() {
        let types = table(vec![
            union("InputMedia", &["InputMediaPhoto", "InputMediaVideo"]),
            leaf(
                "InputMediaPhoto",
                vec![
                    SchemaField::new("type", "String", true),
                    SchemaField::with_alternatives("media", ["InputFile", "String"], true),
                ],
            ),
            leaf(
                "InputMediaVideo",
                vec![
                    SchemaField::new("type", "String", true),
                    SchemaField::with_alternatives("thumbnail", ["InputFile"], false),
                ],
            ),
            marker("InputFile"),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let fields = flatten_subtypes(
            &mut ctx,
            "InputMedia",
            &["InputMediaPhoto".into(), "InputMediaVideo".into()],
            &types,
        )
        .unwrap();

        assert_eq!(names(&fields), vec!["type", "media"]);
        assert_eq!(
            fields[1].descriptor,
            TypeDescriptor::Scalar(ScalarKind::String)
        );
        assert!(fields.iter().all(|f| !f.descriptor.is_file_upload()));
    }

    #[test]
    fn chat_id_keeps_integer_form_only() {
        let mut ctx = CompilationContext::default();
        let field = SchemaField::with_alternatives("chat_id", ["Integer", "String"], true);
        let declared = declare_field(&mut ctx, &field, true).unwrap().unwrap();
        assert_eq!(
            declared.descriptor,
            TypeDescriptor::Scalar(ScalarKind::Int64)
        );

        let string_only = SchemaField::new("chat_id", "String", true);
        assert!(declare_field(&mut ctx, &string_only, true).unwrap().is_none());

        // The exception is keyed by name: other string fields survive.
        let other = SchemaField::new("username", "String", true);
        assert!(declare_field(&mut ctx, &other, true).unwrap().is_some());
    }

    #[test]
    fn missing_subtype_is_an_assumption_violation() {
        let types = table(vec![union("Base", &["Ghost"])]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let err = flatten_subtypes(&mut ctx, "Base", &["Ghost".into()], &types).unwrap_err();
        assert!(matches!(err, GeneratorError::AssumptionViolation { .. }));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn flattened_fields_carry_no_description() {
        let types = table(vec![
            union("Base", &["A"]),
            leaf(
                "A",
                vec![SchemaField::new("x", "String", true).described("An x")],
            ),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());
        let fields = flatten_subtypes(&mut ctx, "Base", &["A".into()], &types).unwrap();
        assert_eq!(fields[0].description, None);
        assert_eq!(fields[0].binding_name, "X");
    }
}
