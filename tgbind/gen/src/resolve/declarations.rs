//! Type declaration synthesis.

use serde::Serialize;
use strum::{Display, EnumString};
use tgbind_define::{SchemaType, TypeTable};

use super::context::CompilationContext;
use super::inheritance::{declare_field, flatten_subtypes};
use super::types::{FILE_UPLOAD_TYPE, TypeDescriptor};
use crate::errors::GeneratorError;

/// The closed set of types a reply-markup parameter accepts.
pub const MARKUP_VARIANTS: [&str; 4] = [
    "InlineKeyboardMarkup",
    "ReplyKeyboardMarkup",
    "ReplyKeyboardRemove",
    "ForceReply",
];

/// How a type is declared in the bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeclarationKind {
    /// A record with named fields.
    Struct,
    /// A type with no fields of its own.
    Marker,
    /// The file-upload capability type.
    FileUpload,
}

/// A field as it appears in a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredField {
    pub wire_name: String,
    pub binding_name: String,
    pub descriptor: TypeDescriptor,
    /// Object references in field position are single-owner pointers.
    pub indirect: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The resolved declaration of one schema type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeBinding {
    pub name: String,
    pub description: Vec<String>,
    pub kind: DeclarationKind,
    pub fields: Vec<DeclaredField>,
    /// Union parent this type converts into, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertype: Option<String>,
    /// True for members of [`MARKUP_VARIANTS`].
    pub reply_markup_variant: bool,
    /// True for union parents, which get a capability trait.
    pub variant_parent: bool,
}

impl TypeBinding {
    pub fn is_reply_markup_variant(name: &str) -> bool {
        MARKUP_VARIANTS.contains(&name)
    }
}

/// Synthesizes the declaration of `schema`.
///
/// Union parents get the flattened field list of their subtypes. Leaf types
/// declare each field through the same alternative-skipping rule the
/// flattener uses, keeping descriptions. `supertype` reflects whatever the
/// context has registered for this name at the time of the call.
///
/// ## Errors
///
/// - `GeneratorError::UnresolvableType` if any field alternative is unknown
/// - `GeneratorError::AssumptionViolation` from union flattening
pub fn synthesize_type(
    ctx: &mut CompilationContext,
    schema: &SchemaType,
    table: &TypeTable,
) -> Result<TypeBinding, GeneratorError> {
    let (kind, fields, variant_parent) = if schema.is_union() {
        let fields = flatten_subtypes(ctx, &schema.name, schema.subtypes(), table)?;
        (DeclarationKind::Struct, fields, true)
    } else if schema.is_marker() {
        let kind = if schema.name == FILE_UPLOAD_TYPE {
            DeclarationKind::FileUpload
        } else {
            DeclarationKind::Marker
        };
        (kind, Vec::new(), false)
    } else {
        let mut fields = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            if let Some(declared) = declare_field(ctx, field, true)? {
                fields.push(declared);
            }
        }
        (DeclarationKind::Struct, fields, false)
    };

    let supertype = ctx.supertype_of(&schema.name).map(str::to_string);
    let reply_markup_variant = TypeBinding::is_reply_markup_variant(&schema.name);

    tracing::debug!(
        "Resolved type {} ({}, {} fields)",
        schema.name,
        kind,
        fields.len()
    );

    Ok(TypeBinding {
        name: schema.name.clone(),
        description: schema.description.clone(),
        kind,
        fields,
        supertype,
        reply_markup_variant,
        variant_parent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::types::ScalarKind;
    use crate::test_utils::{leaf, marker, table, union};
    use tgbind_define::SchemaField;

    #[test]
    fn leaf_type_keeps_descriptions_and_boxes_objects() {
        let types = table(vec![
            leaf(
                "Message",
                vec![
                    SchemaField::new("message_id", "Integer", true).described("Unique id"),
                    SchemaField::new("from", "User", false),
                    SchemaField::new("photo", "Array of PhotoSize", false),
                ],
            ),
            leaf("User", vec![SchemaField::new("id", "Integer", true)]),
            leaf(
                "PhotoSize",
                vec![SchemaField::new("file_id", "String", true)],
            ),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let binding = synthesize_type(&mut ctx, &types["Message"], &types).unwrap();

        assert_eq!(binding.kind, DeclarationKind::Struct);
        assert_eq!(binding.fields.len(), 3);
        assert_eq!(binding.fields[0].description.as_deref(), Some("Unique id"));
        assert_eq!(
            binding.fields[0].descriptor,
            TypeDescriptor::Scalar(ScalarKind::Int64)
        );
        assert!(binding.fields[1].indirect);
        assert!(!binding.fields[2].indirect);
        assert!(ctx.needs_array_helper("PhotoSize"));
        assert!(binding.supertype.is_none());
        assert!(!binding.variant_parent);
    }

    #[test]
    fn union_parent_is_flattened_and_flagged() {
        let types = table(vec![
            union(
                "BotCommandScope",
                &["BotCommandScopeDefault", "BotCommandScopeChat"],
            ),
            leaf(
                "BotCommandScopeDefault",
                vec![SchemaField::new("type", "String", true)],
            ),
            leaf(
                "BotCommandScopeChat",
                vec![
                    SchemaField::new("type", "String", true),
                    SchemaField::with_alternatives("chat_id", ["Integer", "String"], true),
                ],
            ),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let parent = synthesize_type(&mut ctx, &types["BotCommandScope"], &types).unwrap();
        assert!(parent.variant_parent);
        assert_eq!(parent.fields.len(), 2);

        let child = synthesize_type(&mut ctx, &types["BotCommandScopeChat"], &types).unwrap();
        assert_eq!(child.supertype.as_deref(), Some("BotCommandScope"));
        assert!(!child.variant_parent);
    }

    #[test]
    fn markers_and_file_upload() {
        let types = table(vec![marker("InputFile"), marker("CallbackGame")]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let input = synthesize_type(&mut ctx, &types["InputFile"], &types).unwrap();
        assert_eq!(input.kind, DeclarationKind::FileUpload);

        let game = synthesize_type(&mut ctx, &types["CallbackGame"], &types).unwrap();
        assert_eq!(game.kind, DeclarationKind::Marker);
        assert!(game.fields.is_empty());
    }

    #[test]
    fn reply_markup_variants_are_flagged() {
        let types = table(vec![
            leaf(
                "ForceReply",
                vec![SchemaField::new("force_reply", "True", true)],
            ),
            leaf(
                "KeyboardButton",
                vec![SchemaField::new("text", "String", true)],
            ),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        assert!(
            synthesize_type(&mut ctx, &types["ForceReply"], &types)
                .unwrap()
                .reply_markup_variant
        );
        assert!(
            !synthesize_type(&mut ctx, &types["KeyboardButton"], &types)
                .unwrap()
                .reply_markup_variant
        );
    }

    #[test]
    fn leaf_drops_file_upload_field() {
        let types = table(vec![
            leaf(
                "InputSticker",
                vec![
                    SchemaField::with_alternatives("sticker", ["InputFile", "String"], true),
                    SchemaField::new("thumbnail", "InputFile", false),
                ],
            ),
            marker("InputFile"),
        ]);
        let mut ctx = CompilationContext::with_known_types(types.keys().cloned());

        let binding = synthesize_type(&mut ctx, &types["InputSticker"], &types).unwrap();
        assert_eq!(binding.fields.len(), 1);
        assert_eq!(binding.fields[0].wire_name, "sticker");
    }

    #[test]
    fn kind_display() {
        assert_eq!(DeclarationKind::FileUpload.to_string(), "file_upload");
        assert_eq!(
            "marker".parse::<DeclarationKind>().unwrap(),
            DeclarationKind::Marker
        );
    }
}
