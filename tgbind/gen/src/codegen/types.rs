//! Type declaration generation.
//!
//! Every schema type becomes a serde struct. On top of the declarations this
//! module generates:
//!
//! - the `ReplyMarkup` enum over the reply-markup variants, with `From`
//!   conversions from each variant
//! - one `<Parent>Variant` capability trait per union parent, implemented by
//!   each of its subtypes
//! - array and array-of-array unwrap helpers for the registered elements

use proc_macro2::TokenStream;
use quote::quote;

use super::render::{
    array_helper_ident, array_of_array_helper_ident, doc_attr, doc_line, field_ident, field_type,
    type_ident, variant_method_ident, variant_trait_ident,
};
use crate::resolve::{DeclarationKind, DeclaredField, FILE_UPLOAD_TYPE, TypeBinding, TypeDescriptor};

/// Generates the declaration of one type.
///
/// Returns an empty stream for the file-upload type, which lives in the
/// runtime module. Union parents accept any subset of their flattened fields
/// (`#[serde(default)]` on the container), since each subtype carries only
/// its own.
///
/// ## Examples
///
/// ```ignore
/// /// This object represents a Telegram user or bot.
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// pub struct User {
///     pub id: i64,
///     #[serde(default, skip_serializing_if = "Option::is_none")]
///     pub last_name: Option<String>,
/// }
/// ```
pub fn generate_type_declaration(binding: &TypeBinding) -> TokenStream {
    if binding.kind == DeclarationKind::FileUpload {
        return TokenStream::new();
    }

    let name = type_ident(&binding.name);
    let doc = doc_attr(&binding.description);
    let container_attr = if binding.variant_parent {
        quote! { #[serde(default)] }
    } else {
        TokenStream::new()
    };
    let fields: Vec<TokenStream> = binding.fields.iter().map(generate_field).collect();

    quote! {
        #doc
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #container_attr
        pub struct #name {
            #(#fields)*
        }
    }
}

fn generate_field(field: &DeclaredField) -> TokenStream {
    let ident = field_ident(&field.wire_name);
    let doc = match &field.description {
        Some(text) => doc_attr(std::slice::from_ref(text)),
        None => TokenStream::new(),
    };
    let ty = field_type(&field.descriptor, field.indirect);

    let is_array = matches!(
        field.descriptor,
        TypeDescriptor::Array(_) | TypeDescriptor::ArrayOfArray(_)
    );

    if field.required {
        quote! {
            #doc
            pub #ident: #ty,
        }
    } else if is_array {
        quote! {
            #doc
            #[serde(default, skip_serializing_if = "Vec::is_empty")]
            pub #ident: #ty,
        }
    } else {
        quote! {
            #doc
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub #ident: Option<#ty>,
        }
    }
}

/// Generates the `ReplyMarkup` enum and its conversions.
///
/// Returns an empty stream when no variant is declared.
pub fn generate_reply_markup(variants: &[String]) -> TokenStream {
    if variants.is_empty() {
        return TokenStream::new();
    }

    let idents: Vec<_> = variants.iter().map(|v| type_ident(v)).collect();

    let conversions = idents.iter().map(|ident| {
        quote! {
            impl From<#ident> for ReplyMarkup {
                fn from(markup: #ident) -> Self {
                    Self::#ident(markup)
                }
            }
        }
    });

    quote! {
        /// Any of the reply markup types a message can carry.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(untagged)]
        pub enum ReplyMarkup {
            #(#idents(#idents),)*
        }

        #(#conversions)*
    }
}

/// Generates the capability trait of a union parent and its implementations
/// for `subtypes`.
///
/// The conversion re-reads the subtype's JSON form as the parent, which
/// declares every field any subtype has.
pub fn generate_variant_trait(parent: &str, subtypes: &[&str]) -> TokenStream {
    let parent_ident = type_ident(parent);
    let trait_ident = variant_trait_ident(parent);
    let method = variant_method_ident(parent);
    let doc = doc_line(&format!("Implemented by every concrete variant of [`{parent}`]."));
    let method_doc = doc_line(&format!("Converts this value into the flattened [`{parent}`]."));

    let impls = subtypes.iter().map(|subtype| {
        let ident = type_ident(subtype);
        quote! {
            impl #trait_ident for #ident {}
        }
    });

    quote! {
        #[doc = #doc]
        pub trait #trait_ident: Serialize {
            #[doc = #method_doc]
            fn #method(&self) -> Result<#parent_ident, serde_json::Error> {
                serde_json::to_value(self).and_then(serde_json::from_value)
            }
        }

        #(#impls)*
    }
}

/// Generates the array unwrap helpers.
///
/// The file-upload type never appears in a response, so it gets no helper.
pub fn generate_array_helpers(arrays: &[String], array_of_arrays: &[String]) -> TokenStream {
    let singles = arrays
        .iter()
        .filter(|element| element.as_str() != FILE_UPLOAD_TYPE)
        .map(|element| {
            let helper = array_helper_ident(element);
            let ty = type_ident(element);
            let doc = doc_line(&format!("Decodes an array of [`{element}`] from a call result."));
            quote! {
                #[doc = #doc]
                pub fn #helper(value: serde_json::Value) -> Result<Vec<#ty>, serde_json::Error> {
                    serde_json::from_value(value)
                }
            }
        });

    let doubles = array_of_arrays
        .iter()
        .filter(|element| element.as_str() != FILE_UPLOAD_TYPE)
        .map(|element| {
            let helper = array_of_array_helper_ident(element);
            let ty = type_ident(element);
            let doc = doc_line(&format!(
                "Decodes an array of arrays of [`{element}`] from a call result."
            ));
            quote! {
                #[doc = #doc]
                pub fn #helper(
                    value: serde_json::Value,
                ) -> Result<Vec<Vec<#ty>>, serde_json::Error> {
                    serde_json::from_value(value)
                }
            }
        });

    quote! {
        #(#singles)*
        #(#doubles)*
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ScalarKind;
    use crate::test_utils::format_tokens;

    fn declared(
        name: &str,
        descriptor: TypeDescriptor,
        indirect: bool,
        required: bool,
    ) -> DeclaredField {
        DeclaredField {
            wire_name: name.to_string(),
            binding_name: crate::naming::upper_camel(name),
            descriptor,
            indirect,
            required,
            description: Some(format!("The {name}.")),
        }
    }

    fn binding(name: &str, fields: Vec<DeclaredField>) -> TypeBinding {
        TypeBinding {
            name: name.to_string(),
            description: vec![format!("A {name}.")],
            kind: DeclarationKind::Struct,
            fields,
            supertype: None,
            reply_markup_variant: false,
            variant_parent: false,
        }
    }

    #[test]
    fn struct_with_all_field_shapes() {
        let message = binding(
            "Message",
            vec![
                declared(
                    "message_id",
                    TypeDescriptor::Scalar(ScalarKind::Int64),
                    false,
                    true,
                ),
                declared("from", TypeDescriptor::object("User"), true, false),
                declared("chat", TypeDescriptor::object("Chat"), true, true),
                declared(
                    "photo",
                    TypeDescriptor::array_of(TypeDescriptor::object("PhotoSize")),
                    false,
                    false,
                ),
            ],
        );
        let code = format_tokens(generate_type_declaration(&message));

        assert!(code.contains("/// A Message."));
        assert!(code.contains("pub struct Message {"));
        assert!(code.contains("pub message_id: i64,"));
        assert!(code.contains("pub from: Option<Box<User>>,"));
        assert!(code.contains("pub chat: Box<Chat>,"));
        assert!(code.contains("pub photo: Vec<PhotoSize>,"));
        assert!(code.contains("skip_serializing_if = \"Vec::is_empty\""));
        assert!(code.contains("/// The from."));
    }

    #[test]
    fn keyword_field_is_raw() {
        let scope = binding(
            "BotCommandScopeDefault",
            vec![declared(
                "type",
                TypeDescriptor::Scalar(ScalarKind::String),
                false,
                true,
            )],
        );
        let code = format_tokens(generate_type_declaration(&scope));
        assert!(code.contains("pub r#type: String,"));
    }

    #[test]
    fn union_parent_defaults_missing_fields() {
        let mut parent = binding(
            "ChatMember",
            vec![declared(
                "status",
                TypeDescriptor::Scalar(ScalarKind::String),
                false,
                true,
            )],
        );
        parent.variant_parent = true;
        let code = format_tokens(generate_type_declaration(&parent));
        assert!(code.contains("#[serde(default)]\npub struct ChatMember"));
    }

    #[test]
    fn marker_is_an_empty_struct_and_file_upload_is_skipped() {
        let mut game = binding("CallbackGame", vec![]);
        game.kind = DeclarationKind::Marker;
        let code = format_tokens(generate_type_declaration(&game));
        assert!(code.contains("pub struct CallbackGame {}"));

        let mut input = binding("InputFile", vec![]);
        input.kind = DeclarationKind::FileUpload;
        assert!(generate_type_declaration(&input).is_empty());
    }

    #[test]
    fn reply_markup_enum() {
        let variants = vec!["InlineKeyboardMarkup".to_string(), "ForceReply".to_string()];
        let code = format_tokens(generate_reply_markup(&variants));
        assert!(code.contains("#[serde(untagged)]"));
        assert!(code.contains("pub enum ReplyMarkup {"));
        assert!(code.contains("InlineKeyboardMarkup(InlineKeyboardMarkup),"));
        assert!(code.contains("impl From<ForceReply> for ReplyMarkup"));

        assert!(generate_reply_markup(&[]).is_empty());
    }

    #[test]
    fn variant_trait() {
        let code = format_tokens(generate_variant_trait(
            "ChatMember",
            &["ChatMemberOwner", "ChatMemberMember"],
        ));
        assert!(code.contains("pub trait ChatMemberVariant: Serialize {"));
        assert!(code.contains("fn to_chat_member(&self) -> Result<ChatMember, serde_json::Error>"));
        assert!(code.contains("impl ChatMemberVariant for ChatMemberOwner {}"));
        assert!(code.contains("impl ChatMemberVariant for ChatMemberMember {}"));
    }

    #[test]
    fn array_helpers() {
        let code = format_tokens(generate_array_helpers(
            &["Update".to_string(), "InputFile".to_string()],
            &["PhotoSize".to_string()],
        ));
        assert!(code.contains("pub fn unmarshal_update_array("));
        assert!(code.contains("Result<Vec<Update>, serde_json::Error>"));
        assert!(code.contains("unmarshal_photo_size_array_of_array"));
        assert!(code.contains("Vec<Vec<PhotoSize>>"));
        assert!(!code.contains("unmarshal_input_file_array"));
    }
}
