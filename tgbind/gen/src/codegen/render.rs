//! Rust renderings of resolved types and names.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};

use crate::naming::snake_case;
use crate::resolve::{ParamType, ResolvedField, ScalarKind, TypeDescriptor};

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Returns an identifier for a wire name, falling back to a raw identifier
/// for keywords (`type` becomes `r#type`).
///
/// Serde strips the `r#` prefix, so the wire name is preserved. Keywords
/// that have no raw form get a trailing underscore (`self_`), and any other
/// character that cannot appear in an identifier becomes `_`.
pub fn field_ident(name: &str) -> Ident {
    if NON_RAW_KEYWORDS.contains(&name) {
        return Ident::new(&format!("{name}_"), Span::call_site());
    }
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return ident;
    }
    if let Ok(ident) = syn::parse_str::<Ident>(&format!("r#{name}")) {
        return ident;
    }

    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() || sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    if sanitized.chars().all(|c| c == '_') {
        sanitized.push_str("field");
    }
    Ident::new(&sanitized, Span::call_site())
}

pub fn type_ident(name: &str) -> Ident {
    format_ident!("{}", name)
}

/// Method names become snake_case functions (`sendPhoto` -> `send_photo`).
pub fn method_ident(name: &str) -> Ident {
    field_ident(&snake_case(name))
}

pub fn array_helper_ident(element: &str) -> Ident {
    format_ident!("unmarshal_{}_array", snake_case(element))
}

pub fn array_of_array_helper_ident(element: &str) -> Ident {
    format_ident!("unmarshal_{}_array_of_array", snake_case(element))
}

/// `ChatMember` -> `ChatMemberVariant`.
pub fn variant_trait_ident(parent: &str) -> Ident {
    format_ident!("{}Variant", parent)
}

/// `ChatMember` -> `to_chat_member`.
pub fn variant_method_ident(parent: &str) -> Ident {
    format_ident!("to_{}", snake_case(parent))
}

/// Joins description paragraphs into one doc string.
pub fn doc_text(paragraphs: &[String]) -> Option<String> {
    let text = paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    (!text.is_empty()).then_some(text)
}

/// Prefixes a doc line with the space a `///` comment carries.
pub fn doc_line(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!(" {text}")
    }
}

/// Renders one `#[doc]` attribute per line, or nothing for an empty
/// description.
pub fn doc_attr(paragraphs: &[String]) -> TokenStream {
    let Some(text) = doc_text(paragraphs) else {
        return TokenStream::new();
    };
    let lines = text.lines().map(|line| doc_line(line.trim_end()));
    quote! { #(#[doc = #lines])* }
}

fn scalar_type(kind: ScalarKind) -> TokenStream {
    match kind {
        ScalarKind::String => quote! { String },
        ScalarKind::Int64 => quote! { i64 },
        ScalarKind::Float64 => quote! { f64 },
        ScalarKind::Bool => quote! { bool },
    }
}

/// Renders a descriptor as an owned value type (`Vec<Vec<PhotoSize>>`).
pub fn owned_type(descriptor: &TypeDescriptor) -> TokenStream {
    match descriptor {
        TypeDescriptor::Scalar(kind) => scalar_type(*kind),
        TypeDescriptor::ObjectRef(name) => {
            let ident = type_ident(name);
            quote! { #ident }
        }
        TypeDescriptor::Array(inner) => {
            let inner = owned_type(inner);
            quote! { Vec<#inner> }
        }
        TypeDescriptor::ArrayOfArray(inner) => {
            let inner = owned_type(inner);
            quote! { Vec<Vec<#inner>> }
        }
    }
}

/// Renders a descriptor in declaration position: object references are
/// boxed when `indirect`.
pub fn field_type(descriptor: &TypeDescriptor, indirect: bool) -> TokenStream {
    let owned = owned_type(descriptor);
    if indirect {
        quote! { Box<#owned> }
    } else {
        owned
    }
}

/// Renders the borrowed type a required parameter takes.
pub fn param_type(field: &ResolvedField) -> TokenStream {
    match field.param_type {
        ParamType::FileUpload => quote! { &InputFile },
        ParamType::ReplyMarkup => quote! { &ReplyMarkup },
        ParamType::Plain => match &field.descriptor {
            TypeDescriptor::Scalar(ScalarKind::String) => quote! { &str },
            TypeDescriptor::Scalar(kind) => scalar_type(*kind),
            TypeDescriptor::ObjectRef(_) => {
                let owned = owned_type(&field.descriptor);
                quote! { &#owned }
            }
            TypeDescriptor::Array(inner) => {
                let inner = owned_type(inner);
                quote! { &[#inner] }
            }
            TypeDescriptor::ArrayOfArray(inner) => {
                let inner = owned_type(inner);
                quote! { &[Vec<#inner>] }
            }
        },
    }
}

/// Renders the owned type an options-container field holds.
pub fn option_field_type(field: &ResolvedField) -> TokenStream {
    match field.param_type {
        ParamType::FileUpload => quote! { InputFile },
        ParamType::ReplyMarkup => quote! { ReplyMarkup },
        ParamType::Plain => owned_type(&field.descriptor),
    }
}
