//! Shared test utilities for tgbind-gen tests.
//!
//! Builders for schema fixtures, so tests can describe a document in a few
//! lines instead of spelling out every struct field.

use proc_macro2::TokenStream;
use tgbind_define::{SchemaDocument, SchemaField, SchemaMethod, SchemaType, TypeTable};

use crate::resolve::{BindingSet, compile};

/// Creates a leaf type with the given fields.
pub fn leaf(name: &str, fields: Vec<SchemaField>) -> SchemaType {
    SchemaType {
        name: name.to_string(),
        description: vec![format!("{name} type")],
        fields: Some(fields),
        ..Default::default()
    }
}

/// Creates a union parent over `subtypes`.
pub fn union(name: &str, subtypes: &[&str]) -> SchemaType {
    SchemaType {
        name: name.to_string(),
        description: vec![format!("{name} union")],
        subtypes: Some(subtypes.iter().map(|s| s.to_string()).collect()),
        ..Default::default()
    }
}

/// Creates a type with neither fields nor subtypes.
pub fn marker(name: &str) -> SchemaType {
    SchemaType {
        name: name.to_string(),
        description: vec![format!("{name} marker")],
        ..Default::default()
    }
}

/// Creates a method.
///
/// ## Arguments
///
/// * `name` - Wire name (lowerCamel)
/// * `fields` - Parameters in declared order
/// * `returns` - Return alternatives; the first is authoritative
pub fn method(name: &str, fields: Vec<SchemaField>, returns: &[&str]) -> SchemaMethod {
    SchemaMethod {
        name: name.to_string(),
        description: vec![format!("Calls {name}.")],
        fields: if fields.is_empty() { None } else { Some(fields) },
        returns: returns.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Builds a type table keyed by name, in the given order.
pub fn table(types: Vec<SchemaType>) -> TypeTable {
    types.into_iter().map(|t| (t.name.clone(), t)).collect()
}

/// Builds a document from types and methods.
pub fn document(types: Vec<SchemaType>, methods: Vec<SchemaMethod>) -> SchemaDocument {
    SchemaDocument {
        types: table(types),
        methods: methods.into_iter().map(|m| (m.name.clone(), m)).collect(),
        ..Default::default()
    }
}

/// A small document exercising every declaration path: a union with two
/// subtypes, the reply-markup set, the file-upload type, and methods with
/// and without options.
pub fn sample_document() -> SchemaDocument {
    let markup = [
        "InlineKeyboardMarkup",
        "ReplyKeyboardMarkup",
        "ReplyKeyboardRemove",
        "ForceReply",
    ];

    let mut types = vec![
        leaf(
            "User",
            vec![
                SchemaField::new("id", "Integer", true),
                SchemaField::new("is_bot", "Boolean", true),
                SchemaField::new("first_name", "String", true),
            ],
        ),
        leaf(
            "Message",
            vec![
                SchemaField::new("message_id", "Integer", true),
                SchemaField::new("from", "User", false),
                SchemaField::new("photo", "Array of PhotoSize", false),
            ],
        ),
        leaf(
            "PhotoSize",
            vec![SchemaField::new("file_id", "String", true)],
        ),
        leaf(
            "Update",
            vec![
                SchemaField::new("update_id", "Integer", true),
                SchemaField::new("message", "Message", false),
            ],
        ),
        union("ChatMember", &["ChatMemberOwner", "ChatMemberMember"]),
        leaf(
            "ChatMemberOwner",
            vec![
                SchemaField::new("status", "String", true),
                SchemaField::new("user", "User", true),
                SchemaField::new("is_anonymous", "Boolean", true),
            ],
        ),
        leaf(
            "ChatMemberMember",
            vec![
                SchemaField::new("status", "String", true),
                SchemaField::new("user", "User", true),
            ],
        ),
        marker("InputFile"),
        leaf(
            "InlineKeyboardMarkup",
            vec![SchemaField::new(
                "inline_keyboard",
                "Array of Array of InlineKeyboardButton",
                true,
            )],
        ),
        leaf(
            "InlineKeyboardButton",
            vec![SchemaField::new("text", "String", true)],
        ),
    ];
    for name in &markup[1..] {
        types.push(leaf(
            name,
            vec![SchemaField::new("selective", "Boolean", false)],
        ));
    }

    let methods = vec![
        method("getMe", vec![], &["User"]),
        method(
            "getUpdates",
            vec![
                SchemaField::new("offset", "Integer", false),
                SchemaField::new("timeout", "Integer", false),
            ],
            &["Array of Update"],
        ),
        method(
            "sendPhoto",
            vec![
                SchemaField::with_alternatives("chat_id", ["Integer", "String"], true),
                SchemaField::with_alternatives("photo", ["InputFile", "String"], true),
                SchemaField::new("caption", "String", false),
                SchemaField::with_alternatives("reply_markup", markup, false),
            ],
            &["Message"],
        ),
        method(
            "getChatMember",
            vec![
                SchemaField::with_alternatives("chat_id", ["Integer", "String"], true),
                SchemaField::new("user_id", "Integer", true),
            ],
            &["ChatMember"],
        ),
        method(
            "setChatTitle",
            vec![
                SchemaField::with_alternatives("chat_id", ["Integer", "String"], true),
                SchemaField::new("title", "String", true),
            ],
            &["Boolean"],
        ),
    ];

    SchemaDocument {
        version: Some("Bot API 7.0".to_string()),
        ..document(types, methods)
    }
}

/// Compiles [`sample_document`].
pub fn sample_bindings() -> BindingSet {
    compile(Some(&sample_document())).expect("sample document compiles")
}

/// Formats a token stream into a pretty-printed string for assertions.
pub fn format_tokens(tokens: TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens).expect("tokens parse as a file");
    prettyplease::unparse(&file)
}
