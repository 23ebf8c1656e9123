//! Schema document types.
//!
//! These types mirror the JSON layout of the Bot API schema document:
//!
//! ```text
//! {
//!   "version": "Bot API 7.0",
//!   "types":   { "<Name>": { "name", "description", "subtypes"?, "fields"? } },
//!   "methods": { "<name>": { "name", "description", "fields"?, "returns" } }
//! }
//! ```
//!
//! The document is parsed once and read-only afterwards. Both top-level maps
//! keep document order, which is the order the generator resolves entries in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema types keyed by identifier, in document order.
pub type TypeTable = IndexMap<String, SchemaType>;

/// Schema methods keyed by identifier, in document order.
pub type MethodTable = IndexMap<String, SchemaMethod>;

/// The complete schema document.
///
/// ## Examples
///
/// ```
/// use tgbind_define::SchemaDocument;
///
/// let doc: SchemaDocument = serde_json::from_str(r#"{
///     "types": {
///         "User": {
///             "name": "User",
///             "description": ["This object represents a user."],
///             "fields": [
///                 { "name": "id", "types": ["Integer"], "required": true, "description": "Id" }
///             ]
///         }
///     },
///     "methods": {
///         "getMe": { "name": "getMe", "description": ["Returns the bot."], "returns": ["User"] }
///     }
/// }"#).unwrap();
///
/// assert_eq!(doc.types.len(), 1);
/// assert_eq!(doc.methods["getMe"].returns, vec!["User"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Schema revision label (e.g. "Bot API 7.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Release date of the revision, as published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Link to the changelog entry for the revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    /// Object types keyed by identifier, in document order.
    #[serde(default)]
    pub types: TypeTable,
    /// Callable methods keyed by identifier, in document order.
    #[serde(default)]
    pub methods: MethodTable,
}

impl SchemaDocument {
    /// Returns true when the document declares neither types nor methods.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }

    /// Looks up a type by identifier.
    pub fn get_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }
}

/// A schema object type.
///
/// A type is one of three shapes:
///
/// - a **union parent**: `subtypes` is set, `fields` is absent
/// - a **leaf**: `fields` is set
/// - a **marker**: neither is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaType {
    pub name: String,
    /// Human-readable description, one entry per paragraph.
    #[serde(default)]
    pub description: Vec<String>,
    /// Documentation link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Identifiers of the concrete subtypes of a union parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<String>>,
    /// Parents this type is listed under. Informational only; the generator
    /// derives the relation from `subtypes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_of: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SchemaField>>,
}

impl SchemaType {
    /// Returns the declared subtypes, or an empty slice.
    pub fn subtypes(&self) -> &[String] {
        self.subtypes.as_deref().unwrap_or_default()
    }

    /// Returns the declared fields, or an empty slice.
    pub fn fields(&self) -> &[SchemaField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Returns true for a union parent with at least one subtype.
    pub fn is_union(&self) -> bool {
        !self.subtypes().is_empty()
    }

    /// Returns true for a type with neither subtypes nor a field list.
    pub fn is_marker(&self) -> bool {
        !self.is_union() && self.fields.is_none()
    }
}

/// A field of a type, or a parameter of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Wire name (snake_case).
    pub name: String,
    /// Alternative type tokens, e.g. `["Integer", "String"]`.
    pub types: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl SchemaField {
    /// Creates a field with a single type alternative.
    pub fn new(name: impl Into<String>, type_token: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            types: vec![type_token.into()],
            required,
            description: String::new(),
        }
    }

    /// Creates a field accepting several type alternatives.
    pub fn with_alternatives<I, S>(name: impl Into<String>, types: I, required: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            types: types.into_iter().map(Into::into).collect(),
            required,
            description: String::new(),
        }
    }

    /// Attaches a description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A callable method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMethod {
    /// Wire name (lowerCamel, e.g. `sendPhoto`).
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Parameters, in declared order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SchemaField>>,
    /// Alternative return type tokens. The first one is authoritative.
    pub returns: Vec<String>,
}

impl SchemaMethod {
    /// Returns the declared parameters, or an empty slice.
    pub fn fields(&self) -> &[SchemaField] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Returns the authoritative return type token.
    pub fn primary_return(&self) -> Option<&str> {
        self.returns.first().map(String::as_str)
    }
}
