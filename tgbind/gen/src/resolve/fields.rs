//! Method parameter classification.
//!
//! Each parameter is resolved to one descriptor and tagged with the strategy
//! that turns a supplied value into a request parameter:
//!
//! | Resolved kind   | Strategy      |
//! |-----------------|---------------|
//! | string          | `Direct`      |
//! | int64           | `FormatInt`   |
//! | float64         | `FormatFloat` |
//! | bool            | `FormatBool`  |
//! | `InputFile`     | `FileUpload`  |
//! | anything else   | `Json`        |

use std::collections::BTreeSet;

use serde::Serialize;
use strum::{Display, EnumString};
use tgbind_define::SchemaField;

use super::context::CompilationContext;
use super::declarations::MARKUP_VARIANTS;
use super::types::{FILE_UPLOAD_TYPE, ScalarKind, TypeDescriptor, resolve_binding_type};
use crate::errors::GeneratorError;
use crate::naming::{lower_camel, upper_camel};

/// How a supplied value becomes a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SerializationStrategy {
    /// Assign the string as-is.
    Direct,
    /// Base-10 integer text.
    FormatInt,
    /// Shortest round-trip float text.
    FormatFloat,
    /// `true` / `false`.
    FormatBool,
    /// A local path is attached as multipart data and referenced by
    /// `attach://<wire_name>`; any other string is a remote file id.
    FileUpload,
    /// JSON-encode the value.
    Json,
}

impl SerializationStrategy {
    /// Picks the strategy for a resolved parameter descriptor.
    pub fn for_descriptor(descriptor: &TypeDescriptor) -> Self {
        match descriptor {
            TypeDescriptor::Scalar(ScalarKind::String) => Self::Direct,
            TypeDescriptor::Scalar(ScalarKind::Int64) => Self::FormatInt,
            TypeDescriptor::Scalar(ScalarKind::Float64) => Self::FormatFloat,
            TypeDescriptor::Scalar(ScalarKind::Bool) => Self::FormatBool,
            TypeDescriptor::ObjectRef(name) if name == FILE_UPLOAD_TYPE => Self::FileUpload,
            _ => Self::Json,
        }
    }
}

/// The parameter type a binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParamType {
    /// The resolved descriptor, rendered as-is.
    Plain,
    /// Any member of the reply-markup variant set.
    ReplyMarkup,
    /// A file upload value.
    FileUpload,
}

/// One classified method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    pub wire_name: String,
    /// lowerCamel for signature parameters, UpperCamel for options fields.
    pub binding_name: String,
    pub descriptor: TypeDescriptor,
    pub required: bool,
    pub strategy: SerializationStrategy,
    pub param_type: ParamType,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Returns true when `types` lists exactly the reply-markup variants.
///
/// Order does not matter; duplicates are ignored.
pub fn is_reply_markup_set(types: &[String]) -> bool {
    let listed: BTreeSet<&str> = types.iter().map(String::as_str).collect();
    let markup: BTreeSet<&str> = MARKUP_VARIANTS.into_iter().collect();
    listed == markup
}

/// Classifies one method parameter.
///
/// Every alternative is resolved so array usage is registered. A parameter
/// accepting exactly the reply-markup variants binds to the shared markup
/// type and is JSON-encoded; any other parameter binds to its first
/// alternative.
///
/// ## Errors
///
/// - `GeneratorError::UnresolvableType` if any alternative is unknown
/// - `GeneratorError::AssumptionViolation` if the parameter lists no types
pub fn classify_parameter(
    ctx: &mut CompilationContext,
    field: &SchemaField,
) -> Result<ResolvedField, GeneratorError> {
    let mut resolved = Vec::with_capacity(field.types.len());
    for token in &field.types {
        resolved.push(resolve_binding_type(ctx, token)?);
    }

    let Some(descriptor) = resolved.into_iter().next() else {
        return Err(GeneratorError::assumption(
            &field.name,
            "parameter lists no type alternatives",
        ));
    };

    let (param_type, strategy) = if field.types.len() > 1 && is_reply_markup_set(&field.types) {
        (ParamType::ReplyMarkup, SerializationStrategy::Json)
    } else {
        let strategy = SerializationStrategy::for_descriptor(&descriptor);
        let param_type = if strategy == SerializationStrategy::FileUpload {
            ParamType::FileUpload
        } else {
            ParamType::Plain
        };
        (param_type, strategy)
    };

    let binding_name = if field.required {
        lower_camel(&field.name)
    } else {
        upper_camel(&field.name)
    };

    Ok(ResolvedField {
        wire_name: field.name.clone(),
        binding_name,
        descriptor,
        required: field.required,
        strategy,
        param_type,
        description: field.description.clone(),
    })
}
