//! Type token resolution.
//!
//! A type token is one of:
//!
//! - a schema scalar name (`String`, `Integer`, `Float`, `Boolean`)
//! - an object type name declared in the schema (`Message`)
//! - `Array of X`, where `X` is a scalar or object name
//! - `Array of Array of X`
//!
//! Resolving a token that wraps an object type records the element in the
//! [`CompilationContext`] so the emitter knows which unwrap helpers to produce.

use serde::Serialize;
use strum::{Display, EnumIter};

use super::context::CompilationContext;
use crate::errors::GeneratorError;

/// The schema type whose values are file uploads.
pub const FILE_UPLOAD_TYPE: &str = "InputFile";

const ARRAY_OF_ARRAY_PREFIX: &str = "Array of Array of ";
const ARRAY_PREFIX: &str = "Array of ";

/// Target scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    String,
    Int64,
    Float64,
    Bool,
}

impl ScalarKind {
    /// Maps a schema scalar name to its target kind.
    ///
    /// ## Examples
    ///
    /// ```
    /// use tgbind_gen::resolve::ScalarKind;
    ///
    /// assert_eq!(ScalarKind::from_schema_name("Integer"), Some(ScalarKind::Int64));
    /// assert_eq!(ScalarKind::from_schema_name("Message"), None);
    /// ```
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Integer" => Some(Self::Int64),
            "Float" | "Float number" => Some(Self::Float64),
            "Boolean" | "True" => Some(Self::Bool),
            _ => None,
        }
    }
}

/// A resolved type.
///
/// The element of `Array` and `ArrayOfArray` is always a `Scalar` or
/// `ObjectRef`; the resolver never nests arrays deeper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    ObjectRef(String),
    Array(Box<TypeDescriptor>),
    ArrayOfArray(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn object(name: impl Into<String>) -> Self {
        Self::ObjectRef(name.into())
    }

    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn array_of_array_of(element: TypeDescriptor) -> Self {
        Self::ArrayOfArray(Box::new(element))
    }

    /// Returns the innermost non-array descriptor.
    pub fn element(&self) -> &TypeDescriptor {
        match self {
            Self::Array(inner) | Self::ArrayOfArray(inner) => inner.element(),
            other => other,
        }
    }

    /// Returns the object name of the innermost element, if it is an object.
    pub fn element_object(&self) -> Option<&str> {
        match self.element() {
            Self::ObjectRef(name) => Some(name),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_scalar(&self, kind: ScalarKind) -> bool {
        self.scalar() == Some(kind)
    }

    /// Returns true when values of this type are (or contain) file uploads.
    pub fn is_file_upload(&self) -> bool {
        self.element_object() == Some(FILE_UPLOAD_TYPE)
    }
}

/// A type resolved for a field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldType {
    pub descriptor: TypeDescriptor,
    /// Object references in field position are single-owner pointers.
    pub indirect: bool,
}

/// Resolves a token for a field declaration.
///
/// ## Errors
///
/// Returns `GeneratorError::UnresolvableType` if the token (or its array
/// element) names neither a scalar nor a known type.
pub fn resolve_field_type(
    ctx: &mut CompilationContext,
    token: &str,
) -> Result<FieldType, GeneratorError> {
    let descriptor = resolve(ctx, token)?;
    let indirect = matches!(descriptor, TypeDescriptor::ObjectRef(_));
    Ok(FieldType {
        descriptor,
        indirect,
    })
}

/// Resolves a token for a method parameter or return position.
///
/// Registers array elements exactly like [`resolve_field_type`].
///
/// ## Errors
///
/// Returns `GeneratorError::UnresolvableType` if the token (or its array
/// element) names neither a scalar nor a known type.
pub fn resolve_binding_type(
    ctx: &mut CompilationContext,
    token: &str,
) -> Result<TypeDescriptor, GeneratorError> {
    resolve(ctx, token)
}

fn resolve(ctx: &mut CompilationContext, token: &str) -> Result<TypeDescriptor, GeneratorError> {
    if let Some(rest) = token.strip_prefix(ARRAY_OF_ARRAY_PREFIX) {
        let element = resolve_leaf(ctx, rest, token)?;
        if let TypeDescriptor::ObjectRef(name) = &element {
            ctx.register_array_of_array_element(name);
        }
        return Ok(TypeDescriptor::array_of_array_of(element));
    }

    if let Some(rest) = token.strip_prefix(ARRAY_PREFIX) {
        let element = resolve_leaf(ctx, rest, token)?;
        if let TypeDescriptor::ObjectRef(name) = &element {
            ctx.register_array_element(name);
        }
        return Ok(TypeDescriptor::array_of(element));
    }

    resolve_leaf(ctx, token, token)
}

fn resolve_leaf(
    ctx: &CompilationContext,
    name: &str,
    token: &str,
) -> Result<TypeDescriptor, GeneratorError> {
    if let Some(kind) = ScalarKind::from_schema_name(name) {
        return Ok(TypeDescriptor::Scalar(kind));
    }
    if ctx.is_known_type(name) {
        return Ok(TypeDescriptor::object(name));
    }
    Err(GeneratorError::UnresolvableType {
        token: token.to_string(),
    })
}
