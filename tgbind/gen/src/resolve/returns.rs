//! Return shape resolution.

use serde::Serialize;
use strum::Display;
use tgbind_define::SchemaMethod;

use super::context::CompilationContext;
use super::types::{ScalarKind, TypeDescriptor, resolve_binding_type};
use crate::errors::GeneratorError;

/// The value a binding returns on its error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZeroValue {
    False,
    EmptyString,
    Zero,
    /// The empty reference for any compound result.
    Null,
}

impl ZeroValue {
    pub fn for_descriptor(descriptor: &TypeDescriptor) -> Self {
        match descriptor.scalar() {
            Some(ScalarKind::Bool) => Self::False,
            Some(ScalarKind::String) => Self::EmptyString,
            Some(ScalarKind::Int64 | ScalarKind::Float64) => Self::Zero,
            None => Self::Null,
        }
    }
}

/// How a response body is decoded into the return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", content = "target", rename_all = "snake_case")]
pub enum Decode {
    /// Decode the body straight into the resolved type.
    Generic(TypeDescriptor),
    /// Call the array unwrap helper for this element.
    ArrayHelper(String),
    /// Call the array-of-array unwrap helper for this element.
    ArrayOfArrayHelper(String),
}

/// The resolved return shape of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnBinding {
    pub descriptor: TypeDescriptor,
    pub zero_value: ZeroValue,
    pub decode: Decode,
}

/// Resolves the first return alternative of `method`.
///
/// Resolution registers array elements before the helper check, so an array
/// return selects its helper even when no other declaration uses the element.
///
/// ## Errors
///
/// - `GeneratorError::AssumptionViolation` if the method declares no return
/// - `GeneratorError::UnresolvableType` if the return token is unknown
pub fn resolve_return(
    ctx: &mut CompilationContext,
    method: &SchemaMethod,
) -> Result<ReturnBinding, GeneratorError> {
    let token = method
        .primary_return()
        .ok_or_else(|| GeneratorError::assumption(&method.name, "method declares no return type"))?;

    let descriptor = resolve_binding_type(ctx, token)?;

    let decode = match &descriptor {
        TypeDescriptor::Array(inner) => match inner.as_ref() {
            TypeDescriptor::ObjectRef(name) if ctx.needs_array_helper(name) => {
                Decode::ArrayHelper(name.clone())
            }
            _ => Decode::Generic(descriptor.clone()),
        },
        TypeDescriptor::ArrayOfArray(inner) => match inner.as_ref() {
            TypeDescriptor::ObjectRef(name) if ctx.needs_array_of_array_helper(name) => {
                Decode::ArrayOfArrayHelper(name.clone())
            }
            _ => Decode::Generic(descriptor.clone()),
        },
        _ => Decode::Generic(descriptor.clone()),
    };

    Ok(ReturnBinding {
        zero_value: ZeroValue::for_descriptor(&descriptor),
        descriptor,
        decode,
    })
}
