//! Method binding synthesis.

use serde::Serialize;
use tgbind_define::SchemaMethod;

use super::context::CompilationContext;
use super::fields::{ResolvedField, SerializationStrategy, classify_parameter};
use super::returns::{ReturnBinding, resolve_return};
use crate::errors::GeneratorError;
use crate::naming::upper_camel;

/// The name of the trailing options parameter.
pub const OPTIONS_PARAM: &str = "opts";

/// Returns the options container name for a method (`sendPhoto` gives
/// `SendPhotoOpts`).
pub fn options_container_name(method: &str) -> String {
    format!("{}Opts", upper_camel(method))
}

/// The call signature of a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Required parameters in document order.
    pub params: Vec<ResolvedField>,
    /// Type of the trailing options parameter, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_param: Option<String>,
}

impl Signature {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.options_param.is_none()
    }
}

/// Synthetic aggregate holding a method's optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsContainer {
    pub name: String,
    pub fields: Vec<ResolvedField>,
}

/// One serialization statement of a binding body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamStatement {
    pub wire_name: String,
    /// Name the value is read from: a parameter or an options field.
    pub source: String,
    pub strategy: SerializationStrategy,
    /// Set for optional parameters: the statement only runs when the field
    /// was supplied.
    pub guarded: bool,
}

impl ParamStatement {
    fn for_field(field: &ResolvedField) -> Self {
        Self {
            wire_name: field.wire_name.clone(),
            source: field.binding_name.clone(),
            strategy: field.strategy,
            guarded: !field.required,
        }
    }
}

/// The resolved binding of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBinding {
    pub name: String,
    pub description: Vec<String>,
    pub signature: Signature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsContainer>,
    pub required_statements: Vec<ParamStatement>,
    /// Present iff the signature has an options parameter; all statements
    /// sit inside one "options supplied" guard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_statements: Option<Vec<ParamStatement>>,
    pub returns: ReturnBinding,
}

impl MethodBinding {
    /// Iterates every parameter: required ones, then optional ones.
    pub fn all_params(&self) -> impl Iterator<Item = &ResolvedField> {
        self.signature
            .params
            .iter()
            .chain(self.options.iter().flat_map(|opts| opts.fields.iter()))
    }

    /// Returns true when any parameter may carry a file upload.
    pub fn has_file_upload(&self) -> bool {
        self.all_params()
            .any(|p| p.strategy == SerializationStrategy::FileUpload)
    }
}

/// Synthesizes the binding of `method`.
///
/// Parameters are partitioned into required and optional, keeping document
/// order in each group. The options container and its trailing parameter
/// exist iff at least one parameter is optional.
///
/// ## Errors
///
/// - `GeneratorError::UnresolvableType` from any parameter or the return
/// - `GeneratorError::AssumptionViolation` if the method declares no return
pub fn synthesize_method(
    ctx: &mut CompilationContext,
    method: &SchemaMethod,
) -> Result<MethodBinding, GeneratorError> {
    let mut required = Vec::new();
    let mut optional = Vec::new();

    for field in method.fields() {
        let resolved = classify_parameter(ctx, field)?;
        if resolved.required {
            required.push(resolved);
        } else {
            optional.push(resolved);
        }
    }

    let returns = resolve_return(ctx, method)?;

    let required_statements = required.iter().map(ParamStatement::for_field).collect();

    let (options, optional_statements) = if optional.is_empty() {
        (None, None)
    } else {
        let statements = optional.iter().map(ParamStatement::for_field).collect();
        let container = OptionsContainer {
            name: options_container_name(&method.name),
            fields: optional,
        };
        (Some(container), Some(statements))
    };

    let signature = Signature {
        params: required,
        options_param: options.as_ref().map(|c| c.name.clone()),
    };

    tracing::debug!(
        "Resolved method {} ({} required, {} optional)",
        method.name,
        signature.params.len(),
        options.as_ref().map_or(0, |c| c.fields.len())
    );

    Ok(MethodBinding {
        name: method.name.clone(),
        description: method.description.clone(),
        signature,
        options,
        required_statements,
        optional_statements,
        returns,
    })
}
