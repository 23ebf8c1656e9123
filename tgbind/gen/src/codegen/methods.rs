//! Method binding generation.
//!
//! Each method becomes an async fn on `Bot`. Required parameters are fn
//! arguments; optional ones live in a per-method `Opts` struct passed as a
//! trailing `Option<&...Opts>`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::render::{
    array_helper_ident, array_of_array_helper_ident, doc_attr, doc_line, field_ident, method_ident,
    option_field_type, owned_type, param_type,
};
use crate::resolve::{
    Decode, MethodBinding, OptionsContainer, ParamStatement, SerializationStrategy,
};

/// Methods with more fn arguments than this carry a clippy allowance.
const MAX_PLAIN_ARGUMENTS: usize = 7;

/// Generates the options struct of a method.
///
/// Every field is an `Option`, so "supplied" is `Some`.
pub fn generate_options_struct(method: &str, container: &OptionsContainer) -> TokenStream {
    let name = format_ident!("{}", container.name);
    let doc = doc_line(&format!("Optional parameters of `{method}`."));

    let fields = container.fields.iter().map(|field| {
        let ident = field_ident(&field.wire_name);
        let ty = option_field_type(field);
        let field_doc = doc_attr(std::slice::from_ref(&field.description));
        quote! {
            #field_doc
            pub #ident: Option<#ty>,
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default)]
        pub struct #name {
            #(#fields)*
        }
    }
}

/// Renders the value expression a statement inserts into the parameters.
fn statement_value(statement: &ParamStatement, source: TokenStream) -> TokenStream {
    let wire = &statement.wire_name;
    match statement.strategy {
        SerializationStrategy::Direct
        | SerializationStrategy::FormatInt
        | SerializationStrategy::FormatFloat
        | SerializationStrategy::FormatBool => quote! { #source.to_string() },
        SerializationStrategy::FileUpload => quote! { #source.stage(#wire, &mut files)? },
        SerializationStrategy::Json => quote! { serde_json::to_string(#source)? },
    }
}

fn required_statement(statement: &ParamStatement) -> TokenStream {
    let wire = &statement.wire_name;
    let ident = field_ident(&statement.wire_name);
    let value = statement_value(statement, quote! { #ident });
    quote! {
        params.insert(#wire.to_string(), #value);
    }
}

fn optional_statement(statement: &ParamStatement) -> TokenStream {
    let wire = &statement.wire_name;
    let ident = field_ident(&statement.wire_name);
    let value = statement_value(statement, quote! { value });
    quote! {
        if let Some(value) = &opts.#ident {
            params.insert(#wire.to_string(), #value);
        }
    }
}

/// Wraps the optional statements in the "options supplied" guard. A lone
/// statement joins the guard as a let chain.
fn optional_block(statements: &[ParamStatement]) -> TokenStream {
    if let [statement] = statements {
        let wire = &statement.wire_name;
        let ident = field_ident(&statement.wire_name);
        let value = statement_value(statement, quote! { value });
        return quote! {
            if let Some(opts) = opts
                && let Some(value) = &opts.#ident
            {
                params.insert(#wire.to_string(), #value);
            }
        };
    }

    let statements = statements.iter().map(optional_statement);
    quote! {
        if let Some(opts) = opts {
            #(#statements)*
        }
    }
}

fn decode_result(decode: &Decode) -> TokenStream {
    match decode {
        Decode::Generic(_) => quote! { Ok(serde_json::from_value(result)?) },
        Decode::ArrayHelper(element) => {
            let helper = array_helper_ident(element);
            quote! { Ok(#helper(result)?) }
        }
        Decode::ArrayOfArrayHelper(element) => {
            let helper = array_of_array_helper_ident(element);
            quote! { Ok(#helper(result)?) }
        }
    }
}

/// Generates the binding of one method, including its options struct.
///
/// ## Examples
///
/// ```ignore
/// pub async fn send_photo(
///     &self,
///     chat_id: i64,
///     photo: &InputFile,
///     opts: Option<&SendPhotoOpts>,
/// ) -> Result<Message, BotError> {
///     let mut params = Params::new();
///     let mut files: Vec<Attachment> = Vec::new();
///     params.insert("chat_id".to_string(), chat_id.to_string());
///     params.insert("photo".to_string(), photo.stage("photo", &mut files)?);
///     if let Some(opts) = opts {
///         if let Some(value) = &opts.caption {
///             params.insert("caption".to_string(), value.to_string());
///         }
///     }
///     let result = self.request_with_files("sendPhoto", params, files).await?;
///     Ok(serde_json::from_value(result)?)
/// }
/// ```
pub fn generate_method(binding: &MethodBinding) -> TokenStream {
    let fn_name = method_ident(&binding.name);
    let wire_name = &binding.name;
    let doc = doc_attr(&binding.description);
    let return_type = owned_type(&binding.returns.descriptor);

    let mut args: Vec<TokenStream> = binding
        .signature
        .params
        .iter()
        .map(|param| {
            let ident = field_ident(&param.wire_name);
            let ty = param_type(param);
            quote! { #ident: #ty }
        })
        .collect();
    if let Some(container) = &binding.signature.options_param {
        let container = format_ident!("{}", container);
        args.push(quote! { opts: Option<&#container> });
    }

    let lint = if args.len() > MAX_PLAIN_ARGUMENTS {
        quote! { #[allow(clippy::too_many_arguments)] }
    } else {
        TokenStream::new()
    };

    let has_params =
        !binding.required_statements.is_empty() || binding.optional_statements.is_some();
    let uploads = binding.has_file_upload();

    let params_decl = if has_params {
        quote! { let mut params = Params::new(); }
    } else {
        quote! { let params = Params::new(); }
    };
    let files_decl = if uploads {
        quote! { let mut files: Vec<Attachment> = Vec::new(); }
    } else {
        TokenStream::new()
    };

    let required: Vec<TokenStream> = binding
        .required_statements
        .iter()
        .map(required_statement)
        .collect();
    let optional = match &binding.optional_statements {
        Some(statements) => optional_block(statements),
        None => TokenStream::new(),
    };

    let call = if uploads {
        quote! { self.request_with_files(#wire_name, params, files).await? }
    } else {
        quote! { self.request(#wire_name, params).await? }
    };
    let decode = decode_result(&binding.returns.decode);

    let options_struct = match &binding.options {
        Some(container) => generate_options_struct(wire_name, container),
        None => TokenStream::new(),
    };

    quote! {
        #options_struct

        impl Bot {
            #doc
            #lint
            pub async fn #fn_name(&self, #(#args),*) -> Result<#return_type, BotError> {
                #params_decl
                #files_decl
                #(#required)*
                #optional
                let result = #call;
                #decode
            }
        }
    }
}
