//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all generated
//! pieces into complete Rust files, validating the output, formatting it, and
//! writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! bindings/src/
//! ├── lib.rs       # Module declarations and re-exports
//! ├── bot.rs       # Bot client, BotError, InputFile, Params
//! ├── types.rs     # Type declarations, ReplyMarkup, variant traits, helpers
//! └── methods.rs   # Opts structs and one async fn per method
//! ```
//!
//! The same [`BindingSet`] can instead be dumped as JSON records with
//! [`write_records`], for emitters targeting other languages.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::render::doc_line;
use crate::codegen::{
    generate_array_helpers, generate_bot_struct, generate_error_type, generate_input_file,
    generate_method, generate_params_type, generate_reply_markup, generate_request_methods,
    generate_type_declaration, generate_variant_trait,
};
use crate::errors::GeneratorError;
use crate::resolve::BindingSet;

/// Assembles the lib.rs content for the bindings crate.
pub fn assemble_lib_rs(set: &BindingSet) -> TokenStream {
    let summary = match &set.metadata.version {
        Some(version) => format!("Client bindings for the Telegram Bot API ({version})."),
        None => "Client bindings for the Telegram Bot API.".to_string(),
    };
    let summary = doc_line(&summary);
    let counts = doc_line(&format!(
        "Declares {} types and {} methods.",
        set.types.len(),
        set.methods.len()
    ));

    quote! {
        #![doc = #summary]
        #![doc = ""]
        #![doc = #counts]

        pub mod bot;
        pub mod methods;
        pub mod types;

        pub use bot::{Attachment, Bot, BotError, InputFile, Params};
        pub use types::*;
    }
}

/// Assembles the runtime module (bot.rs).
pub fn assemble_bot_module() -> TokenStream {
    let params_type = generate_params_type();
    let error_type = generate_error_type();
    let input_file = generate_input_file();
    let bot_struct = generate_bot_struct();
    let request_methods = generate_request_methods();

    quote! {
        //! Bot client and shared runtime types.

        use std::collections::HashMap;
        use std::path::Path;

        use serde::Deserialize;

        #params_type

        #error_type

        #input_file

        #bot_struct

        #request_methods
    }
}

/// Assembles the types module (types.rs).
///
/// Declarations come in document order, followed by the `ReplyMarkup` enum,
/// the capability trait of each union parent, and the unwrap helpers.
pub fn assemble_types_module(set: &BindingSet) -> TokenStream {
    let declarations: TokenStream = set.types.iter().map(generate_type_declaration).collect();
    let reply_markup = generate_reply_markup(&set.reply_markup_variants);

    let variant_traits: TokenStream = set
        .variant_parents()
        .map(|parent| {
            let subtypes: Vec<&str> = set
                .types
                .iter()
                .filter(|t| t.supertype.as_deref() == Some(parent.name.as_str()))
                .map(|t| t.name.as_str())
                .collect();
            generate_variant_trait(&parent.name, &subtypes)
        })
        .collect();

    let helpers = generate_array_helpers(&set.array_helpers, &set.array_of_array_helpers);

    quote! {
        //! Bot API object types.

        use serde::{Deserialize, Serialize};

        #declarations

        #reply_markup

        #variant_traits

        #helpers
    }
}

/// Assembles the methods module (methods.rs).
pub fn assemble_methods_module(set: &BindingSet) -> TokenStream {
    let upload_imports = if set.has_file_upload() {
        quote! { use crate::bot::{Attachment, InputFile}; }
    } else {
        TokenStream::new()
    };
    let type_imports = if set.types.is_empty() || set.methods.is_empty() {
        TokenStream::new()
    } else {
        quote! { use crate::types::*; }
    };
    let methods: TokenStream = set.methods.iter().map(generate_method).collect();

    quote! {
        //! Bot API method bindings.

        use crate::bot::{Bot, BotError, Params};
        #upload_imports
        #type_imports

        #methods
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Prepends an auto-generated notice as a regular comment, naming the schema
/// revision when it is known.
pub fn format_code(file: &syn::File, version: Option<&str>) -> String {
    let formatted = prettyplease::unparse(file);
    let source = match version {
        Some(version) => format!("// Schema revision: {}\n", version),
        None => String::new(),
    };
    format!(
        "// This code was automatically generated by tgbind. Do not edit manually.\n{}\n{}",
        source, formatted
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Renders every module of the bindings crate as `(file name, content)`.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if any module fails to parse.
pub fn render_modules(set: &BindingSet) -> Result<Vec<(String, String)>, GeneratorError> {
    let version = set.metadata.version.as_deref();
    let modules = [
        ("lib.rs", assemble_lib_rs(set)),
        ("bot.rs", assemble_bot_module()),
        ("types.rs", assemble_types_module(set)),
        ("methods.rs", assemble_methods_module(set)),
    ];

    modules
        .into_iter()
        .map(|(name, tokens)| {
            let file = validate_code(&tokens)?;
            Ok((name.to_string(), format_code(&file, version)))
        })
        .collect()
}

/// Generates and writes the bindings crate sources to `output_dir`.
///
/// ## Arguments
///
/// * `set` - The compiled bindings
/// * `output_dir` - The crate's `src/` directory
/// * `dry_run` - If true, print code instead of writing files
///
/// ## Returns
///
/// The formatted methods module (useful for dry-run mode or testing).
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    set: &BindingSet,
    output_dir: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let modules = render_modules(set)?;

    if dry_run {
        for (filename, content) in &modules {
            println!("=== {} ===\n{}\n", filename, content);
        }
    } else {
        for (filename, content) in &modules {
            write_atomic(&output_dir.join(filename), content)?;
        }
        tracing::info!(
            "Wrote {} modules to {}",
            modules.len(),
            output_dir.display()
        );
    }

    Ok(modules
        .into_iter()
        .find(|(name, _)| name == "methods.rs")
        .map(|(_, content)| content)
        .unwrap_or_default())
}

/// Serializes the binding records as pretty JSON and writes them to `path`.
///
/// ## Errors
///
/// Returns `GeneratorError::RecordsError` if serialization fails, or
/// `GeneratorError::WriteError` if the file cannot be written.
pub fn write_records(
    set: &BindingSet,
    path: &Path,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let json = serde_json::to_string_pretty(set)?;

    if dry_run {
        println!("=== {} ===\n{}\n", path.display(), json);
    } else {
        write_atomic(path, &json)?;
        tracing::info!("Wrote binding records to {}", path.display());
    }

    Ok(json)
}
