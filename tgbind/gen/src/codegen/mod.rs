//! Code generation modules for tgbind.
//!
//! This module contains generators that render a [`BindingSet`] as Rust
//! source. Each submodule handles one component of the generated crate.
//!
//! ## Submodules
//!
//! - [`bot`] - The runtime: `Bot` client, `BotError`, `InputFile`, `Params`
//! - [`types`] - Type declarations, `ReplyMarkup`, capability traits, unwrap
//!   helpers
//! - [`methods`] - Per-method `Opts` structs and async bindings
//! - [`render`] - Identifier and type renderings shared by the above
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.
//!
//! [`BindingSet`]: crate::resolve::BindingSet

pub mod bot;
pub mod methods;
pub mod render;
pub mod types;

pub use bot::{
    DEFAULT_API_URL, generate_bot_struct, generate_error_type, generate_input_file,
    generate_params_type, generate_request_methods,
};
pub use methods::{generate_method, generate_options_struct};
pub use types::{
    generate_array_helpers, generate_reply_markup, generate_type_declaration,
    generate_variant_trait,
};
