//! tgbind code generator library.
//!
//! This crate turns a Bot API schema document (loaded with `tgbind-define`)
//! into client bindings. Generation runs in two phases:
//!
//! 1. **Resolve** ([`resolve`]): every schema type and method is compiled
//!    into a language-neutral decision record. Type tokens are resolved,
//!    union parents are flattened, parameters are classified, and return
//!    decoding is chosen.
//! 2. **Emit** ([`codegen`], [`output`]): the records are rendered as a Rust
//!    crate, or dumped as JSON for other emitters.
//!
//! ## Modules
//!
//! - [`resolve`] - Type resolution, inheritance glue, and the compiler
//! - [`validation`] - Document checks run before resolution
//! - [`codegen`] - Token generation for each component of the output crate
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for the output crate
//! - [`naming`] - Identifier case conversions
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use tgbind_define::load_from_path;
//! use tgbind_gen::output::generate_and_write;
//! use tgbind_gen::resolve::compile;
//!
//! let doc = load_from_path(Path::new("api.json")).unwrap();
//! let bindings = compile(Some(&doc)).unwrap();
//!
//! // Print the generated code instead of writing it
//! let methods = generate_and_write(&bindings, Path::new("bindings/src"), true).unwrap();
//! println!("{}", methods);
//! ```
//!
//! ## Generated Code Structure
//!
//! ```text
//! // types.rs
//! pub struct User { pub id: i64, ... }
//! pub enum ReplyMarkup { InlineKeyboardMarkup(..), ... }
//! pub trait ChatMemberVariant: Serialize { fn to_chat_member(&self) -> ... }
//! pub fn unmarshal_update_array(value: serde_json::Value) -> ...
//!
//! // methods.rs
//! pub struct SendPhotoOpts { pub caption: Option<String>, ... }
//! impl Bot {
//!     pub async fn send_photo(&self, chat_id: i64, photo: &InputFile,
//!         opts: Option<&SendPhotoOpts>) -> Result<Message, BotError>;
//! }
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod errors;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use errors::GeneratorError;
pub use resolve::{BindingSet, compile};
