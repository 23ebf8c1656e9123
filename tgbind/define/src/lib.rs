//! tgbind Schema Library
//!
//! This crate provides the types of the Bot API schema document and the
//! loader that retrieves it. The document is consumed by the `tgbind-gen`
//! crate, which resolves it into binding decision records and emits Rust
//! client code.
//!
//! ## Core Types
//!
//! - [`SchemaDocument`] - The complete document: `types` and `methods`
//! - [`SchemaType`] - An object type (union parent, leaf, or marker)
//! - [`SchemaField`] - A type field or method parameter with alternative type tokens
//! - [`SchemaMethod`] - A callable method with parameters and return alternatives
//! - [`SchemaSource`] - A file path or URL to load the document from
//!
//! ## Examples
//!
//! ```no_run
//! use tgbind_define::{SchemaSource, load_from_path};
//!
//! let doc = load_from_path(std::path::Path::new("api.json")).unwrap();
//! println!("{} types, {} methods", doc.types.len(), doc.methods.len());
//!
//! // Or, inside an async context:
//! // let doc = SchemaSource::default().load().await?;
//! # let _ = SchemaSource::default();
//! ```

pub mod error;
pub mod loader;
pub mod schema;

pub use error::LoadError;
pub use loader::{DEFAULT_SCHEMA_URL, SchemaSource, fetch_schema, load_from_path, parse_document};
pub use schema::{MethodTable, SchemaDocument, SchemaField, SchemaMethod, SchemaType, TypeTable};
