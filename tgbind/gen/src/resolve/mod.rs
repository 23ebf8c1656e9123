//! Schema resolution and binding synthesis.
//!
//! Everything here is emitter-agnostic: the output is a [`BindingSet`] of
//! decision records that a code emitter only has to substitute into target
//! syntax.

pub mod compile;
pub mod context;
pub mod declarations;
pub mod fields;
pub mod inheritance;
pub mod methods;
pub mod returns;
pub mod types;

pub use compile::{BindingMetadata, BindingSet, compile};
pub use context::CompilationContext;
pub use declarations::{DeclarationKind, DeclaredField, MARKUP_VARIANTS, TypeBinding};
pub use fields::{ParamType, ResolvedField, SerializationStrategy};
pub use inheritance::INTEGER_ONLY_FIELDS;
pub use methods::{MethodBinding, OptionsContainer, ParamStatement, Signature};
pub use returns::{Decode, ReturnBinding, ZeroValue};
pub use types::{FILE_UPLOAD_TYPE, FieldType, ScalarKind, TypeDescriptor};
