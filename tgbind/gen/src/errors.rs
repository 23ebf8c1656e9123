//! Error types for the tgbind generator.

use thiserror::Error;
use tgbind_define::LoadError;

/// Errors that can occur during schema resolution and code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A type token names neither a scalar nor a type declared in the schema.
    ///
    /// Against a well-formed schema this never happens; it signals that the
    /// schema and the generator disagree about the type vocabulary.
    #[error("Unresolvable type token '{token}'")]
    UnresolvableType {
        /// The token as it appeared in the schema.
        token: String,
    },

    /// The schema breaks an assumption the generator relies on.
    #[error("Schema assumption violated by '{subject}': {reason}")]
    AssumptionViolation {
        /// The type, method, or field that broke the assumption.
        subject: String,
        /// What was expected.
        reason: String,
    },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to serialize binding records
    #[error("Failed to serialize binding records: {0}")]
    RecordsError(#[from] serde_json::Error),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load the schema document
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl GeneratorError {
    pub(crate) fn assumption(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssumptionViolation {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}
