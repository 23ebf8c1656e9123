//! Error types for schema loading.

use thiserror::Error;

/// Errors that can occur while retrieving or parsing a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a schema file from disk
    #[error("Failed to read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is not valid JSON for the expected layout
    #[error("Failed to parse schema document: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP request for the schema failed
    #[error("Schema request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The schema server answered with a non-success status
    #[error("Schema request to '{url}' returned status {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// HTTP status code from the response.
        status: u16,
    },
}
