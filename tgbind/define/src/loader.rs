//! Schema retrieval.
//!
//! A schema comes either from a local JSON file or from an HTTP URL. The
//! loader does no structural validation beyond deserializing the document;
//! the generator checks the assumptions it relies on separately.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::schema::SchemaDocument;

/// Community-maintained JSON rendering of the Bot API documentation.
pub const DEFAULT_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/PaulSonOfLars/telegram-bot-api-spec/main/api.json";

/// Where a schema document is read from.
///
/// ## Examples
///
/// ```
/// use std::path::PathBuf;
/// use tgbind_define::SchemaSource;
///
/// assert_eq!(
///     SchemaSource::parse("https://example.com/api.json"),
///     SchemaSource::Url("https://example.com/api.json".to_string())
/// );
/// assert_eq!(
///     SchemaSource::parse("schema/api.json"),
///     SchemaSource::Path(PathBuf::from("schema/api.json"))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Url(String),
    Path(PathBuf),
}

impl SchemaSource {
    /// Treats `http://` and `https://` values as URLs and anything else as a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }

    /// Retrieves and parses the document.
    ///
    /// ## Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read, the request fails,
    /// or the body is not a schema document.
    pub async fn load(&self) -> Result<SchemaDocument, LoadError> {
        match self {
            Self::Url(url) => fetch_schema(url).await,
            Self::Path(path) => load_from_path(path),
        }
    }
}

impl Default for SchemaSource {
    fn default() -> Self {
        Self::Url(DEFAULT_SCHEMA_URL.to_string())
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parses a schema document from JSON text.
///
/// ## Errors
///
/// Returns `LoadError::Parse` if the text is not a schema document.
pub fn parse_document(source: &str) -> Result<SchemaDocument, LoadError> {
    serde_json::from_str(source).map_err(|source| LoadError::Parse { source })
}

/// Reads a schema document from a local file.
///
/// ## Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or
/// `LoadError::Parse` if its content is not a schema document.
pub fn load_from_path(path: &Path) -> Result<SchemaDocument, LoadError> {
    tracing::debug!("Reading schema from {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let doc = parse_document(&source)?;
    tracing::info!(
        types = doc.types.len(),
        methods = doc.methods.len(),
        "Loaded schema from {}",
        path.display()
    );
    Ok(doc)
}

/// Fetches a schema document over HTTP.
///
/// ## Errors
///
/// Returns `LoadError::Http` on transport failures, `LoadError::Status` on a
/// non-success response, or `LoadError::Parse` for a malformed body.
pub async fn fetch_schema(url: &str) -> Result<SchemaDocument, LoadError> {
    tracing::debug!("Fetching schema from {}", url);
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await?;
    let doc = parse_document(&body)?;
    tracing::info!(
        types = doc.types.len(),
        methods = doc.methods.len(),
        "Fetched schema from {}",
        url
    );
    Ok(doc)
}
