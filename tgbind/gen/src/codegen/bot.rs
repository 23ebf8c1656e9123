//! Runtime support for generated bindings.
//!
//! Generates the `bot` module of the output crate: the `Bot` client with its
//! request methods, the `BotError` type, the `InputFile` upload type, and the
//! `Params` alias every binding fills in.

use proc_macro2::TokenStream;
use quote::quote;

/// Default API endpoint for generated clients.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Generates the `Params` alias and the `Attachment` record.
pub fn generate_params_type() -> TokenStream {
    quote! {
        /// Form parameters of one request, keyed by wire name.
        pub type Params = HashMap<String, String>;

        /// A file staged for multipart upload.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Attachment {
            /// Multipart field name; referenced as `attach://<field>`.
            pub field: String,
            pub file_name: String,
            pub data: Vec<u8>,
        }
    }
}

/// Generates the `BotError` enum for runtime errors.
///
/// - `Http`: transport failures
/// - `Serialization`: JSON encoding or decoding failures
/// - `Io`: a local upload could not be read
/// - `Api`: the service answered with `ok: false`
/// - `UnsupportedInputFile`: an upload value that is neither a readable file
///   nor a remote file id
pub fn generate_error_type() -> TokenStream {
    quote! {
        /// Errors that can occur when calling the Bot API.
        #[derive(Debug, thiserror::Error)]
        pub enum BotError {
            /// HTTP request failed (network error, timeout, etc.).
            #[error("HTTP request failed: {0}")]
            Http(#[from] reqwest::Error),

            /// Failed to encode a parameter or decode a result.
            #[error("JSON serialization failed: {0}")]
            Serialization(#[from] serde_json::Error),

            /// Failed to read a local file staged for upload.
            #[error("Failed to read upload '{path}': {source}")]
            Io {
                path: String,
                #[source]
                source: std::io::Error,
            },

            /// The API rejected the call.
            #[error("API error {code}: {description}")]
            Api {
                /// `error_code` from the response envelope.
                code: i64,
                description: String,
            },

            /// An upload value of a shape the API cannot take.
            #[error("Unsupported input file for parameter '{0}'")]
            UnsupportedInputFile(String),
        }
    }
}

/// Generates the `InputFile` type.
///
/// A text value naming an existing local path is uploaded; any other text is
/// passed through as a remote file id or URL. In-memory contents are always
/// uploaded.
pub fn generate_input_file() -> TokenStream {
    quote! {
        /// A file parameter: a local path, a remote file id, or raw bytes.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum InputFile {
            /// A local path if one exists, otherwise a file id or URL.
            Text(String),
            /// In-memory contents uploaded under `name`.
            Memory { name: String, data: Vec<u8> },
        }

        impl InputFile {
            /// Resolves the value sent for parameter `field`, staging local
            /// contents into `files`.
            ///
            /// ## Errors
            ///
            /// Returns `BotError::UnsupportedInputFile` for a path that exists
            /// but is not a regular file, and `BotError::Io` if the file cannot
            /// be read.
            pub fn stage(
                &self,
                field: &str,
                files: &mut Vec<Attachment>,
            ) -> Result<String, BotError> {
                match self {
                    Self::Text(value) => {
                        let path = Path::new(value);
                        if !path.exists() {
                            return Ok(value.clone());
                        }
                        if !path.is_file() {
                            return Err(BotError::UnsupportedInputFile(field.to_string()));
                        }
                        let data = std::fs::read(path).map_err(|source| BotError::Io {
                            path: value.clone(),
                            source,
                        })?;
                        let file_name = path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| field.to_string());
                        files.push(Attachment {
                            field: field.to_string(),
                            file_name,
                            data,
                        });
                    }
                    Self::Memory { name, data } => {
                        files.push(Attachment {
                            field: field.to_string(),
                            file_name: name.clone(),
                            data: data.clone(),
                        });
                    }
                }
                Ok(format!("attach://{field}"))
            }
        }

        impl From<&str> for InputFile {
            fn from(value: &str) -> Self {
                Self::Text(value.to_string())
            }
        }

        impl From<String> for InputFile {
            fn from(value: String) -> Self {
                Self::Text(value)
            }
        }

        impl From<&Path> for InputFile {
            fn from(path: &Path) -> Self {
                Self::Text(path.to_string_lossy().into_owned())
            }
        }
    }
}

/// Generates the `Bot` client struct with its constructors.
pub fn generate_bot_struct() -> TokenStream {
    quote! {
        /// Bot API client.
        #[derive(Debug, Clone)]
        pub struct Bot {
            client: reqwest::Client,
            token: String,
            base_url: String,
        }

        impl Bot {
            /// Default API endpoint.
            pub const BASE_URL: &str = #DEFAULT_API_URL;

            /// Creates a client for `token` against the default endpoint.
            pub fn new(token: impl Into<String>) -> Self {
                Self::with_base_url(token, Self::BASE_URL)
            }

            /// Creates a client against a custom endpoint, such as a local
            /// Bot API server.
            pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
                Self {
                    client: reqwest::Client::new(),
                    token: token.into(),
                    base_url: base_url.into(),
                }
            }

            pub fn token(&self) -> &str {
                &self.token
            }
        }
    }
}

/// Generates the request methods on `Bot`.
///
/// Both post to `{base_url}/bot{token}/{method}` and unwrap the response
/// envelope (`ok`, `result`, `error_code`, `description`). A call without
/// attachments is sent as a url-encoded form; otherwise every parameter and
/// attachment goes into one multipart form.
pub fn generate_request_methods() -> TokenStream {
    quote! {
        #[derive(Debug, Deserialize)]
        struct Envelope {
            ok: bool,
            #[serde(default)]
            result: Option<serde_json::Value>,
            #[serde(default)]
            error_code: Option<i64>,
            #[serde(default)]
            description: Option<String>,
        }

        impl Bot {
            /// Calls `method` with form parameters and returns the raw result.
            ///
            /// ## Errors
            ///
            /// Returns an error if:
            /// - The HTTP request fails
            /// - The response is not a JSON envelope
            /// - The envelope reports `ok: false`
            pub async fn request(
                &self,
                method: &str,
                params: Params,
            ) -> Result<serde_json::Value, BotError> {
                self.request_with_files(method, params, Vec::new()).await
            }

            /// Calls `method`, uploading `files` alongside the parameters.
            ///
            /// ## Errors
            ///
            /// Same as [`Bot::request`].
            pub async fn request_with_files(
                &self,
                method: &str,
                params: Params,
                files: Vec<Attachment>,
            ) -> Result<serde_json::Value, BotError> {
                let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

                let builder = if files.is_empty() {
                    self.client.post(&url).form(&params)
                } else {
                    let mut form = reqwest::multipart::Form::new();
                    for (key, value) in params {
                        form = form.text(key, value);
                    }
                    for file in files {
                        let part =
                            reqwest::multipart::Part::bytes(file.data).file_name(file.file_name);
                        form = form.part(file.field, part);
                    }
                    self.client.post(&url).multipart(form)
                };

                let envelope: Envelope = builder.send().await?.json().await?;
                if !envelope.ok {
                    return Err(BotError::Api {
                        code: envelope.error_code.unwrap_or_default(),
                        description: envelope.description.unwrap_or_default(),
                    });
                }

                Ok(envelope.result.unwrap_or(serde_json::Value::Null))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::validate_code;
    use crate::test_utils::format_tokens;

    #[test]
    fn error_type_is_valid() {
        let tokens = generate_error_type();
        assert!(validate_code(&tokens).is_ok());
        let code = format_tokens(tokens);
        assert!(code.contains("pub enum BotError"));
        assert!(code.contains("reqwest::Error"));
        assert!(code.contains("UnsupportedInputFile(String)"));
    }

    #[test]
    fn input_file_stages_uploads() {
        let code = format_tokens(generate_input_file());
        assert!(code.contains("pub enum InputFile"));
        assert!(code.contains("Ok(format!(\"attach://{field}\"))"));
        assert!(code.contains("BotError::UnsupportedInputFile"));
    }

    #[test]
    fn bot_struct_has_constructors() {
        let code = format_tokens(generate_bot_struct());
        assert!(code.contains("pub struct Bot"));
        assert!(code.contains("pub const BASE_URL: &str = \"https://api.telegram.org\";"));
        assert!(code.contains("pub fn with_base_url("));
    }

    #[test]
    fn request_methods_unwrap_envelope() {
        let code = format_tokens(generate_request_methods());
        assert!(code.contains("pub async fn request("));
        assert!(code.contains("pub async fn request_with_files("));
        assert!(code.contains(".multipart(form)"));
        assert!(code.contains("return Err(BotError::Api {"));
    }

    #[test]
    fn params_type() {
        let code = format_tokens(generate_params_type());
        assert!(code.contains("pub type Params = HashMap<String, String>;"));
        assert!(code.contains("pub struct Attachment"));
    }
}
