//! Cargo.toml generation for the bindings crate.
//!
//! The generated sources need `reqwest` (with multipart uploads), `serde`,
//! `serde_json` and `thiserror`; `tokio` comes along for callers driving the
//! async bindings.

use std::path::Path;

use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Default package name of the generated crate.
pub const DEFAULT_PACKAGE_NAME: &str = "tgbind-bindings";

/// Renders the manifest of the bindings crate.
///
/// ## Examples
///
/// ```
/// use tgbind_gen::cargo_gen::generate_cargo_toml;
///
/// let toml = generate_cargo_toml("my-bot-api");
/// assert!(toml.contains("name = \"my-bot-api\""));
/// assert!(toml.contains("multipart"));
/// ```
pub fn generate_cargo_toml(package_name: &str) -> String {
    format!(
        r#"[package]
name = "{package_name}"
version = "0.1.0"
edition = "2024"
description = "Generated Telegram Bot API client bindings"

# This file was automatically generated by tgbind.
# Do not edit manually - changes will be overwritten.

[dependencies]
reqwest = {{ version = "0.12", default-features = false, features = ["json", "multipart", "rustls-tls"] }}
serde = {{ version = "1.0", features = ["derive"] }}
serde_json = "1.0"
thiserror = "2.0"
tokio = {{ version = "1.48", features = ["rt", "macros"] }}

[dev-dependencies]
wiremock = "0.6"
"#
    )
}

/// Writes `Cargo.toml` into `crate_dir` (the parent of the generated `src/`).
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    crate_dir: &Path,
    package_name: &str,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    let content = generate_cargo_toml(package_name);
    let path = crate_dir.join("Cargo.toml");

    if dry_run {
        println!("=== {} ===\n{}\n", path.display(), content);
    } else {
        write_atomic(&path, &content)?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(content)
}
