//! Manifest loading from files and strings.
//!
//! Vendor manifests are plain JSON files whose top level must be an
//! object (the `package -> command -> definition` mapping). These helpers
//! only read and shape-check; all command-level validation happens in
//! [`CommandRegistry::load_commands`](crate::CommandRegistry::load_commands).
//!
//! # Examples
//!
//! ```
//! use device_commands_registry::parse_manifest;
//!
//! let manifest = parse_manifest(r#"{"light": {"on": {"parameters": {}}}}"#).unwrap();
//! assert!(manifest.get("light").is_some());
//! ```

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest is not valid JSON.
    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest parsed, but its top level is not a JSON object.
    #[error("manifest must be a JSON object")]
    ObjectExpected,
}

/// Reads and parses a manifest file.
///
/// # Errors
///
/// Returns [`ManifestError::Io`] if the file cannot be read,
/// [`ManifestError::Json`] if it is not valid JSON, and
/// [`ManifestError::ObjectExpected`] if the top level is not an object.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Value, ManifestError> {
    let json = std::fs::read_to_string(path)?;
    parse_manifest(&json)
}

/// Parses a manifest from a JSON string.
pub fn parse_manifest(json: &str) -> Result<Value, ManifestError> {
    let manifest: Value = serde_json::from_str(json)?;
    if !manifest.is_object() {
        return Err(ManifestError::ObjectExpected);
    }
    Ok(manifest)
}
