//! Layout and settings loading
//!
//! Documents are parsed by file extension: `.json` through serde_json and
//! `.toml` through toml. Layout documents are validated once here, so every
//! lookup made while rendering is infallible.

use super::schema::{LayoutDocument, Settings};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error
    #[error("Failed to parse JSON document: {0}")]
    ParseJson(#[from] serde_json::Error),
    /// TOML parsing error
    #[error("Failed to parse TOML document: {0}")]
    ParseToml(#[from] toml::de::Error),
    /// Neither `.json` nor `.toml`
    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error
    #[error("Layout validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }
}

fn parse_document<T: DeserializeOwned>(contents: &str, format: DocumentFormat) -> Result<T, ConfigError> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(contents)?,
        DocumentFormat::Toml => toml::from_str(contents)?,
    })
}

fn read_source(path: &Path) -> Result<(String, DocumentFormat), ConfigError> {
    let format =
        DocumentFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    Ok((contents, format))
}

/// Parse and validate a layout document from a string.
///
/// # Example
/// ```ignore
/// let doc = parse_layout(&fs::read_to_string("layout.json")?, DocumentFormat::Json)?;
/// assert!(doc.is_valid());
/// ```
pub fn parse_layout(contents: &str, format: DocumentFormat) -> Result<LayoutDocument, ConfigError> {
    let layout: LayoutDocument = parse_document(contents, format)?;

    let errors = layout.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(layout)
}

/// Load and validate a layout document from disk, bypassing the cache.
pub fn load_layout(path: &Path) -> Result<LayoutDocument, ConfigError> {
    let (contents, format) = read_source(path)?;
    let layout = parse_layout(&contents, format)?;

    tracing::info!(path = %path.display(), "loaded layout document");
    Ok(layout)
}

/// Load engine settings.
///
/// With no path, every feature toggle is off and the level caps take their
/// defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(p) => {
            let (contents, format) = read_source(p)?;
            parse_document(&contents, format)
        }
        None => Ok(Settings::default()),
    }
}
