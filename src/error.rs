//! Error type shared by every render entry point

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;

/// Failure of a single render call.
///
/// Errors never leave partial output behind: the raster buffer of the failed
/// call is dropped with it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Layout or settings document could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Artwork or icon unavailable
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Font could not be loaded or parsed
    #[error("Font '{name}' unavailable: {reason}")]
    Font { name: String, reason: String },
    /// A lookup into the layout document found nothing usable
    #[error("Layout error: {0}")]
    Layout(String),
    /// A route points past the end of the node list
    #[error("Route from node {node} targets node {target}, but the graph has {len} nodes")]
    InvalidGraph { node: usize, target: usize, len: usize },
    /// PNG encoding failed
    #[error("Image error: {0}")]
    Encode(#[from] image::ImageError),
    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
