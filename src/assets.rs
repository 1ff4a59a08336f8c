//! Decoded image assets
//!
//! Backdrops, icons and backgrounds are looked up by the file names listed in
//! the layout document. Decoded images are shared through `Arc` and must be
//! copied before any pixel edit.

use image::RgbaImage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};
use thiserror::Error;

/// Asset lookup failure
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset with this name
    #[error("Asset '{0}' not found")]
    NotFound(String),
    /// The asset exists but could not be decoded
    #[error("Failed to decode asset '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

/// A source of decoded images keyed by name.
pub trait AssetSource: Send + Sync {
    fn image(&self, name: &str) -> Result<Arc<RgbaImage>, AssetError>;
}

fn decoded_cache() -> &'static RwLock<HashMap<PathBuf, Arc<RgbaImage>>> {
    static CACHE: OnceLock<RwLock<HashMap<PathBuf, Arc<RgbaImage>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Images read from a directory on disk.
///
/// Decoded images go into a process-wide cache keyed by full path, so two
/// `AssetDirectory` values over the same root share entries. The first decode
/// to finish wins; entries are never evicted.
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for AssetDirectory {
    fn image(&self, name: &str) -> Result<Arc<RgbaImage>, AssetError> {
        let path = self.root.join(name);

        if let Some(img) = decoded_cache().read().unwrap_or_else(|e| e.into_inner()).get(&path) {
            return Ok(Arc::clone(img));
        }

        if !path.is_file() {
            return Err(AssetError::NotFound(name.to_string()));
        }
        tracing::debug!(path = %path.display(), "decoding asset");
        let decoded = image::open(&path)
            .map_err(|source| AssetError::Decode { name: name.to_string(), source })?
            .to_rgba8();

        let mut cache = decoded_cache().write().unwrap_or_else(|e| e.into_inner());
        Ok(Arc::clone(cache.entry(path).or_insert_with(|| Arc::new(decoded))))
    }
}

/// Images held in memory, for callers that resolve artwork themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<String, Arc<RgbaImage>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image. An existing entry under the same name is kept.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.entry(name.into()).or_insert_with(|| Arc::new(image));
    }

    pub fn with(mut self, name: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(name, image);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn image(&self, name: &str) -> Result<Arc<RgbaImage>, AssetError> {
        self.images.get(name).cloned().ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}
