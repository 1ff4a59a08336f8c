//! Font lookup and caching

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};

use super::typeface::{TrueTypeFace, Typeface};
use crate::error::RenderError;

/// Resolves a font reference from a layout document to a typeface.
pub trait FontProvider: Send + Sync {
    fn face(&self, name: &str) -> Result<Arc<dyn Typeface>, RenderError>;

    /// Resolve `name` and pair it with a pixel size.
    fn font(&self, name: &str, size: f32) -> Result<Font, RenderError> {
        Ok(Font::new(self.face(name)?, size))
    }
}

/// A typeface at a fixed pixel size.
#[derive(Clone)]
pub struct Font {
    face: Arc<dyn Typeface>,
    size: f32,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("size", &self.size).finish_non_exhaustive()
    }
}

impl Font {
    pub fn new(face: Arc<dyn Typeface>, size: f32) -> Self {
        Self { face, size }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn face(&self) -> &dyn Typeface {
        self.face.as_ref()
    }
}

fn face_cache() -> &'static RwLock<HashMap<PathBuf, Arc<TrueTypeFace>>> {
    static CACHE: OnceLock<RwLock<HashMap<PathBuf, Arc<TrueTypeFace>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Font files under a directory, parsed once per process.
#[derive(Debug, Clone)]
pub struct FontLibrary {
    root: PathBuf,
}

impl FontLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FontProvider for FontLibrary {
    fn face(&self, name: &str) -> Result<Arc<dyn Typeface>, RenderError> {
        let path = self.root.join(name);

        if let Some(face) = face_cache().read().unwrap_or_else(|e| e.into_inner()).get(&path) {
            return Ok(Arc::clone(face) as Arc<dyn Typeface>);
        }

        let data = std::fs::read(&path)
            .map_err(|e| RenderError::Font { name: name.to_string(), reason: e.to_string() })?;
        let face = TrueTypeFace::from_bytes(data)
            .ok_or_else(|| RenderError::Font { name: name.to_string(), reason: "not a TrueType font".to_string() })?;
        tracing::debug!(path = %path.display(), "loaded font");

        let mut cache = face_cache().write().unwrap_or_else(|e| e.into_inner());
        let face = cache.entry(path).or_insert_with(|| Arc::new(face));
        Ok(Arc::clone(face) as Arc<dyn Typeface>)
    }
}
