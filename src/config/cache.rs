//! Process-wide layout cache
//!
//! Layout documents are loaded at most once per path. Concurrent callers may
//! race to load the same path; the first insert wins and every later caller
//! observes that value. Entries are never evicted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use super::loader::{load_layout, ConfigError};
use super::schema::LayoutDocument;

fn layout_cache() -> &'static RwLock<HashMap<PathBuf, Arc<LayoutDocument>>> {
    static CACHE: OnceLock<RwLock<HashMap<PathBuf, Arc<LayoutDocument>>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Return the cached layout for `path`, loading it on first access.
///
/// A failed load is not cached; the next call retries.
pub fn cached_layout(path: &Path) -> Result<Arc<LayoutDocument>, ConfigError> {
    let key = path.to_path_buf();

    if let Some(doc) = layout_cache().read().unwrap_or_else(|e| e.into_inner()).get(&key) {
        return Ok(Arc::clone(doc));
    }

    let loaded = Arc::new(load_layout(path)?);
    let mut cache = layout_cache().write().unwrap_or_else(|e| e.into_inner());
    let entry = cache.entry(key).or_insert_with(|| {
        tracing::debug!(path = %path.display(), "caching layout document");
        loaded
    });
    Ok(Arc::clone(entry))
}

/// Whether `path` has already been loaded into the cache.
pub fn is_cached(path: &Path) -> bool {
    layout_cache().read().unwrap_or_else(|e| e.into_inner()).contains_key(path)
}
