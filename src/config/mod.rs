//! Layout documents and engine settings
//!
//! Provides the typed layout schema, JSON/TOML loading and the process-wide
//! layout cache.

pub mod cache;
pub mod loader;
pub mod schema;

pub use cache::cached_layout;
pub use loader::{load_layout, load_settings, parse_layout, ConfigError, DocumentFormat};
pub use schema::*;
