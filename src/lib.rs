//! Fleetdraw - layout-driven image composition for a fleet-collecting game
//!
//! This library provides functionality to:
//! - Load layout documents (JSON or TOML) and engine settings
//! - Render paginated inventory grids, item cards, birthday portraits and
//!   sortie maps from plain game-state views
//! - Fit outlined text into fixed boxes and feather artwork edges
//! - Encode the result as PNG

pub mod assets;
pub mod blend;
pub mod card;
pub mod cli;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod grid;
pub mod map;
pub mod models;
pub mod output;
pub mod scene;
pub mod shapes;
pub mod text;

#[cfg(test)]
pub(crate) mod testutil;

pub use context::RenderContext;
pub use error::{RenderError, Result};
