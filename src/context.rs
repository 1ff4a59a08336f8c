//! Shared inputs of every render call

use image::RgbaImage;
use std::sync::Arc;

use crate::assets::AssetSource;
use crate::config::{LayoutDocument, Settings};
use crate::error::{RenderError, Result};
use crate::text::{Font, FontProvider};

/// Everything a renderer reads besides the item being drawn.
///
/// The context is read-only and cheap to copy, so several pages can be
/// rendered from one context on different threads. Each render call owns
/// its output buffer.
///
/// # Example
///
/// ```ignore
/// use fleetdraw::{RenderContext, assets::AssetDirectory, text::FontLibrary};
///
/// let assets = AssetDirectory::new("assets");
/// let fonts = FontLibrary::new("fonts");
/// let ctx = RenderContext::new(&layout, &settings, &fonts, &assets);
/// let png = fleetdraw::card::render_card(&ctx, &item, &owners)?;
/// ```
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub layout: &'a LayoutDocument,
    pub settings: &'a Settings,
    pub fonts: &'a dyn FontProvider,
    pub assets: &'a dyn AssetSource,
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext").field("settings", self.settings).finish_non_exhaustive()
    }
}

impl<'a> RenderContext<'a> {
    pub fn new(
        layout: &'a LayoutDocument,
        settings: &'a Settings,
        fonts: &'a dyn FontProvider,
        assets: &'a dyn AssetSource,
    ) -> Self {
        Self { layout, settings, fonts, assets }
    }

    /// Backdrop image of a rarity tier. Tier 1 is the first listed backdrop.
    pub fn backdrop(&self, rarity: u32) -> Result<Arc<RgbaImage>> {
        let backdrops = &self.layout.assets.rarity_backdrops;
        let name = (rarity as usize)
            .checked_sub(1)
            .and_then(|i| backdrops.get(i))
            .ok_or_else(|| RenderError::Layout(format!("no backdrop for rarity {rarity}")))?;
        self.asset(name)
    }

    pub fn asset(&self, name: &str) -> Result<Arc<RgbaImage>> {
        Ok(self.assets.image(name)?)
    }

    pub fn font(&self, name: &str, size: f32) -> Result<Font> {
        self.fonts.font(name, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_assets, sample_layout, BlockFonts};

    #[test]
    fn test_backdrop_by_rarity() {
        let layout = sample_layout();
        let settings = Settings::default();
        let assets = sample_assets();
        let ctx = RenderContext::new(&layout, &settings, &BlockFonts, &assets);

        assert_eq!(ctx.backdrop(1).unwrap().dimensions(), (200, 300));
        assert_eq!(ctx.backdrop(3).unwrap().dimensions(), (200, 300));
    }

    #[test]
    fn test_backdrop_out_of_range() {
        let layout = sample_layout();
        let settings = Settings::default();
        let assets = sample_assets();
        let ctx = RenderContext::new(&layout, &settings, &BlockFonts, &assets);

        assert!(matches!(ctx.backdrop(0), Err(RenderError::Layout(_))));
        assert!(matches!(ctx.backdrop(4), Err(RenderError::Layout(_))));
    }

    #[test]
    fn test_missing_asset_is_an_asset_error() {
        let layout = sample_layout();
        let settings = Settings::default();
        let assets = crate::assets::MemoryAssets::new();
        let ctx = RenderContext::new(&layout, &settings, &BlockFonts, &assets);
        assert!(matches!(ctx.backdrop(1), Err(RenderError::Asset(_))));
    }
}
