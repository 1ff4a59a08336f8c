//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fleetdraw::assets::MemoryAssets;
use fleetdraw::color::Rgb;
use fleetdraw::error::RenderError;
use fleetdraw::text::{FontProvider, Typeface};
use image::{Rgba, RgbaImage};

pub const EMPTY_A: Rgb = Rgb::new(240, 240, 240);
pub const EMPTY_B: Rgb = Rgb::new(220, 220, 220);
pub const BACKDROP: Rgb = Rgb::new(10, 120, 200);

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Solid boxes in place of glyphs: `size / 2` pixels per character, one
/// pixel of inset on every side.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxFace;

impl Typeface for BoxFace {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        ((size / 2.0) as u32 * text.chars().count() as u32, size as u32)
    }

    fn rasterize(&self, text: &str, size: f32, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) {
        let advance = (size / 2.0) as i32;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = origin.0 + i as i32 * advance;
            for y in (origin.1 + 1)..(origin.1 + size as i32 - 1) {
                for x in (left + 1)..(left + advance - 1) {
                    plot(x, y, 1.0);
                }
            }
        }
    }
}

/// Serves [`BoxFace`] for any font name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxFonts;

impl FontProvider for BoxFonts {
    fn face(&self, _name: &str) -> Result<Arc<dyn Typeface>, RenderError> {
        Ok(Arc::new(BoxFace))
    }
}

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Every image the fixture layouts and `scene.json` refer to.
pub fn fixture_images() -> Vec<(&'static str, RgbaImage)> {
    let [r, g, b] = BACKDROP.0;
    vec![
        ("bg_1.png", solid(200, 300, [r, g, b])),
        ("bg_2.png", solid(200, 300, [r, g, b])),
        ("bg_3.png", solid(200, 300, [r, g, b])),
        ("ring.png", solid(8, 8, [255, 255, 0])),
        ("bday_bg.png", solid(600, 800, [30, 30, 30])),
        ("map_bg.png", solid(40, 25, [0, 80, 0])),
        ("fuel.png", solid(4, 4, [0, 150, 0])),
        ("ammo.png", solid(4, 4, [150, 150, 0])),
        ("steel.png", solid(4, 4, [150, 150, 150])),
        ("bauxite.png", solid(4, 4, [200, 100, 0])),
        ("ship.png", solid(4, 4, [0, 0, 150])),
        ("rings.png", solid(4, 4, [255, 0, 255])),
        ("art_full.png", solid(40, 80, [255, 0, 0])),
        ("art_icon.png", solid(30, 20, [0, 255, 0])),
    ]
}

pub fn memory_assets() -> MemoryAssets {
    fixture_images().into_iter().fold(MemoryAssets::new(), |assets, (name, img)| assets.with(name, img))
}

/// Write the fixture images as PNG files under `dir`.
pub fn write_asset_dir(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, img) in fixture_images() {
        img.save(dir.join(name)).unwrap();
    }
}

/// A system TrueType font, if the machine has one of the usual ones.
pub fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}
