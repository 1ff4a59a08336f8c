//! Glyph rasterization backends

use rusttype::{point, Scale};

/// Something that can measure and rasterize a line of text.
pub trait Typeface: Send + Sync {
    /// Width and height in pixels of `text` rendered at `size`.
    ///
    /// The width is the advance of the whole line; the height is the line's
    /// ascent plus descent, independent of which glyphs are present.
    fn measure(&self, text: &str, size: f32) -> (u32, u32);

    /// Call `plot(x, y, coverage)` for every pixel the text touches, with the
    /// line's top-left corner at `origin`. Coverage is in `[0, 1]`.
    fn rasterize(&self, text: &str, size: f32, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32));
}

/// A TrueType or OpenType font parsed with rusttype.
pub struct TrueTypeFace {
    font: rusttype::Font<'static>,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace").field("glyphs", &self.font.glyph_count()).finish()
    }
}

impl TrueTypeFace {
    /// Parse font data. Returns `None` if the bytes are not a usable font.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        rusttype::Font::try_from_vec(data).map(|font| Self { font })
    }
}

impl Typeface for TrueTypeFace {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32;

        let mut width: f32 = 0.0;
        for glyph in self.font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            let advance_end = glyph.position().x + glyph.unpositioned().h_metrics().advance_width;
            width = width.max(advance_end);
            if let Some(bb) = glyph.pixel_bounding_box() {
                width = width.max(bb.max.x as f32);
            }
        }

        (width.ceil().max(0.0) as u32, height)
    }

    fn rasterize(&self, text: &str, size: f32, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let start = point(origin.0 as f32, origin.1 as f32 + v_metrics.ascent);

        for glyph in self.font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| plot(bb.min.x + gx as i32, bb.min.y + gy as i32, v));
            }
        }
    }
}
