//! Outlined text patches and width fitting
//!
//! Text is first drawn into an isolated RGBA patch exactly as wide as its
//! measured advance. A patch wider than the space it must fit in is squished
//! horizontally (never truncated or wrapped); a narrower one is left as is.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::fonts::{Font, FontProvider};
use crate::blend::{composite, lerp_pixel};
use crate::color::Rgb;
use crate::config::FieldSpec;
use crate::error::RenderError;

/// Offsets of the outline passes, relative to the text position.
///
/// The top-left diagonal is drawn twice and the bottom-left diagonal not at
/// all; rendered output depends on this exact order.
pub const OUTLINE_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, -1), (1, 1)];

/// Fill, optional outline and pass count for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fill: Rgb,
    pub outline: Option<Rgb>,
    /// Stacked passes; more passes give denser anti-aliased edges
    pub repeat: u32,
}

impl TextStyle {
    pub const fn plain(fill: Rgb) -> Self {
        Self { fill, outline: None, repeat: 1 }
    }

    pub const fn outlined(fill: Rgb, outline: Rgb) -> Self {
        Self { fill, outline: Some(outline), repeat: 1 }
    }
}

/// Width and height of `text` in pixels.
pub fn measure(text: &str, font: &Font) -> (u32, u32) {
    font.face().measure(text, font.size())
}

fn stamp(patch: &mut RgbaImage, text: &str, font: &Font, origin: (i32, i32), color: Rgb) {
    let (w, h) = (patch.width() as i32, patch.height() as i32);
    let [r, g, b] = color.0;
    font.face().rasterize(text, font.size(), origin, &mut |x, y, coverage| {
        if x < 0 || y < 0 || x >= w || y >= h {
            return;
        }
        let a = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 0 {
            return;
        }
        let px = patch.get_pixel_mut(x as u32, y as u32);
        *px = lerp_pixel(px, &Rgba([r, g, b, a]));
    });
}

/// Render `text` into a transparent patch of exactly its measured size.
///
/// With an outline, the text is first stamped `repeat * 3` times at each of
/// [`OUTLINE_OFFSETS`] in the outline colour, then `repeat` times in place in
/// the fill colour.
pub fn render_text(text: &str, font: &Font, style: &TextStyle) -> RgbaImage {
    let (w, h) = measure(text, font);
    let mut patch = RgbaImage::new(w, h);
    if w == 0 || h == 0 {
        return patch;
    }

    if let Some(outline) = style.outline {
        for _ in 0..style.repeat * 3 {
            for &(dx, dy) in OUTLINE_OFFSETS.iter() {
                stamp(&mut patch, text, font, (dx, dy), outline);
            }
        }
    }
    for _ in 0..style.repeat {
        stamp(&mut patch, text, font, (0, 0), style.fill);
    }

    patch
}

/// Squish `patch` horizontally to `max_width` if it is wider; otherwise
/// return it unchanged. Height is always preserved.
pub fn fit_to_width(patch: RgbaImage, max_width: u32) -> RgbaImage {
    let max_width = max_width.max(1);
    if patch.width() <= max_width || patch.height() == 0 {
        return patch;
    }
    tracing::trace!(from = patch.width(), to = max_width, "squishing text");
    imageops::resize(&patch, max_width, patch.height(), FilterType::Triangle)
}

/// Draw `text` centred on `center`, squished to at most `max_width`.
///
/// The patch is always centred horizontally. Vertically it is centred when
/// `center_vertically` is set; otherwise `center.1` is its top edge.
/// Returns the size of the composited patch.
pub fn draw_fitted(
    dst: &mut RgbaImage,
    center: (i32, i32),
    text: &str,
    font: &Font,
    max_width: u32,
    style: &TextStyle,
    center_vertically: bool,
) -> (u32, u32) {
    let patch = fit_to_width(render_text(text, font, style), max_width);
    let (w, h) = patch.dimensions();

    let x = (center.0 as f32 - w as f32 / 2.0) as i32;
    let y = if center_vertically { (center.1 as f32 - h as f32 / 2.0) as i32 } else { center.1 };
    composite(dst, &patch, x, y);
    (w, h)
}

/// Draw `text` with its top-left corner at `origin`, at natural width.
pub fn draw_text(dst: &mut RgbaImage, origin: (i32, i32), text: &str, font: &Font, style: &TextStyle) -> (u32, u32) {
    let patch = render_text(text, font, style);
    composite(dst, &patch, origin.0, origin.1);
    patch.dimensions()
}

/// Draw `text` as described by a layout field. Disabled fields draw nothing.
pub fn draw_field(
    dst: &mut RgbaImage,
    field: &FieldSpec,
    text: &str,
    fonts: &dyn FontProvider,
) -> Result<(), RenderError> {
    if !field.enabled {
        return Ok(());
    }
    let font = fonts.font(&field.font, field.font_size)?;
    let style = TextStyle { fill: field.color, outline: field.outline, repeat: field.repeat.max(1) };
    draw_fitted(
        dst,
        (field.position[0], field.position[1]),
        text,
        &font,
        field.width,
        &style,
        field.center_vertically,
    );
    Ok(())
}
