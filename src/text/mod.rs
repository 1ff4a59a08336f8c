//! Text measurement and rendering
//!
//! Fonts are resolved by name through a [`FontProvider`] and rasterized by a
//! [`Typeface`]. Rendered text is drawn into its own patch first, so it can be
//! outlined, squished to a width and then composited anywhere.

mod fonts;
mod render;
mod typeface;

pub use fonts::{Font, FontLibrary, FontProvider};
pub use render::{
    draw_field, draw_fitted, draw_text, fit_to_width, measure, render_text, TextStyle, OUTLINE_OFFSETS,
};
pub use typeface::{TrueTypeFace, Typeface};
