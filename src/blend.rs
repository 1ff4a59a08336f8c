//! Alpha compositing and directional alpha fades
//!
//! `composite` pastes an image through its own alpha channel. `feather`
//! returns a copy of an image whose alpha ramps down across a band, used to
//! blend artwork into the edge of a frame.

use image::{Rgba, RgbaImage};

/// Direction a fade runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeAxis {
    /// Fade along x: columns inside the band lose alpha
    #[default]
    Horizontal,
    /// Fade along y: rows inside the band lose alpha
    Vertical,
}

/// Shape of the alpha ramp inside the band, as a function of `t` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeCurve {
    /// `1 - t`
    Linear,
    /// `1 - t²`: slow start, accelerating towards the end
    #[default]
    Quadratic,
}

impl FadeCurve {
    /// Remaining alpha factor at position `t`.
    pub fn factor(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => 1.0 - t,
            FadeCurve::Quadratic => 1.0 - t * t,
        }
    }
}

/// Paste `src` onto `dst` with its top-left corner at (`x`, `y`), using the
/// source alpha as blend weight.
///
/// Colour channels become `lerp(dst, src, src.alpha)`. The destination alpha
/// accumulates source-over, so an opaque destination stays opaque. Parts of
/// `src` outside `dst` are clipped; negative offsets are allowed.
pub fn composite(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let (dst_w, dst_h) = (dst.width() as i64, dst.height() as i64);

    for (sy, row) in src.rows().enumerate() {
        let dest_y = y as i64 + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= dst_h {
            break;
        }

        for (sx, pixel) in row.enumerate() {
            let dest_x = x as i64 + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= dst_w {
                break;
            }
            // Fully transparent source, skip
            if pixel[3] == 0 {
                continue;
            }

            let out = dst.get_pixel_mut(dest_x as u32, dest_y as u32);
            *out = lerp_pixel(out, pixel);
        }
    }
}

/// Blend one source pixel over a destination pixel (source-over,
/// straight alpha). Over an opaque destination this is a plain lerp.
pub(crate) fn lerp_pixel(dst: &Rgba<u8>, src: &Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0 * (1.0 - sa);
    let out_a = sa + da;
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |d: u8, s: u8| -> u8 { ((s as f32 * sa + d as f32 * da) / out_a).round().clamp(0.0, 255.0) as u8 };
    Rgba([mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2]), (out_a * 255.0).round() as u8])
}

/// Paste `src` onto `dst` ignoring its alpha: every covered pixel takes the
/// source colour and becomes opaque.
pub fn paste_opaque(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let (dst_w, dst_h) = (dst.width() as i64, dst.height() as i64);
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let (dx, dy) = (x as i64 + sx as i64, y as i64 + sy as i64);
        if dx >= 0 && dy >= 0 && dx < dst_w && dy < dst_h {
            dst.put_pixel(dx as u32, dy as u32, Rgba([pixel[0], pixel[1], pixel[2], 255]));
        }
    }
}

/// Return a copy of `src` whose alpha fades out across a band.
///
/// The band covers `[start, end)` of the image's extent along `axis`, with
/// both fractions truncated to whole pixels. Inside the band a pixel at
/// position `t` (0 on the first pixel, 1 on the last) keeps
/// `curve.factor(t)` of its alpha, rounded down. Pixels before the band are
/// unchanged; pixels at or after the band end become fully transparent.
///
/// `src` is never modified, so shared cache entries stay intact.
///
/// # Examples
///
/// ```
/// use fleetdraw::blend::{feather, FadeAxis, FadeCurve};
/// use image::{Rgba, RgbaImage};
///
/// let art = RgbaImage::from_pixel(8, 1, Rgba([255, 255, 255, 255]));
/// let faded = feather(&art, 0.75, 1.0, FadeAxis::Horizontal, FadeCurve::Quadratic);
/// assert_eq!(faded.get_pixel(5, 0)[3], 255);
/// assert_eq!(faded.get_pixel(7, 0)[3], 0);
/// assert_eq!(art.get_pixel(7, 0)[3], 255);
/// ```
pub fn feather(src: &RgbaImage, start: f32, end: f32, axis: FadeAxis, curve: FadeCurve) -> RgbaImage {
    let mut out = src.clone();
    let extent = match axis {
        FadeAxis::Horizontal => src.width(),
        FadeAxis::Vertical => src.height(),
    };
    if extent == 0 {
        return out;
    }

    let band_start = ((extent as f32 * start.clamp(0.0, 1.0)) as u32).min(extent);
    let band_end = ((extent as f32 * end.clamp(0.0, 1.0)) as u32).clamp(band_start, extent);
    let width = band_end - band_start;
    let span = width.saturating_sub(1).max(1) as f32;

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let pos = match axis {
            FadeAxis::Horizontal => x,
            FadeAxis::Vertical => y,
        };
        if pos < band_start {
            continue;
        }
        if pos >= band_end {
            pixel[3] = 0;
            continue;
        }
        // A one-pixel band is both its first and last pixel
        let t = if width == 1 { 1.0 } else { (pos - band_start) as f32 / span };
        pixel[3] = (pixel[3] as f32 * curve.factor(t)) as u8;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 255]))
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut dst = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        composite(&mut dst, &src, 1, 1);
        assert_eq!(*dst.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(3, 3), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_composite_half_alpha_lerps() {
        let mut dst = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        composite(&mut dst, &src, 0, 0);
        let p = dst.get_pixel(0, 0);
        assert_eq!(p[0], 128);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_composite_onto_transparent_keeps_colour() {
        let mut dst = RgbaImage::new(1, 1);
        let src = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        composite(&mut dst, &src, 0, 0);
        assert_eq!(*dst.get_pixel(0, 0), Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn test_composite_transparent_is_noop() {
        let mut dst = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        composite(&mut dst, &src, 0, 0);
        assert_eq!(*dst.get_pixel(1, 1), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_composite_clips_negative_offset() {
        let mut dst = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(3, 3, Rgba([0, 255, 0, 255]));
        composite(&mut dst, &src, -2, -2);
        assert_eq!(*dst.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*dst.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*dst.get_pixel(0, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_paste_opaque_ignores_alpha() {
        let mut dst = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        let src = RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 0]));
        paste_opaque(&mut dst, &src, 1, 0);
        assert_eq!(*dst.get_pixel(1, 0), Rgba([9, 9, 9, 255]));
        assert_eq!(*dst.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_feather_follows_quadratic_ramp() {
        let src = opaque(100, 3);
        let faded = feather(&src, 0.75, 1.0, FadeAxis::Horizontal, FadeCurve::Quadratic);

        for x in 0..75 {
            assert_eq!(faded.get_pixel(x, 1)[3], 255, "column {} should be untouched", x);
        }
        assert_eq!(faded.get_pixel(99, 0)[3], 0);

        let mut previous = 255u8;
        for x in 76..100 {
            let alpha = faded.get_pixel(x, 2)[3];
            assert!(alpha < previous, "alpha must strictly decrease at column {}", x);
            let t = (x - 75) as f32 / 24.0;
            assert_eq!(alpha, (255.0 * (1.0 - t * t)) as u8);
            previous = alpha;
        }
    }

    #[test]
    fn test_feather_single_pixel_band_ends_transparent() {
        let src = opaque(4, 1);
        let faded = feather(&src, 0.75, 1.0, FadeAxis::Horizontal, FadeCurve::Quadratic);
        assert_eq!(faded.get_pixel(2, 0)[3], 255);
        assert_eq!(faded.get_pixel(3, 0)[3], 0);

        let faded = feather(&opaque(1, 4), 0.5, 0.75, FadeAxis::Vertical, FadeCurve::Linear);
        assert_eq!(faded.get_pixel(0, 1)[3], 255);
        assert_eq!(faded.get_pixel(0, 2)[3], 0);
        assert_eq!(faded.get_pixel(0, 3)[3], 0);
    }

    #[test]
    fn test_feather_leaves_source_untouched() {
        let src = opaque(10, 10);
        let _ = feather(&src, 0.0, 1.0, FadeAxis::Horizontal, FadeCurve::Linear);
        assert!(src.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_feather_clears_after_band() {
        let src = opaque(10, 10);
        let faded = feather(&src, 0.2, 0.5, FadeAxis::Vertical, FadeCurve::Linear);
        assert_eq!(faded.get_pixel(4, 1)[3], 255);
        assert_eq!(faded.get_pixel(4, 2)[3], 255);
        assert_eq!(faded.get_pixel(4, 4)[3], 0);
        assert_eq!(faded.get_pixel(4, 9)[3], 0);
        // colour channels are kept
        assert_eq!(faded.get_pixel(4, 9)[0], 200);
    }

    #[test]
    fn test_feather_scales_existing_alpha() {
        let src = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 100]));
        let faded = feather(&src, 0.5, 1.0, FadeAxis::Horizontal, FadeCurve::Linear);
        assert_eq!(faded.get_pixel(2, 0)[3], 100);
        assert_eq!(faded.get_pixel(3, 0)[3], 0);
    }

    #[test]
    fn test_curve_factor() {
        assert_eq!(FadeCurve::Quadratic.factor(0.5), 0.75);
        assert_eq!(FadeCurve::Linear.factor(0.25), 0.75);
        assert_eq!(FadeCurve::Linear.factor(2.0), 0.0);
    }
}
