//! Raster drawing primitives
//!
//! Rectangles use inclusive corner coordinates. Everything is clipped to the
//! image, so callers may pass coordinates partly outside it.

use image::{Rgba, RgbaImage};

use crate::color::Rgb;

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Fill the rectangle spanning (`x0`, `y0`) to (`x1`, `y1`), both inclusive.
///
/// # Examples
///
/// ```
/// use fleetdraw::color::Rgb;
/// use fleetdraw::shapes::fill_rect;
/// use image::{Rgba, RgbaImage};
///
/// let mut img = RgbaImage::new(4, 4);
/// fill_rect(&mut img, 1, 1, 2, 2, Rgb::WHITE);
/// assert_eq!(*img.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
/// assert_eq!(img.get_pixel(3, 3)[3], 0);
/// ```
pub fn fill_rect(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let color = color.to_rgba();
    let (w, h) = (img.width() as i32, img.height() as i32);
    let (xa, xb) = (x0.min(x1).max(0), x0.max(x1).min(w - 1));
    let (ya, yb) = (y0.min(y1).max(0), y0.max(y1).min(h - 1));
    for y in ya..=yb {
        for x in xa..=xb {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Outline the rectangle spanning (`x0`, `y0`) to (`x1`, `y1`) with a border
/// `width` pixels thick, drawn inward from the edge.
pub fn stroke_rect(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, width: u32, color: Rgb) {
    if width == 0 {
        return;
    }
    let (xa, xb) = (x0.min(x1), x0.max(x1));
    let (ya, yb) = (y0.min(y1), y0.max(y1));
    let t = width as i32 - 1;

    // Top and bottom bands, then the sides between them
    fill_rect(img, xa, ya, xb, (ya + t).min(yb), color);
    fill_rect(img, xa, (yb - t).max(ya), xb, yb, color);
    fill_rect(img, xa, ya, (xa + t).min(xb), yb, color);
    fill_rect(img, (xb - t).max(xa), ya, xb, yb, color);
}

/// Fill a circle of radius `r` centred on (`cx`, `cy`).
pub fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, r: u32, color: Rgb) {
    let color = color.to_rgba();
    let r = r as i64;
    let r_sq = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r_sq {
                put(img, cx as i64 + dx, cy as i64 + dy, color);
            }
        }
    }
}

/// Draw a one-pixel line from `p0` to `p1` (Bresenham).
pub fn draw_line(img: &mut RgbaImage, p0: (i32, i32), p1: (i32, i32), color: Rgb) {
    let color = color.to_rgba();
    let (mut x, mut y) = (p0.0 as i64, p0.1 as i64);
    let (x_end, y_end) = (p1.0 as i64, p1.1 as i64);

    let dx = (x_end - x).abs();
    let dy = -(y_end - y).abs();
    let step_x = if x < x_end { 1 } else { -1 };
    let step_y = if y < y_end { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x, y, color);
        if x == x_end && y == y_end {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}

/// Fill a polygon given by floating-point vertices, then trace its edges in
/// `outline` when one is given.
///
/// A pixel is filled when its centre lies inside the polygon (even-odd rule).
pub fn fill_polygon(img: &mut RgbaImage, vertices: &[(f64, f64)], fill: Rgb, outline: Option<Rgb>) {
    if vertices.len() < 3 {
        return;
    }
    let fill_px = fill.to_rgba();

    let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;

    let mut crossings: Vec<f64> = Vec::with_capacity(vertices.len());
    for y in min_y..=max_y {
        let scan = y as f64 + 0.5;
        crossings.clear();
        for (i, &(x1, y1)) in vertices.iter().enumerate() {
            let (x2, y2) = vertices[(i + 1) % vertices.len()];
            if (y1 <= scan && scan < y2) || (y2 <= scan && scan < y1) {
                crossings.push(x1 + (scan - y1) * (x2 - x1) / (y2 - y1));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks(2) {
            if let [from, to] = pair {
                let first = (from - 0.5).ceil() as i64;
                let last = (to - 0.5).floor() as i64;
                for x in first..=last {
                    put(img, x, y, fill_px);
                }
            }
        }
    }

    if let Some(outline) = outline {
        let rounded: Vec<(i32, i32)> = vertices.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect();
        for (i, &start) in rounded.iter().enumerate() {
            draw_line(img, start, rounded[(i + 1) % rounded.len()], outline);
        }
    }
}
