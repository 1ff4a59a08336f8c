//! PNG encoding and output file naming

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Encode an image as PNG into memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode `image` as PNG and save it to `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    write_bytes(&encode_png(image)?, path)
}

/// Output path of one page when several pages are written at once.
///
/// | `output` | page 3 |
/// |----------|--------|
/// | `inv.png` | `inv_p3.png` |
/// | `out/inv.png` | `out/inv_p3.png` |
/// | `out/` | `out/page_3.png` |
pub fn page_output_path(output: &Path, page: usize) -> PathBuf {
    let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
    if is_dir {
        return output.join(format!("page_{}.png", page));
    }

    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("inventory");
    let file = format!("{}_p{}.png", stem, page);
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file),
        _ => PathBuf::from(file),
    }
}
