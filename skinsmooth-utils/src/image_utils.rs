use std::path::Path;

use anyhow::{Context, Result};
use image::{ColorType, DynamicImage};
use log::debug;

/// Load an image from disk into memory.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path_ref = path.as_ref();
    image::open(path_ref).with_context(|| format!("failed to open image {}", path_ref.display()))
}

/// Convert a decoded image into one of the two layouts the smoothing pipeline accepts.
///
/// Grayscale inputs (with or without alpha) become 8-bit luma; everything else becomes
/// 8-bit RGB. Alpha and extra bit depth are dropped.
pub fn normalize_color(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image,
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            debug!("flattening {:?} image to 8-bit luma", image.color());
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        other => {
            debug!("flattening {other:?} image to 8-bit RGB");
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
    }
}
