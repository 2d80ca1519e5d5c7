//! Per-image processing: decode, smooth, encode.

use std::{path::Path, time::Instant};

use anyhow::{Context, Result};
use log::info;
use skinsmooth_core::{Raster, SmoothingParams, smooth_skin};
use skinsmooth_utils::{OutputOptions, load_image, normalize_color, save_image, timing_guard};

use crate::types::ImageReport;

/// Smooth one image file and write the result to `destination`.
pub fn process_image(
    path: &Path,
    destination: &Path,
    params: &SmoothingParams,
    options: &OutputOptions,
) -> Result<ImageReport> {
    let _guard = timing_guard("skinsmooth_cli::process_image", log::Level::Debug);

    let image = normalize_color(load_image(path)?);
    let raster = Raster::from_image(&image)
        .with_context(|| format!("failed to read pixels of {}", path.display()))?;

    let start = Instant::now();
    let result = smooth_skin(raster.view(), params)
        .with_context(|| format!("failed to smooth {}", path.display()))?;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    info!("{}: elapsed time: {elapsed_ms} ms", path.display());

    let report = ImageReport::new(
        path.display().to_string(),
        destination.display().to_string(),
        &result,
        elapsed_ms,
    );
    let smoothed = result
        .image
        .into_image()
        .with_context(|| format!("failed to convert {} back to an image", path.display()))?;
    save_image(&smoothed, destination, options)?;
    info!("{} -> {}", path.display(), destination.display());
    Ok(report)
}
