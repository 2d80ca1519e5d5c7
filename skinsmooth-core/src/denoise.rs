//! Edge-preserving local-statistics denoiser.
//!
//! Each sample is pulled towards its window mean, but the pull is blended back
//! towards the original where the mean sits above the sample (a likely edge) and
//! damped where the window variance is large relative to the intensity's resistance.
//! All arithmetic is integer and truncating, in the order written in
//! [`denoise_sample`].

use log::trace;

use crate::curve::SmoothingCurve;
use crate::error::SmoothResult;
use crate::raster::{Raster, RasterView};
use crate::window::WindowScanner;

#[inline]
pub fn clamp_to_byte(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

/// Denoise one sample from its window totals.
///
/// ```text
/// mean     = sum / area
/// diff     = mean - value
/// edge     = clamp(diff, 0, 255)
/// masked   = (edge * value + (256 - edge) * mean) >> 8
/// variance = |squares - mean * sum| / area
/// out      = masked - diff * variance / (variance + resistance)
/// ```
#[inline]
pub fn denoise_sample(sum: i64, squares: i64, area: i64, value: u8, resistance: i64) -> u8 {
    let value = i64::from(value);
    let mean = sum / area;
    let diff = mean - value;
    let edge = diff.clamp(0, 255);
    let masked_edge = (edge * value + (256 - edge) * mean) >> 8;
    let variance = (squares - mean * sum).abs() / area;
    let out = masked_edge - diff * variance / (variance + resistance);
    clamp_to_byte(out)
}

/// Run the denoiser over a grayscale or RGB view with a fixed window radius.
///
/// Returns a newly allocated raster of the same shape; nothing is returned on error.
pub fn denoise(view: RasterView<'_>, radius: usize, curve: &SmoothingCurve) -> SmoothResult<Raster> {
    let scanner = WindowScanner::new(view, radius)?;
    trace!(
        "denoising {}x{}x{} with radius {} (area {})",
        view.width(),
        view.height(),
        view.channels(),
        radius,
        scanner.area()
    );

    let src = view.data();
    let channels = view.channels();
    let stride = view.stride();
    let mut out = vec![0u8; src.len()];
    scanner.scan(|x, y, window| {
        let base = y * stride + x * channels;
        for c in 0..channels {
            let value = src[base + c];
            out[base + c] = denoise_sample(
                window.sum(c),
                window.squares(c),
                window.area(),
                value,
                curve.resistance(value),
            );
        }
    });
    Raster::new(out, view.width(), view.height(), channels)
}
