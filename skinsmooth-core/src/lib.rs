//! Skin-aware adaptive smoothing.
//!
//! The pipeline classifies skin tones on 2x2 blocks, derives a window radius from
//! how much of the frame is skin, runs an edge-preserving local-statistics denoiser
//! over the raster, and can finally restore original detail outside skin regions.
//! Every stage works on interleaved 8-bit rasters and returns a new raster of the
//! same shape.

/// Non-skin restoration after denoising.
pub mod composite;
/// Intensity-to-resistance lookup table.
pub mod curve;
/// Edge-preserving local-statistics denoiser.
pub mod denoise;
pub mod error;
/// Mirrored boundary offset tables.
pub mod offsets;
/// Top-level smoothing entry point and radius selection.
pub mod pipeline;
/// Owned and borrowed 8-bit rasters.
pub mod raster;
/// Skin-tone classification.
pub mod skin;
/// O(1) sliding-window sums.
pub mod window;

pub use composite::restore_non_skin;
pub use curve::SmoothingCurve;
pub use denoise::{denoise, denoise_sample};
pub use error::{Shape, SmoothError, SmoothResult};
pub use offsets::{OffsetMap, reflect_index};
pub use pipeline::{
    MIN_SKIN_RATIO, SmoothingOutcome, SmoothingOutput, SmoothingParams, SmoothingReport,
    adaptive_radius, smooth_skin,
};
pub use raster::{Raster, RasterView};
pub use skin::{count_skin_blocks, is_skin_tone, skin_mask, skin_ratio};
pub use window::{WindowScanner, WindowSums};

/// Returns the crate version for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
