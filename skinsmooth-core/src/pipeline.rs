use log::debug;
use skinsmooth_utils::{SmoothingSettings, config::DEFAULT_SMOOTHING_LEVEL, timing_guard};

use crate::composite::restore_non_skin;
use crate::curve::SmoothingCurve;
use crate::denoise::denoise;
use crate::error::{SmoothError, SmoothResult};
use crate::raster::{Raster, RasterView};
use crate::skin::{count_skin_blocks, ratio_from_count};

/// Skin percentages at or below this count as "no skin" when choosing the radius.
pub const MIN_SKIN_RATIO: f32 = 1e-3;

/// Parameters for [`smooth_skin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingParams {
    /// Strength of the resistance curve. Must be greater than zero.
    pub smoothing_level: u32,
    /// Revert non-skin pixels to the original after denoising.
    pub apply_skin_filter: bool,
    /// Fixed window radius, bypassing the adaptive choice.
    pub radius: Option<u32>,
    /// Upper bound for the adaptive radius. Defaults to the shorter image side.
    pub max_radius: Option<u32>,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            smoothing_level: DEFAULT_SMOOTHING_LEVEL,
            apply_skin_filter: false,
            radius: None,
            max_radius: None,
        }
    }
}

impl From<&SmoothingSettings> for SmoothingParams {
    fn from(settings: &SmoothingSettings) -> Self {
        Self {
            smoothing_level: settings.level,
            apply_skin_filter: settings.apply_skin_filter,
            radius: settings.radius,
            max_radius: settings.max_radius,
        }
    }
}

/// Measurements gathered while smoothing a color image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingReport {
    pub skin_blocks: u32,
    /// Skin coverage in percent of all positions.
    pub skin_ratio: f32,
    /// Window radius the denoiser ran with.
    pub radius: usize,
    /// Pixels restored by the compositor, `None` when the skin filter was off.
    pub reverted_pixels: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingOutcome {
    Smoothed(SmoothingReport),
    /// Single-channel input is returned untouched.
    PassThrough { channels: usize },
}

/// Result of [`smooth_skin`]: the output raster and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingOutput {
    pub image: Raster,
    pub outcome: SmoothingOutcome,
}

impl SmoothingOutput {
    pub fn is_smoothed(&self) -> bool {
        matches!(self.outcome, SmoothingOutcome::Smoothed(_))
    }

    pub fn report(&self) -> Option<&SmoothingReport> {
        match &self.outcome {
            SmoothingOutcome::Smoothed(report) => Some(report),
            SmoothingOutcome::PassThrough { .. } => None,
        }
    }
}

/// Pick the denoising radius from the skin ratio.
///
/// Computes `min(width, height) / ratio + 1` truncated and clamped to
/// `[1, max_radius]`, where `max_radius` defaults to the shorter side. Ratios at or
/// below [`MIN_SKIN_RATIO`] (or NaN) select `max_radius` directly.
pub fn adaptive_radius(width: usize, height: usize, ratio: f32, max_radius: Option<usize>) -> usize {
    let short_side = width.min(height);
    let cap = max_radius.unwrap_or(short_side).max(1);
    if ratio.is_nan() || ratio <= MIN_SKIN_RATIO {
        return cap;
    }
    let radius = (short_side as f32 / ratio + 1.0) as usize;
    radius.clamp(1, cap)
}

/// Smooth skin regions of a grayscale or RGB raster.
///
/// Color input runs skin classification, radius selection, the edge-preserving
/// denoiser, and optionally the non-skin compositor. Grayscale input has no skin
/// signal and comes back as [`SmoothingOutcome::PassThrough`].
///
/// # Errors
///
/// [`SmoothError::InvalidSmoothingLevel`] for a zero level on color input,
/// [`SmoothError::InvalidRadius`] for an explicit zero radius and
/// [`SmoothError::UnsupportedChannels`] for anything other than 1 or 3 channels.
pub fn smooth_skin(view: RasterView<'_>, params: &SmoothingParams) -> SmoothResult<SmoothingOutput> {
    let _guard = timing_guard("skinsmooth_core::smooth_skin", log::Level::Debug);

    match view.channels() {
        1 => {
            debug!(
                "{}x{} grayscale input has no skin signal; passing through",
                view.width(),
                view.height()
            );
            return Ok(SmoothingOutput {
                image: view.to_raster(),
                outcome: SmoothingOutcome::PassThrough { channels: 1 },
            });
        }
        3 => {}
        channels => {
            return Err(SmoothError::UnsupportedChannels {
                stage: "skin smoothing",
                channels,
            });
        }
    }
    let curve = SmoothingCurve::new(params.smoothing_level)?;
    if params.radius == Some(0) {
        return Err(SmoothError::InvalidRadius);
    }

    let skin_blocks = {
        let _guard = timing_guard("skinsmooth_core::skin_detection", log::Level::Debug);
        count_skin_blocks(&view)?
    };
    let skin_ratio = ratio_from_count(skin_blocks, view.width(), view.height());
    let radius = match params.radius {
        Some(radius) => radius as usize,
        None => adaptive_radius(
            view.width(),
            view.height(),
            skin_ratio,
            params.max_radius.map(|r| r as usize),
        ),
    };
    debug!(
        "skin blocks {} ({:.3}%), radius {}, level {}",
        skin_blocks, skin_ratio, radius, params.smoothing_level
    );

    let mut image = {
        let _guard = timing_guard("skinsmooth_core::denoise", log::Level::Debug);
        denoise(view, radius, &curve)?
    };

    let reverted_pixels = if params.apply_skin_filter {
        let _guard = timing_guard("skinsmooth_core::skin_filter", log::Level::Debug);
        let reverted = restore_non_skin(view, &mut image)?;
        debug!("restored {reverted} non-skin pixel(s)");
        Some(reverted)
    } else {
        None
    };

    Ok(SmoothingOutput {
        image,
        outcome: SmoothingOutcome::Smoothed(SmoothingReport {
            skin_blocks,
            skin_ratio,
            radius,
            reverted_pixels,
        }),
    })
}
