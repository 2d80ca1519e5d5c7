//! Serializable run report for skinsmooth-cli.

use serde::Serialize;
use skinsmooth_core::{SmoothingOutcome, SmoothingOutput};

/// What the pipeline did with an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Smoothed,
    PassThrough,
}

/// A serializable summary of one processed image.
#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub image: String,
    pub output: String,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub status: ImageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_blocks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverted_pixels: Option<usize>,
    pub elapsed_ms: u64,
}

impl ImageReport {
    pub fn new(image: String, output: String, result: &SmoothingOutput, elapsed_ms: u64) -> Self {
        let (width, height, channels) = result.image.shape();
        let mut report = Self {
            image,
            output,
            width,
            height,
            channels,
            status: ImageStatus::PassThrough,
            skin_blocks: None,
            skin_ratio: None,
            radius: None,
            reverted_pixels: None,
            elapsed_ms,
        };
        if let SmoothingOutcome::Smoothed(stats) = result.outcome {
            report.status = ImageStatus::Smoothed;
            report.skin_blocks = Some(stats.skin_blocks);
            report.skin_ratio = Some(stats.skin_ratio);
            report.radius = Some(stats.radius);
            report.reverted_pixels = stats.reverted_pixels;
        }
        report
    }
}
