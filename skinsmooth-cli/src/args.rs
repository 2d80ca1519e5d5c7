//! Command-line argument definitions for skinsmooth-cli.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Smooth skin regions in photographs while keeping edges and non-skin detail.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct SmoothArgs {
    /// Path to an image file or a directory containing images.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Optional settings JSON. Defaults to `config/skinsmooth.json` when present, otherwise built-in parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Smoothing level (> 0). Larger values preserve more texture.
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub smoothing_level: Option<u32>,

    /// Restore non-skin pixels to the original after denoising.
    #[arg(long, action = ArgAction::SetTrue)]
    pub skin_filter: bool,

    /// Fixed window radius, bypassing the skin-adaptive choice.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub radius: Option<u32>,

    /// Upper bound for the adaptive radius (defaults to the shorter image side).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_radius: Option<u32>,

    /// Directory for smoothed images. Defaults to each input's directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suffix appended to the input file stem.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Output image format: jpeg or png.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality when saving as JPEG (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Write the run report to a JSON file instead of stdout.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Enable telemetry timing logs (defaults to settings file).
    #[arg(long, action = ArgAction::SetTrue)]
    pub telemetry: bool,

    /// Override telemetry logging level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub telemetry_level: Option<String>,
}
