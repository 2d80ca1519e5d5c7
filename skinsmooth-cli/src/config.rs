//! Configuration loading and CLI override logic.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};
use skinsmooth_utils::{
    ImageFormatHint,
    config::{AppSettings, default_settings_path},
    normalize_path,
};

use crate::args::SmoothArgs;

/// Load application settings from a file or use defaults.
pub fn load_settings(config_path: Option<&PathBuf>) -> Result<AppSettings> {
    if let Some(path) = config_path {
        let resolved = normalize_path(path)?;
        let settings = AppSettings::load_from_path(&resolved)?;
        info!("Loaded settings from {}", resolved.display());
        return Ok(settings);
    }

    let default_path = default_settings_path();
    if !default_path.exists() {
        return Ok(AppSettings::default());
    }
    let settings = AppSettings::load_from_path(&default_path).with_context(|| {
        format!(
            "failed to load default settings from {}",
            default_path.display()
        )
    })?;
    info!("Loaded settings from {}", default_path.display());
    Ok(settings)
}

/// Apply command-line arguments on top of loaded or default settings.
pub fn apply_cli_overrides(settings: &mut AppSettings, args: &SmoothArgs) {
    if args.telemetry {
        settings.telemetry.enabled = true;
    }
    if let Some(level) = args.telemetry_level.as_ref() {
        let normalized = level.trim().to_ascii_lowercase();
        if !normalized.is_empty() {
            if normalized == "off" {
                settings.telemetry.enabled = false;
            }
            settings.telemetry.level = normalized;
        }
    }

    if let Some(level) = args.smoothing_level {
        settings.smoothing.level = level;
    }
    if args.skin_filter {
        settings.smoothing.apply_skin_filter = true;
    }
    if let Some(radius) = args.radius {
        settings.smoothing.radius = Some(radius);
    }
    if let Some(max_radius) = args.max_radius {
        settings.smoothing.max_radius = Some(max_radius);
    }

    if let Some(dir) = args.output_dir.as_ref() {
        settings.output.directory = Some(dir.clone());
    }
    if let Some(suffix) = args.suffix.as_ref() {
        settings.output.suffix = suffix.clone();
    }
    if let Some(format) = args.format.as_ref() {
        if ImageFormatHint::from_extension(format).is_some() {
            settings.output.format = format.clone();
        } else {
            warn!("ignoring --format '{format}' (supported: jpeg, jpg, png)");
        }
    }
    if let Some(quality) = args.jpeg_quality {
        settings.output.jpeg_quality = quality;
    }

    settings.sanitize();
}
