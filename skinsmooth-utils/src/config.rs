//! Shared configuration types consumed across the skinsmooth workspace.
//!
//! Settings are persisted as JSON and every section falls back to its defaults when
//! omitted, so partial files written by hand remain valid.

use anyhow::{Context, Result};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Smoothing strength used when nothing else is configured.
pub const DEFAULT_SMOOTHING_LEVEL: u32 = 10;

/// Parameters of the skin smoothing transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SmoothingSettings {
    /// Denoising strength; larger values resist smoothing more (gentler result).
    pub level: u32,
    /// Revert smoothing on pixels that are not classified as skin after denoising.
    pub apply_skin_filter: bool,
    /// Fixed window radius. When `None` the radius adapts to the skin ratio.
    pub radius: Option<u32>,
    /// Upper bound for the adaptive radius. Defaults to the shorter image side.
    pub max_radius: Option<u32>,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_SMOOTHING_LEVEL,
            apply_skin_filter: false,
            radius: None,
            max_radius: None,
        }
    }
}

impl SmoothingSettings {
    /// Clamp values to ranges the pipeline accepts.
    pub fn sanitize(&mut self) {
        if self.level == 0 {
            warn!("smoothing level 0 is invalid; using 1");
            self.level = 1;
        }
        if self.radius == Some(0) {
            warn!("radius 0 is invalid; falling back to the adaptive radius");
            self.radius = None;
        }
        if self.max_radius == Some(0) {
            self.max_radius = None;
        }
    }
}

/// Where and how smoothed images are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "jpeg" or "png".
    pub format: String,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Suffix appended to the input file stem.
    pub suffix: String,
    /// Optional output directory. `None` writes next to each input.
    pub directory: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "jpeg".to_string(),
            jpeg_quality: 100,
            suffix: "_out".to_string(),
            directory: None,
        }
    }
}

impl OutputSettings {
    pub fn sanitize(&mut self) {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.format = self.format.trim().to_ascii_lowercase();
    }
}

/// Settings controlling optional runtime telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Whether stage timing logs are enabled.
    pub enabled: bool,
    /// Logging level for telemetry output (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "debug".to_string(),
        }
    }
}

impl TelemetrySettings {
    /// Resolve the configured level string into a `LevelFilter`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        }
    }

    /// Update the level string from a `LevelFilter` value.
    pub fn set_level(&mut self, level: LevelFilter) {
        self.level = level.as_str().to_ascii_lowercase();
    }
}

/// Persistent application settings consumed by front ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub smoothing: SmoothingSettings,
    pub output: OutputSettings,
    pub telemetry: TelemetrySettings,
}

impl AppSettings {
    /// Load settings from a JSON file, filling missing sections with defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let mut settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings JSON at {}", path.display()))?;
        settings.sanitize();
        Ok(settings)
    }

    /// Serialize settings to disk in pretty-printed JSON, overwriting any existing file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize settings JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        Ok(())
    }

    pub fn sanitize(&mut self) {
        self.smoothing.sanitize();
        self.output.sanitize();
    }
}

/// Returns the default path for persisted settings (`config/skinsmooth.json`).
pub fn default_settings_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join("config/skinsmooth.json"))
        .unwrap_or_else(|_| PathBuf::from("config/skinsmooth.json"))
}
