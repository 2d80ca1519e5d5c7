//! Helpers for writing smoothed images.
//!
//! Output naming and encoding live here so every front end derives the same
//! `<dir>/<stem><suffix>.<ext>` destination and encodes with the same settings.

use crate::config::OutputSettings;

use anyhow::{Context, Result};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
    },
};
use log::{debug, warn};
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Image formats supported by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormatHint {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormatHint {
    /// Determine format from a filesystem extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }

    /// Canonical file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl std::str::FromStr for ImageFormatHint {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(format!("unknown image format '{other}'")),
        }
    }
}

/// Immutable encoding options derived from [`OutputSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: ImageFormatHint,
    pub jpeg_quality: u8,
    pub suffix: String,
    pub directory: Option<PathBuf>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::from_settings(&OutputSettings::default())
    }
}

impl OutputOptions {
    pub fn from_settings(settings: &OutputSettings) -> Self {
        let format = ImageFormatHint::from_extension(&settings.format).unwrap_or_else(|| {
            warn!("unknown image format '{}'; writing JPEG instead", settings.format);
            ImageFormatHint::Jpeg
        });
        Self {
            format,
            jpeg_quality: settings.jpeg_quality.clamp(1, 100),
            suffix: settings.suffix.clone(),
            directory: settings.directory.clone(),
        }
    }
}

/// Derive the output path for `input`: `<dir>/<stem><suffix>.<ext>`.
///
/// `dir` is the configured output directory, or the input's own directory.
pub fn output_path_for(input: &Path, options: &OutputOptions) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("image"))
        .to_string_lossy();
    let file_name = format!("{stem}{}.{}", options.suffix, options.format.extension());
    let dir = options
        .directory
        .as_deref()
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));
    dir.join(file_name)
}

/// Encode `image` with `options` and write it to `destination`, creating parent directories.
pub fn save_image(image: &DynamicImage, destination: &Path, options: &OutputOptions) -> Result<()> {
    if let Some(parent) = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    debug!(
        "Saving {} using {:?} format",
        destination.display(),
        options.format
    );
    let encoded = match options.format {
        ImageFormatHint::Jpeg => encode_jpeg(image, options.jpeg_quality)?,
        ImageFormatHint::Png => encode_png(image)?,
    };
    write_bytes(destination, &encoded)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    match image {
        DynamicImage::ImageLuma8(gray) => encoder.write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            ExtendedColorType::L8,
        ),
        other => {
            let rgb = other.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        }
    }
    .context("failed to encode JPEG")?;
    Ok(buffer)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, FilterType::Adaptive);
    match image {
        DynamicImage::ImageLuma8(gray) => encoder.write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            ExtendedColorType::L8,
        ),
        other => {
            let rgb = other.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        }
    }
    .context("failed to encode PNG")?;
    Ok(buffer)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}
