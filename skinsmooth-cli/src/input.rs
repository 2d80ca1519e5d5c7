//! Input collection.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::{debug, info, warn};
use skinsmooth_utils::{OutputOptions, output_path_for};
use walkdir::WalkDir;

/// Extensions accepted when scanning directories.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect all image paths from a file or directory, sorted.
pub fn collect_images(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!(
            "input path is neither file nor directory: {}",
            path.display()
        );
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if has_image_extension(entry.path()) {
            images.push(entry.path().to_path_buf());
        } else {
            debug!("Skipping non-image file {}", entry.path().display());
        }
    }
    images.sort();
    Ok(images)
}

/// Like [`collect_images`], but an input without any image is an error.
pub fn collect_targets(path: &Path) -> Result<Vec<PathBuf>> {
    let images = collect_images(path)?;
    if images.is_empty() {
        anyhow::bail!(
            "no images found at {} (supported extensions: {})",
            path.display(),
            IMAGE_EXTENSIONS.join(", ")
        );
    }
    Ok(images)
}

/// An input image paired with the file it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
}

fn is_prior_output(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Resolve the destination of every image before anything is written.
///
/// Images whose stem already carries the output suffix are skipped as results of an
/// earlier run, and so are images whose destination is the image itself. Two
/// images mapping to one destination abort the run.
pub fn plan_outputs(images: &[PathBuf], options: &OutputOptions) -> Result<Vec<OutputPlan>> {
    let mut plans = Vec::with_capacity(images.len());
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for source in images {
        if is_prior_output(source, &options.suffix) {
            info!(
                "Skipping {}: name already ends with '{}'",
                source.display(),
                options.suffix
            );
            continue;
        }
        let destination = output_path_for(source, options);
        if same_file(source, &destination) {
            warn!(
                "Skipping {}: output would overwrite the input (set a suffix or an output directory)",
                source.display()
            );
            continue;
        }
        if let Some(previous) = claimed.insert(destination.clone(), source) {
            anyhow::bail!(
                "{} and {} would both be written to {}; use a different suffix or output directory",
                previous.display(),
                source.display(),
                destination.display()
            );
        }
        plans.push(OutputPlan {
            source: source.clone(),
            destination,
        });
    }
    if plans.is_empty() {
        anyhow::bail!("nothing to process: every input was skipped");
    }
    Ok(plans)
}
