mod args;
mod config;
mod input;
mod processing;
mod types;

use std::fs::{self, File};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use rayon::prelude::*;
use skinsmooth_core::SmoothingParams;
use skinsmooth_utils::{OutputOptions, configure_telemetry, init_logging, normalize_path};

use crate::{
    args::SmoothArgs,
    config::{apply_cli_overrides, load_settings},
    input::{collect_targets, plan_outputs},
    processing::process_image,
    types::ImageReport,
};

fn main() -> Result<()> {
    init_logging(log::LevelFilter::Info)?;
    let args = SmoothArgs::parse();
    debug!("skinsmooth-core {}", skinsmooth_core::version());

    let input_path = normalize_path(&args.input)?;
    let mut settings = load_settings(args.config.as_ref())?;
    apply_cli_overrides(&mut settings, &args);
    configure_telemetry(
        settings.telemetry.enabled,
        settings.telemetry.level_filter(),
    );

    let params = SmoothingParams::from(&settings.smoothing);
    let options = OutputOptions::from_settings(&settings.output);
    if let Some(dir) = options.directory.as_ref() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let images = collect_targets(&input_path)?;
    let plans = plan_outputs(&images, &options)?;
    info!(
        "Processing {} image(s) at smoothing level {}...",
        plans.len(),
        params.smoothing_level
    );

    let outcomes: Vec<_> = plans
        .par_iter()
        .map(|plan| {
            let outcome = process_image(&plan.source, &plan.destination, &params, &options);
            (plan, outcome)
        })
        .collect();

    let mut reports: Vec<ImageReport> = Vec::with_capacity(outcomes.len());
    for (plan, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(err) => warn!("Failed to process {}: {err:#}", plan.source.display()),
        }
    }

    if reports.is_empty() {
        anyhow::bail!("all images failed; nothing was written");
    }

    if let Some(json_path) = args.json.as_ref() {
        if let Some(dir) = json_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        let file = File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, &reports)
            .with_context(|| format!("failed to write report JSON to {}", json_path.display()))?;
        info!("Wrote report to {}", json_path.display());
    } else {
        let json = serde_json::to_string_pretty(&reports).context("failed to serialize report")?;
        println!("{json}");
    }

    Ok(())
}
