use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb};
use serde_json::Value;
use tempfile::tempdir;

fn run_cli(work_dir: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_skinsmooth-cli"))
        .current_dir(work_dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
}

fn write_portrait(path: &Path) -> Result<(), Box<dyn Error>> {
    let img = ImageBuffer::from_fn(40, 30, |x, y| {
        if (10..30).contains(&x) && (5..25).contains(&y) {
            let shade = ((x + y) % 2 * 18) as u8;
            Rgb([200 - shade, 150 - shade, 120 - shade])
        } else {
            Rgb([30, 70, 130])
        }
    });
    img.save(path)?;
    Ok(())
}

#[test]
fn smooths_single_image_and_writes_json_report() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let image_path = work_dir.path().join("portrait.png");
    let json_path = work_dir.path().join("report.json");
    write_portrait(&image_path)?;

    let output = run_cli(
        work_dir.path(),
        &[
            "--input",
            image_path.to_str().ok_or("path")?,
            "--skin-filter",
            "--json",
            json_path.to_str().ok_or("path")?,
        ],
    )?;
    assert!(
        output.status.success(),
        "cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let smoothed = work_dir.path().join("portrait_out.jpg");
    assert!(smoothed.is_file(), "expected {}", smoothed.display());
    let decoded = image::open(&smoothed)?;
    assert_eq!((decoded.width(), decoded.height()), (40, 30));

    let report: Value = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    let entries = report.as_array().ok_or("report should be an array")?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "smoothed");
    assert!(entries[0]["skin_blocks"].as_u64().unwrap_or(0) > 0);
    assert!(entries[0]["reverted_pixels"].is_u64());
    Ok(())
}

#[test]
fn directory_batch_honours_output_options() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let inputs = work_dir.path().join("inputs");
    let outputs = work_dir.path().join("smoothed");
    fs::create_dir_all(&inputs)?;
    write_portrait(&inputs.join("a.png"))?;
    write_portrait(&inputs.join("b.bmp"))?;
    DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([100]))).save(inputs.join("c.png"))?;
    fs::write(inputs.join("readme.txt"), "not an image")?;

    let output = run_cli(
        work_dir.path(),
        &[
            "--input",
            inputs.to_str().ok_or("path")?,
            "--output-dir",
            outputs.to_str().ok_or("path")?,
            "--suffix",
            "_soft",
            "--format",
            "png",
            "--smoothing-level",
            "5",
        ],
    )?;
    assert!(
        output.status.success(),
        "cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for name in ["a_soft.png", "b_soft.png", "c_soft.png"] {
        assert!(outputs.join(name).is_file(), "missing {name}");
    }

    let report: Value = serde_json::from_slice(&output.stdout)?;
    let statuses: Vec<&str> = report
        .as_array()
        .ok_or("report should be an array")?
        .iter()
        .filter_map(|entry| entry["status"].as_str())
        .collect();
    assert_eq!(statuses, vec!["smoothed", "smoothed", "pass_through"]);

    let gray = image::open(outputs.join("c_soft.png"))?.to_luma8();
    assert!(gray.pixels().all(|px| px.0 == [100]));
    Ok(())
}

#[test]
fn settings_file_in_working_directory_is_used() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let config_dir = work_dir.path().join("config");
    fs::create_dir_all(&config_dir)?;
    fs::write(
        config_dir.join("skinsmooth.json"),
        r#"{ "output": { "suffix": "_cfg", "format": "png" } }"#,
    )?;
    let image_path = work_dir.path().join("face.png");
    write_portrait(&image_path)?;

    let output = run_cli(work_dir.path(), &["--input", "face.png"])?;
    assert!(
        output.status.success(),
        "cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(work_dir.path().join("face_cfg.png").is_file());
    Ok(())
}

#[test]
fn fails_when_every_image_fails() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let broken = work_dir.path().join("broken.jpg");
    fs::write(&broken, b"definitely not a jpeg")?;

    let output = run_cli(work_dir.path(), &["--input", broken.to_str().ok_or("path")?])?;
    assert!(!output.status.success());
    assert!(!work_dir.path().join("broken_out.jpg").exists());
    Ok(())
}

#[test]
fn empty_directory_is_rejected() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let empty = work_dir.path().join("empty");
    fs::create_dir_all(&empty)?;

    let output = run_cli(work_dir.path(), &["--input", empty.to_str().ok_or("path")?])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no images found"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn same_stem_inputs_are_rejected_before_writing() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let inputs = work_dir.path().join("inputs");
    fs::create_dir_all(&inputs)?;
    write_portrait(&inputs.join("a.png"))?;
    write_portrait(&inputs.join("a.bmp"))?;

    let output = run_cli(work_dir.path(), &["--input", inputs.to_str().ok_or("path")?])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a_out.jpg"), "stderr: {stderr}");
    assert!(!inputs.join("a_out.jpg").exists());
    Ok(())
}

#[test]
fn empty_suffix_never_overwrites_the_input() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let image_path = work_dir.path().join("face.jpg");
    write_portrait(&image_path)?;
    let before = fs::read(&image_path)?;

    let output = run_cli(
        work_dir.path(),
        &["--input", image_path.to_str().ok_or("path")?, "--suffix", ""],
    )?;
    assert!(!output.status.success());
    assert_eq!(fs::read(&image_path)?, before);
    Ok(())
}

#[test]
fn rerun_skips_previous_outputs() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let inputs = work_dir.path().join("inputs");
    fs::create_dir_all(&inputs)?;
    write_portrait(&inputs.join("face.png"))?;
    let input_arg = inputs.to_str().ok_or("path")?;

    for _ in 0..2 {
        let output = run_cli(work_dir.path(), &["--input", input_arg])?;
        assert!(
            output.status.success(),
            "cli failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let report: Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(report.as_array().map(Vec::len), Some(1));
    }
    assert!(inputs.join("face_out.jpg").is_file());
    assert!(!inputs.join("face_out_out.jpg").exists());
    Ok(())
}
