//! Whole-image outputs pinned byte for byte.
//!
//! Expected bytes were recorded from the integer algorithm on the same synthetic
//! textures. Drift in window bookkeeping, curve entries or compositing fails here.

use skinsmooth_core::{
    Raster, SmoothingCurve, SmoothingOutcome, SmoothingParams, denoise, smooth_skin,
};

/// Cool, non-skin left third and a warm, skin-toned rest, both with texture.
fn texture(width: usize, height: usize) -> Raster {
    let mut raster = Raster::filled(width, height, &[0, 0, 0]).expect("raster");
    for y in 0..height {
        for x in 0..width {
            let px = if x < width / 3 {
                [
                    40 + (x * 17 + y * 5) % 40,
                    80 + (x * 3 + y * 23) % 50,
                    150 + (x * 11 + y * 7) % 60,
                ]
            } else {
                [
                    150 + (x * 37 + y * 11) % 80,
                    100 + (x * 13 + y * 29) % 60,
                    70 + (x * 7 + y * 19) % 50,
                ]
            };
            raster
                .pixel_mut(x, y)
                .copy_from_slice(&px.map(|v| v as u8));
        }
    }
    raster
}

const DENOISE_9X7_LEVEL10_R5: [u8; 189] = [
    19, 91, 147, 45, 95, 154, 70, 97, 161, 173, 125, 92, 204, 130, 101,
    171, 113, 108, 200, 120, 112, 172, 126, 113, 197, 132, 87, 27, 109, 151,
    53, 110, 159, 77, 112, 166, 181, 112, 114, 212, 119, 118, 180, 126, 75,
    208, 131, 84, 179, 111, 93, 200, 122, 95, 35, 120, 156, 60, 121, 163,
    27, 94, 170, 190, 125, 78, 157, 131, 88, 188, 111, 96, 156, 120, 103,
    186, 126, 105, 204, 132, 101, 43, 107, 161, 68, 109, 168, 34, 110, 175,
    198, 111, 101, 166, 119, 108, 196, 125, 113, 165, 131, 116, 193, 136, 81,
    173, 121, 90, 50, 119, 167, 74, 119, 174, 42, 121, 180, 206, 125, 119,
    175, 131, 72, 204, 111, 83, 173, 120, 91, 200, 126, 98, 179, 132, 97,
    58, 106, 171, 24, 106, 178, 49, 109, 185, 152, 112, 85, 183, 119, 95,
    150, 125, 102, 181, 131, 108, 206, 135, 110, 185, 120, 84, 65, 118, 176,
    31, 118, 183, 57, 120, 151, 161, 125, 107, 191, 129, 115, 159, 135, 119,
    189, 119, 78, 159, 125, 88, 189, 131, 93,
];

const DENOISE_6X5_LEVEL2_R8: [u8; 90] = [
    0, 80, 146, 15, 84, 155, 220, 125, 81, 179, 134, 89, 214, 142, 96,
    173, 108, 104, 0, 105, 151, 24, 109, 161, 154, 146, 103, 190, 110, 110,
    224, 120, 117, 183, 130, 64, 2, 125, 157, 33, 127, 167, 165, 123, 67,
    200, 133, 75, 159, 142, 83, 194, 105, 89, 12, 101, 163, 43, 104, 172,
    176, 144, 90, 210, 108, 97, 169, 119, 105, 204, 128, 112, 22, 122, 168,
    52, 124, 178, 186, 122, 110, 221, 131, 117, 180, 141, 67, 215, 102, 75,
];

const SMOOTH_10X8_LEVEL10_FILTERED: [u8; 240] = [
    40, 80, 150, 57, 83, 161, 74, 86, 172, 177, 129, 95, 201, 135, 98,
    191, 117, 101, 195, 120, 104, 185, 128, 105, 189, 137, 84, 173, 146, 86,
    45, 103, 157, 62, 106, 168, 79, 109, 179, 184, 113, 113, 203, 124, 100,
    190, 129, 87, 197, 127, 90, 188, 114, 95, 198, 124, 95, 182, 135, 92,
    50, 126, 164, 67, 129, 175, 44, 82, 186, 193, 122, 78, 177, 130, 93,
    191, 117, 96, 171, 123, 96, 191, 129, 99, 202, 133, 97, 188, 137, 80,
    55, 99, 171, 72, 102, 182, 49, 105, 193, 201, 113, 99, 184, 122, 97,
    189, 127, 99, 178, 131, 102, 190, 137, 89, 176, 125, 90, 193, 133, 91,
    60, 122, 178, 77, 125, 189, 54, 128, 200, 209, 122, 119, 186, 128, 87,
    194, 115, 90, 184, 125, 95, 194, 130, 95, 183, 135, 94, 198, 135, 94,
    65, 95, 185, 42, 98, 196, 59, 101, 207, 154, 117, 86, 187, 124, 96,
    166, 130, 96, 187, 134, 99, 198, 135, 97, 189, 123, 84, 209, 131, 87,
    70, 118, 192, 47, 121, 203, 64, 124, 154, 162, 120, 108, 185, 131, 99,
    174, 138, 102, 186, 126, 89, 172, 128, 90, 192, 133, 93, 211, 133, 95,
    75, 91, 199, 52, 94, 150, 68, 104, 153, 172, 109, 77, 193, 121, 86,
    185, 130, 90, 188, 138, 94, 179, 137, 96, 189, 118, 103, 170, 124, 108,
];

#[test]
fn denoise_radius_five_matches_recorded_output() {
    let input = texture(9, 7);
    let curve = SmoothingCurve::new(10).expect("curve");
    let output = denoise(input.view(), 5, &curve).expect("denoise");
    assert_eq!(output.as_bytes(), DENOISE_9X7_LEVEL10_R5.as_slice());
}

#[test]
fn denoise_radius_beyond_both_sides_matches_recorded_output() {
    let input = texture(6, 5);
    let curve = SmoothingCurve::new(2).expect("curve");
    let output = denoise(input.view(), 8, &curve).expect("denoise");
    assert_eq!(output.as_bytes(), DENOISE_6X5_LEVEL2_R8.as_slice());
}

#[test]
fn filtered_pipeline_matches_recorded_output() {
    let input = texture(10, 8);
    let params = SmoothingParams {
        apply_skin_filter: true,
        ..SmoothingParams::default()
    };
    let output = smooth_skin(input.view(), &params).expect("smooth");
    assert_eq!(output.image.as_bytes(), SMOOTH_10X8_LEVEL10_FILTERED.as_slice());

    let SmoothingOutcome::Smoothed(report) = output.outcome else {
        panic!("color input should be smoothed");
    };
    assert_eq!(report.skin_blocks, 57);
    assert_eq!(report.radius, 1);
    assert_eq!(report.reverted_pixels, Some(23));
}

#[test]
fn unfiltered_pipeline_only_differs_on_non_skin_pixels() {
    let input = texture(10, 8);
    let plain = smooth_skin(input.view(), &SmoothingParams::default()).expect("smooth");
    let differing = plain
        .image
        .as_bytes()
        .chunks(3)
        .zip(SMOOTH_10X8_LEVEL10_FILTERED.chunks(3))
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(differing, 23);
}
