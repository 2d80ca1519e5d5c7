//! RGB skin-tone heuristic evaluated on 2x2 neighborhoods.
//!
//! Each position `(x, y)` is judged by the floor average of the block
//! `(x, y) (x + 1, y) (x, y + 1) (x + 1, y + 1)`; the block is clamped, not
//! reflected, at the last row and column. The same verdict feeds the global skin
//! ratio and the per-pixel compositing mask.

use crate::error::{SmoothError, SmoothResult};
use crate::raster::RasterView;

pub const MIN_RED: i32 = 60;
pub const MIN_GREEN: i32 = 40;
pub const MIN_BLUE: i32 = 20;
/// Minimum `R - G` separation.
pub const MIN_RED_GREEN_GAP: i32 = 10;
/// Minimum spread between the strongest and weakest channel.
pub const MIN_SPREAD: i32 = 10;

/// Fixed RGB skin test.
#[inline]
pub fn is_skin_tone(r: i32, g: i32, b: i32) -> bool {
    let spread = r.max(g).max(b) - r.min(g).min(b);
    r >= MIN_RED
        && g >= MIN_GREEN
        && b >= MIN_BLUE
        && r >= b
        && r - g >= MIN_RED_GREEN_GAP
        && spread >= MIN_SPREAD
}

/// Floor-averaged RGB of the 2x2 block anchored at `(x, y)`.
#[inline]
pub fn block_average(view: &RasterView<'_>, x: usize, y: usize) -> [i32; 3] {
    let next_x = (x + 1).min(view.width() - 1);
    let next_y = (y + 1).min(view.height() - 1);
    let corners = [
        view.pixel(x, y),
        view.pixel(next_x, y),
        view.pixel(x, next_y),
        view.pixel(next_x, next_y),
    ];
    let mut avg = [0i32; 3];
    for (c, slot) in avg.iter_mut().enumerate() {
        let total: i32 = corners.iter().map(|px| i32::from(px[c])).sum();
        *slot = total >> 2;
    }
    avg
}

fn require_color(view: &RasterView<'_>) -> SmoothResult<()> {
    if view.channels() < 3 {
        return Err(SmoothError::UnsupportedChannels {
            stage: "skin classification",
            channels: view.channels(),
        });
    }
    Ok(())
}

fn verdicts<'a>(view: &'a RasterView<'a>) -> impl Iterator<Item = bool> + 'a {
    (0..view.height()).flat_map(move |y| {
        (0..view.width()).map(move |x| {
            let [r, g, b] = block_average(view, x, y);
            is_skin_tone(r, g, b)
        })
    })
}

/// Count positions whose 2x2 block passes [`is_skin_tone`].
pub fn count_skin_blocks(view: &RasterView<'_>) -> SmoothResult<u32> {
    require_color(view)?;
    Ok(verdicts(view).filter(|&skin| skin).count() as u32)
}

/// Skin coverage as a percentage of all pixel positions.
pub fn ratio_from_count(skin_blocks: u32, width: usize, height: usize) -> f32 {
    skin_blocks as f32 / (width * height) as f32 * 100.0
}

/// Percentage of positions classified as skin.
pub fn skin_ratio(view: &RasterView<'_>) -> SmoothResult<f32> {
    let count = count_skin_blocks(view)?;
    Ok(ratio_from_count(count, view.width(), view.height()))
}

/// Row-major skin verdict for every pixel position.
pub fn skin_mask(view: &RasterView<'_>) -> SmoothResult<Vec<bool>> {
    require_color(view)?;
    Ok(verdicts(view).collect())
}
