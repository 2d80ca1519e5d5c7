use crate::error::{SmoothError, SmoothResult};
use crate::raster::{Raster, RasterView};
use crate::skin::skin_mask;

/// Copy original pixels back over `denoised` wherever the denoised pixel is not skin.
///
/// The mask is evaluated on the denoised raster before anything is reverted, so each
/// verdict sees smoothed neighbours only. Returns the number of reverted pixels.
pub fn restore_non_skin(original: RasterView<'_>, denoised: &mut Raster) -> SmoothResult<usize> {
    if original.shape() != denoised.shape() {
        return Err(SmoothError::ShapeMismatch {
            left: original.shape(),
            right: denoised.shape(),
        });
    }
    let mask = skin_mask(&denoised.view())?;
    let channels = original.channels();
    let mut reverted = 0;
    for ((dst, src), is_skin) in denoised
        .as_bytes_mut()
        .chunks_exact_mut(channels)
        .zip(original.data().chunks_exact(channels))
        .zip(mask)
    {
        if !is_skin {
            dst.copy_from_slice(src);
            reverted += 1;
        }
    }
    Ok(reverted)
}
