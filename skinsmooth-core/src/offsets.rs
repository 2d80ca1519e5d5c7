//! Boundary-reflected index tables.
//!
//! A window of radius `r` centered anywhere on an axis of length `n` reads logical
//! positions in `[-r, n + r)`. The map resolves each of them to an in-bounds offset by
//! mirroring across the image edges (the edge sample itself is repeated), so windows
//! near a border see interior pixels instead of padding.

use crate::error::{SmoothError, SmoothResult};

/// Mirror a logical coordinate into `[0, length)`.
///
/// Coordinates are first wrapped into `[0, 2 * length)`, so radii larger than the axis
/// keep bouncing between the edges.
#[inline]
pub fn reflect_index(pos: isize, length: usize) -> usize {
    let length = length as isize;
    let period = 2 * length;
    let wrapped = pos.rem_euclid(period);
    let mirrored = if wrapped >= length {
        period - 1 - wrapped
    } else {
        wrapped
    };
    mirrored as usize
}

/// Precomputed offsets for logical positions `-radius ..= length + radius - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    offsets: Vec<usize>,
    radius: usize,
}

impl OffsetMap {
    /// Build the table for an axis of `length` samples, multiplying each reflected index
    /// by `step` (samples per column, or samples per scanline).
    pub fn build(length: usize, radius: usize, step: usize) -> SmoothResult<Self> {
        if length == 0 || step == 0 {
            return Err(SmoothError::EmptyAxis);
        }
        let first = -(radius as isize);
        let last = (length + radius) as isize;
        let offsets = (first..last)
            .map(|pos| reflect_index(pos, length) * step)
            .collect();
        Ok(Self { offsets, radius })
    }

    /// Offset for a logical position. Panics outside `[-radius, length + radius)`.
    #[inline]
    pub fn at(&self, pos: isize) -> usize {
        self.offsets[(pos + self.radius as isize) as usize]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }
}
