use crate::error::{SmoothError, SmoothResult};

/// Number of representable 8-bit intensities.
pub const LEVELS: usize = 256;

/// Per-intensity resistance to smoothing.
///
/// Entry `i` is `max(1, trunc(0.5 * (exp(-i / (level * 255)) + level * (i + 1) + 1)))`,
/// evaluated in `f32`. The curve grows with intensity and scales with `level`, so a
/// larger level damps the variance correction more and smooths more gently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothingCurve {
    level: u32,
    table: [i64; LEVELS],
}

impl SmoothingCurve {
    pub fn new(level: u32) -> SmoothResult<Self> {
        if level == 0 {
            return Err(SmoothError::InvalidSmoothingLevel);
        }
        let scale = 1.0f32 / (level as f32 * 255.0);
        let mut table = [1i64; LEVELS];
        let mut counter = 0.0f32;
        for (i, entry) in table.iter_mut().enumerate() {
            let linear = (i64::from(level) * (i as i64 + 1)) as f32;
            let value = (((counter * scale).exp() + linear + 1.0) * 0.5) as i64;
            *entry = value.max(1);
            counter -= 1.0;
        }
        Ok(Self { level, table })
    }

    #[inline]
    pub fn resistance(&self, intensity: u8) -> i64 {
        self.table[intensity as usize]
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.table
    }
}
