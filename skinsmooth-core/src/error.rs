use thiserror::Error;

/// Shape of a raster as `(width, height, channels)`.
pub type Shape = (usize, usize, usize);

/// Precondition failures reported by the smoothing pipeline.
///
/// Every stage validates before writing, so an error always means no output was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmoothError {
    #[error("image dimensions must be non-zero (got {width}x{height} with {channels} channel(s))")]
    InvalidDimensions {
        width: usize,
        height: usize,
        channels: usize,
    },
    #[error("buffer holds {actual} bytes but a {width}x{height}x{channels} raster needs {expected}")]
    BufferSizeMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{stage} does not support {channels} channel(s)")]
    UnsupportedChannels { stage: &'static str, channels: usize },
    #[error("offset map requires a non-empty axis and a non-zero step")]
    EmptyAxis,
    #[error("window radius must be at least 1")]
    InvalidRadius,
    #[error("smoothing level must be greater than zero")]
    InvalidSmoothingLevel,
    #[error("raster shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch { left: Shape, right: Shape },
}

pub type SmoothResult<T> = Result<T, SmoothError>;
