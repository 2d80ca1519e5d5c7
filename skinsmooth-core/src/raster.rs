use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::{Shape, SmoothError, SmoothResult};

fn validate(len: usize, width: usize, height: usize, channels: usize) -> SmoothResult<()> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(SmoothError::InvalidDimensions {
            width,
            height,
            channels,
        });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(channels))
        .ok_or(SmoothError::InvalidDimensions {
            width,
            height,
            channels,
        })?;
    if len != expected {
        return Err(SmoothError::BufferSizeMismatch {
            width,
            height,
            channels,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Borrowed, row-major, channel-interleaved 8-bit raster.
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: usize,
    height: usize,
    channels: usize,
    data: &'a [u8],
}

impl<'a> RasterView<'a> {
    /// Wrap `data` after checking that it holds exactly `width * height * channels` samples.
    pub fn new(data: &'a [u8], width: usize, height: usize, channels: usize) -> SmoothResult<Self> {
        validate(data.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per scanline.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        (self.width, self.height, self.channels)
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride();
        &self.data[start..start + self.stride()]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let start = y * self.stride() + x * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Copy the view into an owned raster.
    pub fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.to_vec(),
        }
    }
}

/// Owned raster with the same layout as [`RasterView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: usize) -> SmoothResult<Self> {
        validate(data.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Raster where every pixel equals `pixel` (one sample per channel).
    pub fn filled(width: usize, height: usize, pixel: &[u8]) -> SmoothResult<Self> {
        let channels = pixel.len();
        let len = width.saturating_mul(height).saturating_mul(channels);
        validate(len, width, height, channels)?;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect();
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build a raster from a decoded image. Luma stays single-channel; anything else is
    /// converted to 8-bit RGB.
    pub fn from_image(image: &DynamicImage) -> SmoothResult<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        match image {
            DynamicImage::ImageLuma8(gray) => Self::new(gray.as_raw().clone(), width, height, 1),
            other => Self::new(other.to_rgb8().into_raw(), width, height, 3),
        }
    }

    /// Convert back into a decoded image for encoding.
    pub fn into_image(self) -> SmoothResult<DynamicImage> {
        let shape = self.shape();
        let actual = self.data.len();
        let dims = u32::try_from(self.width)
            .ok()
            .zip(u32::try_from(self.height).ok());
        let Some((width, height)) = dims else {
            return Err(SmoothError::InvalidDimensions {
                width: shape.0,
                height: shape.1,
                channels: shape.2,
            });
        };
        let mismatch = || SmoothError::BufferSizeMismatch {
            width: shape.0,
            height: shape.1,
            channels: shape.2,
            expected: shape.0 * shape.1 * shape.2,
            actual,
        };
        match self.channels {
            1 => GrayImage::from_raw(width, height, self.data)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(mismatch),
            3 => RgbImage::from_raw(width, height, self.data)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(mismatch),
            channels => Err(SmoothError::UnsupportedChannels {
                stage: "image conversion",
                channels,
            }),
        }
    }

    #[inline]
    pub fn view(&self) -> RasterView<'_> {
        RasterView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: &self.data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        (self.width, self.height, self.channels)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = (y * self.width + x) * self.channels;
        &mut self.data[start..start + self.channels]
    }
}
