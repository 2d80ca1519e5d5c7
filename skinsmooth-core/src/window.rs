//! Streaming box statistics over a `(2r + 1) x (2r + 1)` window.
//!
//! The scanner keeps one running `(sum, sum of squares)` pair per column and channel.
//! Row 0 seeds every column from `2r + 1` reflected rows; each later row only
//! subtracts the scanline leaving the window and adds the one entering it. Within a
//! row the same trick runs across the column accumulators, so after the one-off seed
//! every pixel costs O(1) regardless of the radius.

use crate::error::{SmoothError, SmoothResult};
use crate::offsets::OffsetMap;
use crate::raster::RasterView;

/// Largest channel count the scanner handles.
pub const MAX_CHANNELS: usize = 3;

/// Window totals for the pixel currently being visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSums {
    sums: [i64; MAX_CHANNELS],
    squares: [i64; MAX_CHANNELS],
    area: i64,
}

impl WindowSums {
    /// `Σx` over the window for channel `c`.
    #[inline]
    pub fn sum(&self, c: usize) -> i64 {
        self.sums[c]
    }

    /// `Σx²` over the window for channel `c`.
    #[inline]
    pub fn squares(&self, c: usize) -> i64 {
        self.squares[c]
    }

    /// Number of samples per channel, `(2r + 1)²`.
    #[inline]
    pub fn area(&self) -> i64 {
        self.area
    }

    fn clear(&mut self) {
        self.sums = [0; MAX_CHANNELS];
        self.squares = [0; MAX_CHANNELS];
    }
}

pub struct WindowScanner<'a> {
    view: RasterView<'a>,
    radius: usize,
    /// Row positions to reflected row indices.
    rows: OffsetMap,
    /// Column positions to sample offsets within a scanline.
    columns: OffsetMap,
    column_sums: Vec<i64>,
    column_squares: Vec<i64>,
}

impl<'a> WindowScanner<'a> {
    pub fn new(view: RasterView<'a>, radius: usize) -> SmoothResult<Self> {
        if radius == 0 {
            return Err(SmoothError::InvalidRadius);
        }
        if !matches!(view.channels(), 1 | 3) {
            return Err(SmoothError::UnsupportedChannels {
                stage: "sliding window",
                channels: view.channels(),
            });
        }
        let stride = view.stride();
        Ok(Self {
            rows: OffsetMap::build(view.height(), radius, 1)?,
            columns: OffsetMap::build(view.width(), radius, view.channels())?,
            column_sums: vec![0; stride],
            column_squares: vec![0; stride],
            view,
            radius,
        })
    }

    pub fn area(&self) -> i64 {
        let side = 2 * self.radius as i64 + 1;
        side * side
    }

    /// Visit every pixel in row-major order with its window totals.
    pub fn scan<F>(mut self, mut visit: F)
    where
        F: FnMut(usize, usize, &WindowSums),
    {
        let radius = self.radius as isize;
        let channels = self.view.channels();
        let mut window = WindowSums {
            area: self.area(),
            ..WindowSums::default()
        };

        for y in 0..self.view.height() {
            if y == 0 {
                self.seed_columns();
            } else {
                self.advance_columns(y as isize);
            }

            window.clear();
            for z in -radius..=radius {
                let index = self.columns.at(z);
                for c in 0..channels {
                    window.sums[c] += self.column_sums[index + c];
                    window.squares[c] += self.column_squares[index + c];
                }
            }
            visit(0, y, &window);

            for x in 1..self.view.width() {
                let leaving = self.columns.at(x as isize - radius - 1);
                let entering = self.columns.at(x as isize + radius);
                for c in 0..channels {
                    window.sums[c] +=
                        self.column_sums[entering + c] - self.column_sums[leaving + c];
                    window.squares[c] +=
                        self.column_squares[entering + c] - self.column_squares[leaving + c];
                }
                visit(x, y, &window);
            }
        }
    }

    fn seed_columns(&mut self) {
        let radius = self.radius as isize;
        self.column_sums.fill(0);
        self.column_squares.fill(0);
        for z in -radius..=radius {
            let row = self.view.row(self.rows.at(z));
            for ((sum, square), &sample) in self
                .column_sums
                .iter_mut()
                .zip(self.column_squares.iter_mut())
                .zip(row)
            {
                let sample = i64::from(sample);
                *sum += sample;
                *square += sample * sample;
            }
        }
    }

    fn advance_columns(&mut self, y: isize) {
        let radius = self.radius as isize;
        let leaving = self.view.row(self.rows.at(y - radius - 1));
        let entering = self.view.row(self.rows.at(y + radius));
        for (((sum, square), &old), &new) in self
            .column_sums
            .iter_mut()
            .zip(self.column_squares.iter_mut())
            .zip(leaving)
            .zip(entering)
        {
            let (old, new) = (i64::from(old), i64::from(new));
            *sum += new - old;
            *square += new * new - old * old;
        }
    }
}
