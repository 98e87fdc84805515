//! Owned row-major RGB raster.
//!
//! [`Raster`] is both the read-only input and the write-only output of a
//! compression run. Dimensions are fixed at construction.

use super::error::DimensionError;
use super::rgb::Rgb;
use crate::block::{BlockRect, BlockView};

/// A height x width grid of [`Rgb`] pixels stored in row-major order.
///
/// A raster with zero width or zero height is legal and simply has no
/// pixels.
///
/// # Example
///
/// ```
/// use block_quant::{Raster, Rgb};
///
/// let mut raster = Raster::new(3, 2);
/// assert_eq!(raster.get(2, 1), Some(Rgb::BLACK));
///
/// raster.set(2, 1, Rgb::WHITE);
/// assert_eq!(raster.get(2, 1), Some(Rgb::WHITE));
/// assert_eq!(raster.get(3, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Allocate a zero-initialized (all black) raster.
    ///
    /// # Panics
    ///
    /// Panics when [`try_new`](Self::try_new) would return an error.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(raster) => raster,
            Err(err) => panic!("{}", err),
        }
    }

    /// Allocate a zero-initialized (all black) raster.
    ///
    /// Returns [`DimensionError::TooLarge`] when the pixel buffer could not
    /// be addressed, the same check [`from_pixels`](Self::from_pixels) and
    /// [`from_rgb_bytes`](Self::from_rgb_bytes) apply.
    ///
    /// # Example
    ///
    /// ```
    /// use block_quant::{DimensionError, Raster};
    ///
    /// assert!(Raster::try_new(640, 480).is_ok());
    /// assert_eq!(
    ///     Raster::try_new(usize::MAX, 2).unwrap_err(),
    ///     DimensionError::TooLarge { width: usize::MAX, height: 2 }
    /// );
    /// ```
    pub fn try_new(width: usize, height: usize) -> Result<Self, DimensionError> {
        let len = pixel_count(width, height)?;
        // Vec allocations are limited to isize::MAX bytes
        let addressable = len
            .checked_mul(std::mem::size_of::<Rgb>())
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !addressable {
            return Err(DimensionError::TooLarge { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; len],
        })
    }

    /// Wrap an existing pixel buffer.
    ///
    /// Returns [`DimensionError::BufferLength`] when `pixels.len()` is not
    /// `width * height`.
    pub fn from_pixels(
        pixels: Vec<Rgb>,
        width: usize,
        height: usize,
    ) -> Result<Self, DimensionError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(DimensionError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a raster from interleaved `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use block_quant::{Raster, Rgb};
    ///
    /// let raster = Raster::from_rgb_bytes(&[255, 0, 0, 0, 0, 255], 2, 1).unwrap();
    /// assert_eq!(raster.get(1, 0), Some(Rgb::new(0, 0, 255)));
    /// ```
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self, DimensionError> {
        let expected = pixel_count(width, height)?
            .checked_mul(3)
            .ok_or(DimensionError::TooLarge { width, height })?;
        if bytes.len() != expected {
            return Err(DimensionError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns the raster width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` when the raster has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns all pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} raster",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[y * self.width + x] = color;
    }

    /// Returns row `y` as a slice of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Returns row `y` as a mutable slice of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Borrow the block whose top-left corner is `(x, y)` with edge `size`,
    /// clipped to the raster bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use block_quant::Raster;
    ///
    /// let raster = Raster::new(10, 6);
    /// let block = raster.block(8, 4, 4);
    /// assert_eq!((block.width(), block.height()), (2, 2));
    /// ```
    #[inline]
    pub fn block(&self, x: usize, y: usize, size: usize) -> BlockView<'_> {
        BlockView::new(self, BlockRect::clipped(x, y, size, self.width, self.height))
    }

    /// Flatten into interleaved `[R, G, B, ...]` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }

    /// Consume the raster, returning its pixel buffer.
    #[inline]
    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize, DimensionError> {
    width
        .checked_mul(height)
        .ok_or(DimensionError::TooLarge { width, height })
}
