//! Block scanning: grid origins and clipped block views.
//!
//! A [`BlockGrid`] enumerates block origins on a fixed stride in row-major
//! order. A [`BlockView`] borrows the rectangle starting at an origin,
//! clipped to the raster bounds, so blocks on the right and bottom edges may
//! be smaller than the nominal size.

use crate::raster::{DimensionError, Raster, Rgb};

/// A rectangle inside a raster, already clipped to the raster bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRect {
    /// Left column of the block
    pub x: usize,
    /// Top row of the block
    pub y: usize,
    /// Width after clipping
    pub width: usize,
    /// Height after clipping
    pub height: usize,
}

impl BlockRect {
    /// The rectangle from `(x, y)` to `(min(x + size, raster_width),
    /// min(y + size, raster_height))`.
    ///
    /// An origin outside the raster yields an empty rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// use block_quant::BlockRect;
    ///
    /// let rect = BlockRect::clipped(8, 0, 8, 10, 20);
    /// assert_eq!((rect.width, rect.height), (2, 8));
    /// ```
    pub fn clipped(
        x: usize,
        y: usize,
        size: usize,
        raster_width: usize,
        raster_height: usize,
    ) -> Self {
        let x_end = x.saturating_add(size).min(raster_width);
        let y_end = y.saturating_add(size).min(raster_height);
        Self {
            x,
            y,
            width: x_end.saturating_sub(x),
            height: y_end.saturating_sub(y),
        }
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` when the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A borrowed, clipped sub-view of a [`Raster`].
///
/// Coordinates passed to [`get`](Self::get) and [`row`](Self::row) are local
/// to the block.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    raster: &'a Raster,
    rect: BlockRect,
}

impl<'a> BlockView<'a> {
    pub(crate) fn new(raster: &'a Raster, rect: BlockRect) -> Self {
        debug_assert!(rect.is_empty() || rect.x + rect.width <= raster.width());
        debug_assert!(rect.is_empty() || rect.y + rect.height <= raster.height());
        Self { raster, rect }
    }

    /// The clipped rectangle this view covers.
    #[inline]
    pub fn rect(&self) -> BlockRect {
        self.rect
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.rect.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.rect.height
    }

    /// Number of pixels in the view.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.rect.area()
    }

    /// Returns `true` when the view covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Returns local row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= self.height()`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [Rgb] {
        assert!(y < self.rect.height, "row {} outside block", y);
        let row = self.raster.row(self.rect.y + y);
        &row[self.rect.x..self.rect.x + self.rect.width]
    }

    /// Returns the pixel at local `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the view.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.row(y)[x]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Rgb]> + 'a {
        let view = *self;
        (0..view.rect.height).map(move |y| view.row(y))
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + 'a {
        self.rows().flat_map(|row| row.iter().copied())
    }
}

/// Block origins on a fixed stride, enumerated top-to-bottom, left-to-right.
///
/// # Example
///
/// ```
/// use block_quant::BlockGrid;
///
/// let grid = BlockGrid::new(5, 3, 2).unwrap();
/// let origins: Vec<_> = grid.origins().collect();
/// assert_eq!(origins, vec![(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    block_size: usize,
    columns: usize,
    rows: usize,
}

impl BlockGrid {
    /// Create the grid for a `width` x `height` raster with stride
    /// `block_size`.
    ///
    /// A zero-area raster produces an empty grid.
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self, DimensionError> {
        if block_size == 0 {
            return Err(DimensionError::ZeroBlockSize);
        }
        Ok(Self {
            block_size,
            columns: width.div_ceil(block_size),
            rows: height.div_ceil(block_size),
        })
    }

    /// The stride between origins.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of origins per grid row.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of grid rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of origins.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Returns `true` when the grid has no origins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `(x, y)` origin at scan position `index`.
    #[inline]
    pub fn origin(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.len());
        let column = index % self.columns;
        let row = index / self.columns;
        (column * self.block_size, row * self.block_size)
    }

    /// Iterate origins in row-major scan order.
    pub fn origins(&self) -> impl Iterator<Item = (usize, usize)> {
        let grid = *self;
        (0..grid.len()).map(move |i| grid.origin(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> Raster {
        let pixels = (0..width * height)
            .map(|i| Rgb::new(i as u8, 0, 0))
            .collect();
        Raster::from_pixels(pixels, width, height).unwrap()
    }

    #[test]
    fn test_clipped_inside() {
        let rect = BlockRect::clipped(2, 2, 4, 10, 10);
        assert_eq!(
            rect,
            BlockRect {
                x: 2,
                y: 2,
                width: 4,
                height: 4
            }
        );
    }

    #[test]
    fn test_clipped_at_edges() {
        let rect = BlockRect::clipped(6, 4, 8, 7, 5);
        assert_eq!((rect.width, rect.height), (1, 1));
    }

    #[test]
    fn test_clipped_outside_is_empty() {
        let rect = BlockRect::clipped(12, 0, 8, 10, 10);
        assert!(rect.is_empty());
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn test_clipped_does_not_overflow() {
        let rect = BlockRect::clipped(usize::MAX - 1, 0, 8, usize::MAX, 1);
        assert_eq!(rect.width, 1);
    }

    #[test]
    fn test_view_local_coordinates() {
        let raster = numbered(4, 4);
        let view = raster.block(2, 1, 2);
        assert_eq!(view.get(0, 0), Rgb::new(6, 0, 0));
        assert_eq!(view.get(1, 1), Rgb::new(11, 0, 0));
        assert_eq!(view.row(1), &raster.row(2)[2..4]);
    }

    #[test]
    fn test_view_pixels_row_major() {
        let raster = numbered(3, 3);
        let view = raster.block(1, 1, 2);
        let reds: Vec<u8> = view.pixels().map(|p| p.r).collect();
        assert_eq!(reds, vec![4, 5, 7, 8]);
    }

    #[test]
    fn test_grid_zero_block_size() {
        assert_eq!(
            BlockGrid::new(4, 4, 0).unwrap_err(),
            DimensionError::ZeroBlockSize
        );
    }

    #[test]
    fn test_grid_zero_area_has_no_origins() {
        let grid = BlockGrid::new(0, 7, 8).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.origins().count(), 0);
    }

    #[test]
    fn test_grid_counts_partial_cells() {
        let grid = BlockGrid::new(17, 8, 8).unwrap();
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.origin(2), (16, 0));
    }
}
