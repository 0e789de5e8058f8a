//! The `Surface` capability trait shared by grids and views.
//!
//! Everything the editor and the renderers need from a cell surface goes
//! through this trait, so both own-storage grids and borrowed windows can
//! sit behind `&mut dyn Surface` interchangeably.

use crate::layout::Rect;
use crate::render::Font;
use crate::surface::{Cell, Color};

/// A rectangular field of cells with rendering metadata.
///
/// Coordinate convention is row-major with `index = y * width + x`.
/// The indexed accessors ([`cell`](Surface::cell), [`cell_at`](Surface::cell_at))
/// are unchecked and panic on out-of-range input; callers validate first with
/// [`index_of`](Surface::index_of) or [`is_valid_cell`](Surface::is_valid_cell).
pub trait Surface {
    /// Width in cells.
    fn width(&self) -> i32;

    /// Height in cells.
    fn height(&self) -> i32;

    /// Cell at a flat index. Unchecked.
    fn cell(&self, index: usize) -> &Cell;

    /// Mutable cell at a flat index. Unchecked.
    fn cell_mut(&mut self, index: usize) -> &mut Cell;

    /// The color used for foregrounds when a cell is cleared.
    fn default_foreground(&self) -> Color;

    /// The color used for backgrounds when a cell is cleared.
    fn default_background(&self) -> Color;

    /// The tint overlaid on the whole surface when rendered.
    fn tint(&self) -> Color;

    /// The font supplying glyph and cell metrics.
    fn font(&self) -> &Font;

    /// Per-cell pixel rectangles, one per cell, flat-indexed.
    fn render_rects(&self) -> &[Rect];

    /// Total number of cells.
    #[inline]
    fn cell_count(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    /// Check whether a coordinate lies on the surface.
    #[inline]
    fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    /// Check whether a flat index lies on the surface.
    #[inline]
    fn is_valid_index(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Flat index of a coordinate, or `None` when off the surface.
    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_valid_cell(x, y) {
            Some((y * self.width() + x) as usize)
        } else {
            None
        }
    }

    /// Coordinate of a flat index. Inverse of [`index_of`](Surface::index_of)
    /// for in-range indexes.
    #[inline]
    fn point_of(&self, index: usize) -> (i32, i32) {
        let width = self.width();
        let index = index as i32;
        (index % width, index / width)
    }

    /// Cell at a coordinate. Unchecked.
    #[inline]
    fn cell_at(&self, x: i32, y: i32) -> &Cell {
        self.cell((y * self.width() + x) as usize)
    }

    /// Mutable cell at a coordinate. Unchecked.
    #[inline]
    fn cell_at_mut(&mut self, x: i32, y: i32) -> &mut Cell {
        self.cell_mut((y * self.width() + x) as usize)
    }

    /// Pixel-space bounds of the surface at origin (0, 0).
    #[inline]
    fn pixel_bounds(&self) -> Rect {
        let font = self.font();
        Rect::from_size(
            self.width() * font.cell_width(),
            self.height() * font.cell_height(),
        )
    }
}

/// Build the per-cell pixel rectangle cache for a `width` x `height` surface.
///
/// Row-major, flat-indexed to match cell storage. Shared by [`Grid`] and
/// [`SubView`] so a font change or window move rebuilds through one path.
///
/// [`Grid`]: super::Grid
/// [`SubView`]: super::SubView
pub fn build_render_rects(font: &Font, width: i32, height: i32) -> Vec<Rect> {
    let mut rects = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            rects.push(font.render_rect(x, y));
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Font, FontSize};
    use crate::surface::Grid;
    use std::sync::Arc;

    fn test_font() -> Arc<Font> {
        Arc::new(Font::test_font(8, 16, FontSize::One))
    }

    #[test]
    fn test_index_point_inverse() {
        let grid = Grid::new(7, 5, test_font()).unwrap();
        for y in 0..5 {
            for x in 0..7 {
                let index = grid.index_of(x, y).unwrap();
                assert_eq!(grid.point_of(index), (x, y));
            }
        }
    }

    #[test]
    fn test_index_of_out_of_range() {
        let grid = Grid::new(4, 4, test_font()).unwrap();
        assert_eq!(grid.index_of(-1, 0), None);
        assert_eq!(grid.index_of(0, -1), None);
        assert_eq!(grid.index_of(4, 0), None);
        assert_eq!(grid.index_of(0, 4), None);
        assert_eq!(grid.index_of(3, 3), Some(15));
    }

    #[test]
    fn test_build_render_rects() {
        let font = test_font();
        let rects = build_render_rects(&font, 3, 2);
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], Rect::new(0, 0, 8, 16));
        assert_eq!(rects[2], Rect::new(16, 0, 8, 16));
        assert_eq!(rects[3], Rect::new(0, 16, 8, 16));
        assert_eq!(rects[5], Rect::new(16, 16, 8, 16));
    }

    #[test]
    fn test_pixel_bounds() {
        let grid = Grid::new(10, 4, test_font()).unwrap();
        assert_eq!(grid.pixel_bounds(), Rect::from_size(80, 64));
    }
}
