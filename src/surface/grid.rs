//! Grid: owning, fixed-size cell storage.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::render::Font;
use crate::surface::traits::{build_render_rects, Surface};
use crate::surface::{Cell, Color};

/// An owning 2D field of cells.
///
/// Storage is row-major (`index = y * width + x`) and exactly
/// `width * height` long. Dimensions are fixed for the lifetime of the
/// value; resizing means building a new grid and copying into it.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    default_foreground: Color,
    default_background: Color,
    tint: Color,
    font: Arc<Font>,
    render_rects: Vec<Rect>,
}

impl Grid {
    /// Create a grid with every cell set to the default appearance
    /// (white foreground, transparent background, glyph 0).
    ///
    /// Errors with [`Error::InvalidDimensions`] when either dimension
    /// is less than 1.
    pub fn new(width: i32, height: i32, font: Arc<Font>) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let default_foreground = Color::WHITE;
        let default_background = Color::TRANSPARENT;
        let cells = vec![
            Cell::new(default_foreground, default_background);
            (width as usize) * (height as usize)
        ];
        let render_rects = build_render_rects(&font, width, height);
        Ok(Self {
            width,
            height,
            cells,
            default_foreground,
            default_background,
            tint: Color::TRANSPARENT,
            font,
            render_rects,
        })
    }

    /// Set the color new and cleared cells use for their foreground.
    #[inline]
    pub fn set_default_foreground(&mut self, color: Color) {
        self.default_foreground = color;
    }

    /// Set the color new and cleared cells use for their background.
    #[inline]
    pub fn set_default_background(&mut self, color: Color) {
        self.default_background = color;
    }

    /// Set the tint overlaid on the whole grid when rendered.
    #[inline]
    pub fn set_tint(&mut self, color: Color) {
        self.tint = color;
    }

    /// Shared handle to the grid's font.
    #[inline]
    pub fn font_arc(&self) -> &Arc<Font> {
        &self.font
    }

    /// Swap the font and rebuild the render-rectangle cache.
    ///
    /// Cell contents are untouched; only pixel metrics change.
    pub fn set_font(&mut self, font: Arc<Font>) {
        log::trace!(
            "grid font change: {} -> {}, rebuilding {} render rects",
            self.font.name(),
            font.name(),
            self.cells.len()
        );
        self.font = font;
        self.render_rects = build_render_rects(&self.font, self.width, self.height);
    }

    /// Iterate the cells in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterate `(x, y, &cell)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (i32, i32, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i as i32) % width, (i as i32) / width, cell))
    }

    /// Direct slice access to the cell storage.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Surface for Grid {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    #[inline]
    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    #[inline]
    fn default_foreground(&self) -> Color {
        self.default_foreground
    }

    #[inline]
    fn default_background(&self) -> Color {
        self.default_background
    }

    #[inline]
    fn tint(&self) -> Color {
        self.tint
    }

    #[inline]
    fn font(&self) -> &Font {
        &self.font
    }

    #[inline]
    fn render_rects(&self) -> &[Rect] {
        &self.render_rects
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FontSize;

    fn test_font() -> Arc<Font> {
        Arc::new(Font::test_font(8, 16, FontSize::One))
    }

    #[test]
    fn test_new_grid_defaults() {
        let grid = Grid::new(4, 3, test_font()).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.default_foreground(), Color::WHITE);
        assert_eq!(grid.default_background(), Color::TRANSPARENT);
        assert_eq!(grid.tint(), Color::TRANSPARENT);
        for cell in &grid {
            assert_eq!(cell.glyph, 0);
            assert_eq!(cell.foreground, Color::WHITE);
            assert_eq!(cell.background, Color::TRANSPARENT);
            assert_eq!(cell.effect, None);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Grid::new(0, 5, test_font()),
            Err(Error::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(matches!(
            Grid::new(5, -1, test_font()),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_render_rects_match_cells() {
        let grid = Grid::new(3, 2, test_font()).unwrap();
        assert_eq!(grid.render_rects().len(), grid.cell_count());
        assert_eq!(grid.render_rects()[4], Rect::new(8, 16, 8, 16));
    }

    #[test]
    fn test_set_font_rebuilds_rects() {
        let mut grid = Grid::new(3, 2, test_font()).unwrap();
        grid.set_font(Arc::new(Font::test_font(8, 16, FontSize::Two)));
        assert_eq!(grid.render_rects()[4], Rect::new(16, 32, 16, 32));
        assert_eq!(grid.pixel_bounds(), Rect::from_size(48, 64));
    }

    #[test]
    fn test_enumerate_order() {
        let grid = Grid::new(3, 2, test_font()).unwrap();
        let points: Vec<(i32, i32)> = grid.enumerate().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(points[0], (0, 0));
        assert_eq!(points[2], (2, 0));
        assert_eq!(points[3], (0, 1));
        assert_eq!(points[5], (2, 1));
    }
}
