//! The immediate renderer: surface cells in, draw primitives out.

use crate::render::{
    DrawPrimitive, DrawSink, Font, DEPTH_BACKGROUND, DEPTH_CELL_BACKGROUND, DEPTH_GLYPH,
    DEPTH_TINT,
};
use crate::surface::Surface;

/// Where a surface lands on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
    /// A cell coordinate, scaled by the surface font's cell size.
    Cell(i32, i32),
    /// A raw pixel coordinate.
    Pixel(i32, i32),
}

impl Position {
    /// Resolve to a pixel translation under `font`.
    #[inline]
    pub const fn resolve(self, font: &Font) -> (i32, i32) {
        match self {
            Self::Cell(x, y) => (x * font.cell_width(), y * font.cell_height()),
            Self::Pixel(x, y) => (x, y),
        }
    }
}

/// Stateless renderer walking a surface once per call.
///
/// Layers, bottom to top: surface default background, per-cell
/// backgrounds, glyphs, tint. Primitives carry matching depth values and
/// are emitted in that same order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer;

impl Renderer {
    /// Create a renderer.
    pub const fn new() -> Self {
        Self
    }

    /// Render `surface` at `position` into `sink`.
    ///
    /// An opaque tint covers everything, so it short-circuits to a single
    /// full-area primitive.
    pub fn render(&self, surface: &dyn Surface, position: Position, sink: &mut dyn DrawSink) {
        let font = surface.font();
        sink.begin(position.resolve(font));

        let tint = surface.tint();
        let bounds = surface.pixel_bounds();
        if tint.is_opaque() {
            sink.draw(DrawPrimitive::quad(
                font.texture(),
                bounds,
                font.solid_rect(),
                tint,
                DEPTH_TINT,
            ));
            sink.end();
            return;
        }

        self.emit_cells(surface, sink);

        // Translucent tint overlays the content instead of replacing it.
        if !tint.is_transparent() {
            sink.draw(DrawPrimitive::quad(
                font.texture(),
                bounds,
                font.solid_rect(),
                tint,
                DEPTH_TINT,
            ));
        }
        sink.end();
    }

    /// Emit the tint-free content layers. Shared with the cached pipeline,
    /// which applies tint fresh on every frame instead of baking it.
    pub(crate) fn emit_cells(self, surface: &dyn Surface, sink: &mut dyn DrawSink) {
        let font = surface.font();
        let texture = font.texture();
        let solid = font.solid_rect();

        let default_background = surface.default_background();
        if !default_background.is_transparent() {
            sink.draw(DrawPrimitive::quad(
                texture,
                surface.pixel_bounds(),
                solid,
                default_background,
                DEPTH_BACKGROUND,
            ));
        }

        let rects = surface.render_rects();
        for index in 0..surface.cell_count() {
            let cell = surface.cell(index);
            if !cell.is_visible() {
                continue;
            }
            let dest = rects[index];
            // The full-area fill already painted the default background.
            if !cell.background.is_transparent() && cell.background != default_background {
                sink.draw(DrawPrimitive::quad(
                    texture,
                    dest,
                    solid,
                    cell.background,
                    DEPTH_CELL_BACKGROUND,
                ));
            }
            if !cell.foreground.is_transparent() {
                let mut glyph = DrawPrimitive::quad(
                    texture,
                    dest,
                    font.glyph_rect(cell.glyph),
                    cell.foreground,
                    DEPTH_GLYPH,
                );
                glyph.mirror = cell.mirror;
                sink.draw(glyph);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::render::{BatchSink, FontSize};
    use crate::surface::{Color, Grid, Mirror};
    use std::sync::Arc;

    fn test_grid(width: i32, height: i32) -> Grid {
        let font = Arc::new(Font::test_font(8, 16, FontSize::One));
        Grid::new(width, height, font).unwrap()
    }

    fn render(grid: &Grid, position: Position) -> Vec<DrawPrimitive> {
        let mut sink = BatchSink::new();
        Renderer::new().render(grid, position, &mut sink);
        sink.primitives().to_vec()
    }

    #[test]
    fn test_fresh_surface_emits_glyph_layer_only() {
        // Default cells: transparent background, opaque white foreground.
        // Visibility keys off the colors, so glyph 0 still draws its quad.
        let grid = test_grid(2, 2);
        let prims = render(&grid, Position::Pixel(0, 0));
        assert_eq!(prims.len(), 4);
        assert!(prims.iter().all(|p| p.depth == DEPTH_GLYPH));
    }

    #[test]
    fn test_opaque_tint_short_circuits() {
        let mut grid = test_grid(3, 3);
        grid.set_default_background(Color::BLACK);
        grid.cell_at_mut(0, 0).glyph = 65;
        grid.set_tint(Color::rgb(200, 0, 0));

        let prims = render(&grid, Position::Pixel(0, 0));
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].depth, DEPTH_TINT);
        assert_eq!(prims[0].color, Color::rgb(200, 0, 0));
        assert_eq!(prims[0].dest, Rect::from_size(24, 48));
    }

    #[test]
    fn test_translucent_tint_overlays() {
        let mut grid = test_grid(2, 1);
        grid.set_tint(Color::new(0, 0, 255, 100));
        let prims = render(&grid, Position::Pixel(0, 0));
        let last = prims.last().unwrap();
        assert_eq!(last.depth, DEPTH_TINT);
        assert_eq!(last.color, Color::new(0, 0, 255, 100));
        // Content still rendered underneath.
        assert!(prims.len() > 1);
    }

    #[test]
    fn test_layer_order_and_depths() {
        let mut grid = test_grid(2, 1);
        grid.set_default_background(Color::BLACK);
        grid.cell_at_mut(0, 0).background = Color::rgb(0, 0, 50);
        grid.set_tint(Color::new(255, 255, 255, 10));

        let prims = render(&grid, Position::Pixel(0, 0));
        let depths: Vec<f32> = prims.iter().map(|p| p.depth).collect();
        let mut sorted = depths.clone();
        sorted.sort_by(f32::total_cmp);
        // Emission order matches depth order.
        assert_eq!(depths, sorted);
        assert_eq!(depths[0], DEPTH_BACKGROUND);
        assert_eq!(*depths.last().unwrap(), DEPTH_TINT);
        assert!(depths.contains(&DEPTH_CELL_BACKGROUND));
        assert!(depths.contains(&DEPTH_GLYPH));
    }

    #[test]
    fn test_default_background_not_redrawn_per_cell() {
        let mut grid = test_grid(2, 1);
        grid.set_default_background(Color::BLACK);
        grid.cell_at_mut(0, 0).background = Color::BLACK;
        grid.cell_at_mut(1, 0).background = Color::rgb(10, 0, 0);

        let prims = render(&grid, Position::Pixel(0, 0));
        let cell_fills: Vec<_> =
            prims.iter().filter(|p| p.depth == DEPTH_CELL_BACKGROUND).collect();
        // Only the non-default background gets its own fill.
        assert_eq!(cell_fills.len(), 1);
        assert_eq!(cell_fills[0].color, Color::rgb(10, 0, 0));
    }

    #[test]
    fn test_invisible_cells_skipped() {
        let mut grid = test_grid(2, 1);
        grid.cell_at_mut(0, 0).foreground = Color::TRANSPARENT;
        grid.cell_at_mut(0, 0).glyph = 65;

        let prims = render(&grid, Position::Pixel(0, 0));
        // Cell 0 is fully transparent; only cell 1 draws.
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].dest, Rect::new(8, 0, 8, 16));
    }

    #[test]
    fn test_glyph_carries_mirror_and_source_rect() {
        let mut grid = test_grid(1, 1);
        grid.cell_at_mut(0, 0).glyph = 17;
        grid.cell_at_mut(0, 0).mirror = Mirror::HORIZONTAL;

        let prims = render(&grid, Position::Pixel(0, 0));
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].mirror, Mirror::HORIZONTAL);
        assert_eq!(prims[0].src, Rect::new(8, 16, 8, 16));
    }

    #[test]
    fn test_position_translation() {
        let mut grid = test_grid(1, 1);
        grid.cell_at_mut(0, 0).glyph = 1;

        let cell_placed = render(&grid, Position::Cell(2, 3));
        assert_eq!(cell_placed[0].dest, Rect::new(16, 48, 8, 16));

        let pixel_placed = render(&grid, Position::Pixel(5, 7));
        assert_eq!(pixel_placed[0].dest, Rect::new(5, 7, 8, 16));
    }
}
