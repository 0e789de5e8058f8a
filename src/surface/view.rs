//! SubView: a non-owning window into a [`Grid`].
//!
//! A view stores no cells. Every access translates the view-local
//! coordinate into the parent grid, so writing through the view writes the
//! parent's cell itself. The view holds the parent's mutable borrow for
//! its lifetime, which is what makes the translation sound: the parent
//! cannot be resized or re-fonted underneath it.

use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::render::Font;
use crate::surface::traits::{build_render_rects, Surface};
use crate::surface::{Cell, Color, Grid};

/// A movable window over a parent grid.
///
/// The view has its own default colors and tint (initialized from the
/// parent), and its own render rectangles anchored at (0, 0) so it renders
/// as a standalone surface of its window's size.
#[derive(Debug)]
pub struct SubView<'a> {
    parent: &'a mut Grid,
    area: Rect,
    default_foreground: Color,
    default_background: Color,
    tint: Color,
    render_rects: Vec<Rect>,
}

impl<'a> SubView<'a> {
    /// Create a view over `area` of `parent`.
    ///
    /// Errors with [`Error::InvalidDimensions`] for a window smaller than
    /// 1x1 and [`Error::ViewOutOfBounds`] when the window does not lie
    /// fully within the parent.
    pub fn new(parent: &'a mut Grid, area: Rect) -> Result<Self> {
        if area.width < 1 || area.height < 1 {
            return Err(Error::InvalidDimensions { width: area.width, height: area.height });
        }
        let bounds = Rect::from_size(parent.width(), parent.height());
        if !bounds.contains_rect(&area) {
            return Err(Error::ViewOutOfBounds {
                area,
                width: parent.width(),
                height: parent.height(),
            });
        }
        let render_rects = build_render_rects(parent.font(), area.width, area.height);
        let default_foreground = parent.default_foreground();
        let default_background = parent.default_background();
        Ok(Self {
            parent,
            area,
            default_foreground,
            default_background,
            tint: Color::TRANSPARENT,
            render_rects,
        })
    }

    /// The window this view covers, in parent coordinates.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Reposition the window, keeping its size.
    ///
    /// Errors with [`Error::ViewOutOfBounds`] when the repositioned window
    /// leaves the parent. No cells are copied; the render rectangles stay
    /// valid because they are window-local.
    pub fn move_window(&mut self, x: i32, y: i32) -> Result<()> {
        let moved = self.area.at(x, y);
        let bounds = Rect::from_size(self.parent.width(), self.parent.height());
        if !bounds.contains_rect(&moved) {
            return Err(Error::ViewOutOfBounds {
                area: moved,
                width: self.parent.width(),
                height: self.parent.height(),
            });
        }
        self.area = moved;
        Ok(())
    }

    /// Set the color cleared cells use for their foreground.
    #[inline]
    pub fn set_default_foreground(&mut self, color: Color) {
        self.default_foreground = color;
    }

    /// Set the color cleared cells use for their background.
    #[inline]
    pub fn set_default_background(&mut self, color: Color) {
        self.default_background = color;
    }

    /// Set the tint overlaid on the view when rendered.
    #[inline]
    pub fn set_tint(&mut self, color: Color) {
        self.tint = color;
    }

    /// Translate a view-local flat index into a parent flat index.
    #[inline]
    fn parent_index(&self, index: usize) -> usize {
        let local_x = (index as i32) % self.area.width;
        let local_y = (index as i32) / self.area.width;
        ((local_y + self.area.y) * self.parent.width() + local_x + self.area.x) as usize
    }
}

impl Surface for SubView<'_> {
    #[inline]
    fn width(&self) -> i32 {
        self.area.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.area.height
    }

    #[inline]
    fn cell(&self, index: usize) -> &Cell {
        self.parent.cell(self.parent_index(index))
    }

    #[inline]
    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        let parent_index = self.parent_index(index);
        self.parent.cell_mut(parent_index)
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
        self.parent.font()
    }

    #[inline]
    fn render_rects(&self) -> &[Rect] {
        &self.render_rects
    }
}
