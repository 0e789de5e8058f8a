//! Backend-neutral draw primitives.
//!
//! The renderers never talk to a graphics API directly. They emit
//! [`DrawPrimitive`] values into a [`DrawSink`], and the host maps those
//! onto whatever sprite batcher it owns. Depth values order the layers for
//! sinks with a depth channel; emission order matches depth order for
//! sinks without one.

use crate::layout::Rect;
use crate::surface::{Color, Mirror};

/// Opaque handle to a host-owned texture.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextureId(pub u32);

/// Depth of the surface-wide default background fill.
pub const DEPTH_BACKGROUND: f32 = 0.2;
/// Depth of per-cell background fills.
pub const DEPTH_CELL_BACKGROUND: f32 = 0.3;
/// Depth of glyphs.
pub const DEPTH_GLYPH: f32 = 0.4;
/// Depth of the tint overlay.
pub const DEPTH_TINT: f32 = 0.5;

/// One textured quad to draw.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DrawPrimitive {
    /// Texture to sample.
    pub texture: TextureId,
    /// Destination rectangle in pixels.
    pub dest: Rect,
    /// Source rectangle within the texture.
    pub src: Rect,
    /// Modulation color.
    pub color: Color,
    /// Rotation in radians around `origin`.
    pub rotation: f32,
    /// Rotation origin relative to `dest`.
    pub origin: (f32, f32),
    /// Mirror flags.
    pub mirror: Mirror,
    /// Layer depth; lower draws first.
    pub depth: f32,
}

impl DrawPrimitive {
    /// An axis-aligned, unrotated, unmirrored quad.
    #[inline]
    pub const fn quad(texture: TextureId, dest: Rect, src: Rect, color: Color, depth: f32) -> Self {
        Self {
            texture,
            dest,
            src,
            color,
            rotation: 0.0,
            origin: (0.0, 0.0),
            mirror: Mirror::empty(),
            depth,
        }
    }
}

/// Receiver for a renderer's primitive stream.
///
/// A render pass is bracketed by [`begin`](DrawSink::begin) and
/// [`end`](DrawSink::end); `begin` carries the pixel translation of the
/// surface's top-left corner, which the sink applies to every destination
/// rectangle it receives.
pub trait DrawSink {
    /// Start a pass translated by `translation` pixels.
    fn begin(&mut self, translation: (i32, i32));

    /// Receive one primitive. Destination is surface-local.
    fn draw(&mut self, primitive: DrawPrimitive);

    /// Finish the pass.
    fn end(&mut self);
}

/// A `Vec`-backed sink that resolves translations eagerly.
///
/// Used by the cached pipeline to build its offscreen pass and by tests to
/// assert on emitted primitives. Primitives keep their emission order.
#[derive(Clone, Debug, Default)]
pub struct BatchSink {
    primitives: Vec<DrawPrimitive>,
    translation: (i32, i32),
}

impl BatchSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The primitives collected so far, translations applied.
    #[inline]
    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    /// Drop all collected primitives.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl DrawSink for BatchSink {
    fn begin(&mut self, translation: (i32, i32)) {
        self.translation = translation;
    }

    fn draw(&mut self, mut primitive: DrawPrimitive) {
        primitive.dest.x += self.translation.0;
        primitive.dest.y += self.translation.1;
        self.primitives.push(primitive);
    }

    fn end(&mut self) {
        self.translation = (0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_ordering() {
        assert!(DEPTH_BACKGROUND < DEPTH_CELL_BACKGROUND);
        assert!(DEPTH_CELL_BACKGROUND < DEPTH_GLYPH);
        assert!(DEPTH_GLYPH < DEPTH_TINT);
    }

    #[test]
    fn test_batch_sink_translation() {
        let mut sink = BatchSink::new();
        sink.begin((10, 20));
        sink.draw(DrawPrimitive::quad(
            TextureId(0),
            Rect::new(8, 16, 8, 16),
            Rect::ZERO,
            Color::WHITE,
            DEPTH_GLYPH,
        ));
        sink.end();

        let prims = sink.primitives();
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].dest, Rect::new(18, 36, 8, 16));
    }
}
