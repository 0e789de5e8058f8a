//! The cached renderer: bake a surface into an offscreen texture once,
//! then blit it until the caller asks for a refresh.
//!
//! The cache never tracks dirtiness. Edits made after the last
//! [`CachedRenderer::update`] stay invisible until the next one; that is
//! the contract, not a bug. Tint is deliberately applied fresh on every
//! [`CachedRenderer::render`] so tint changes need no rebake.

use log::debug;

use crate::layout::Rect;
use crate::render::{
    DrawPrimitive, DrawSink, Position, Renderer, TextureId, DEPTH_BACKGROUND, DEPTH_TINT,
};
use crate::surface::{Color, Surface};

/// A host-owned render target the cached pipeline can draw into.
pub trait OffscreenTarget {
    /// Texture handle for blitting the target's contents.
    fn texture(&self) -> TextureId;

    /// Pixel size of the target.
    fn size(&self) -> (i32, i32);

    /// Run one recorded pass against the target.
    ///
    /// The pass receives a sink whose primitives the target must retain as
    /// its contents. Dropping the target releases them.
    fn record(&mut self, pass: &mut dyn FnMut(&mut dyn DrawSink));
}

/// Factory for offscreen targets.
pub trait TargetProvider {
    /// The target type this provider creates.
    type Target: OffscreenTarget;

    /// Allocate a target of exactly `width` x `height` pixels.
    fn create(&mut self, width: i32, height: i32) -> Self::Target;
}

/// Renders a surface once into an offscreen target, then blits.
pub struct CachedRenderer<T: OffscreenTarget> {
    target: T,
}

impl<T: OffscreenTarget> CachedRenderer<T> {
    /// Bake `surface` and return the renderer holding the result.
    pub fn new<P>(surface: &dyn Surface, provider: &mut P) -> Self
    where
        P: TargetProvider<Target = T>,
    {
        Self { target: Self::bake(surface, provider) }
    }

    /// Re-bake `surface`, replacing the previous target.
    ///
    /// The old target is released as part of the assignment; there is no
    /// window where both stay alive across calls.
    pub fn update<P>(&mut self, surface: &dyn Surface, provider: &mut P)
    where
        P: TargetProvider<Target = T>,
    {
        self.target = Self::bake(surface, provider);
    }

    fn bake<P>(surface: &dyn Surface, provider: &mut P) -> T
    where
        P: TargetProvider<Target = T>,
    {
        let bounds = surface.pixel_bounds();
        debug!("baking surface cache target {}x{}", bounds.width, bounds.height);
        let mut target = provider.create(bounds.width, bounds.height);
        target.record(&mut |sink| {
            sink.begin((0, 0));
            // Tint stays out of the bake; render applies it per frame.
            Renderer::new().emit_cells(surface, sink);
            sink.end();
        });
        target
    }

    /// The target currently holding the baked content.
    #[inline]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Blit the baked content at `position`, applying `surface`'s current
    /// tint on top.
    ///
    /// Reads only the tint and metrics from `surface`; cell edits since
    /// the last [`update`](CachedRenderer::update) do not appear.
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

        let (width, height) = self.target.size();
        sink.draw(DrawPrimitive::quad(
            self.target.texture(),
            bounds,
            Rect::from_size(width, height),
            Color::WHITE,
            DEPTH_BACKGROUND,
        ));

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BatchSink, Font, FontSize};
    use crate::surface::Grid;
    use std::sync::Arc;

    /// In-memory target retaining the recorded primitives.
    struct MemoryTarget {
        texture: TextureId,
        width: i32,
        height: i32,
        contents: Vec<DrawPrimitive>,
    }

    impl OffscreenTarget for MemoryTarget {
        fn texture(&self) -> TextureId {
            self.texture
        }

        fn size(&self) -> (i32, i32) {
            (self.width, self.height)
        }

        fn record(&mut self, pass: &mut dyn FnMut(&mut dyn DrawSink)) {
            let mut sink = BatchSink::new();
            pass(&mut sink);
            self.contents = sink.primitives().to_vec();
        }
    }

    /// Provider handing out sequentially numbered textures.
    #[derive(Default)]
    struct MemoryProvider {
        next_texture: u32,
    }

    impl TargetProvider for MemoryProvider {
        type Target = MemoryTarget;

        fn create(&mut self, width: i32, height: i32) -> MemoryTarget {
            let texture = TextureId(1000 + self.next_texture);
            self.next_texture += 1;
            MemoryTarget { texture, width, height, contents: Vec::new() }
        }
    }

    fn test_grid(width: i32, height: i32) -> Grid {
        let font = Arc::new(Font::test_font(8, 16, FontSize::One));
        Grid::new(width, height, font).unwrap()
    }

    #[test]
    fn test_bake_sizes_target_to_pixel_bounds() {
        let grid = test_grid(4, 3);
        let mut provider = MemoryProvider::default();
        let cached = CachedRenderer::new(&grid, &mut provider);
        assert_eq!(cached.target().size(), (32, 48));
    }

    #[test]
    fn test_render_blits_single_primitive() {
        let mut grid = test_grid(2, 2);
        grid.cell_at_mut(0, 0).glyph = 65;
        let mut provider = MemoryProvider::default();
        let cached = CachedRenderer::new(&grid, &mut provider);

        let mut sink = BatchSink::new();
        cached.render(&grid, Position::Cell(1, 1), &mut sink);

        let prims = sink.primitives();
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].texture, cached.target().texture());
        assert_eq!(prims[0].dest, Rect::new(8, 16, 16, 32));
        assert_eq!(prims[0].src, Rect::from_size(16, 32));
    }

    #[test]
    fn test_cache_is_stale_until_update() {
        let mut grid = test_grid(2, 1);
        let mut provider = MemoryProvider::default();
        let mut cached = CachedRenderer::new(&grid, &mut provider);
        let baked_before = cached.target().contents.len();

        grid.cell_at_mut(1, 0).background = Color::BLACK;
        // Still blitting the old texture.
        assert_eq!(cached.target().contents.len(), baked_before);
        let old_texture = cached.target().texture();

        cached.update(&grid, &mut provider);
        assert_ne!(cached.target().texture(), old_texture);
        assert!(cached.target().contents.len() > baked_before);
    }

    #[test]
    fn test_tint_not_baked_applied_fresh() {
        let mut grid = test_grid(2, 1);
        grid.set_tint(Color::new(0, 255, 0, 80));
        let mut provider = MemoryProvider::default();
        let cached = CachedRenderer::new(&grid, &mut provider);

        // The bake holds content only, no tint layer.
        assert!(cached.target().contents.iter().all(|p| p.depth != DEPTH_TINT));

        let mut sink = BatchSink::new();
        cached.render(&grid, Position::Pixel(0, 0), &mut sink);
        let prims = sink.primitives();
        assert_eq!(prims.len(), 2);
        assert_eq!(prims[1].depth, DEPTH_TINT);
        assert_eq!(prims[1].color, Color::new(0, 255, 0, 80));
    }

    #[test]
    fn test_opaque_tint_skips_blit() {
        let mut grid = test_grid(2, 1);
        grid.set_tint(Color::rgb(5, 5, 5));
        let mut provider = MemoryProvider::default();
        let cached = CachedRenderer::new(&grid, &mut provider);

        let mut sink = BatchSink::new();
        cached.render(&grid, Position::Pixel(0, 0), &mut sink);
        let prims = sink.primitives();
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].depth, DEPTH_TINT);
        assert_ne!(prims[0].texture, cached.target().texture());
    }
}
