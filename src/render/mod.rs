//! Rendering: fonts, draw primitives, and the two pipelines.

mod cached;
mod font;
mod pipeline;
mod primitives;

pub use cached::{CachedRenderer, OffscreenTarget, TargetProvider};
pub use font::{Font, FontRegistry, FontSize};
pub use pipeline::{Position, Renderer};
pub use primitives::{
    BatchSink, DrawPrimitive, DrawSink, TextureId, DEPTH_BACKGROUND, DEPTH_CELL_BACKGROUND,
    DEPTH_GLYPH, DEPTH_TINT,
};
