//! # Glyphgrid
//!
//! A glyph-cell framebuffer for console-style UIs.
//!
//! Glyphgrid models a screen as a 2D grid of cells, each holding a glyph
//! index, foreground and background colors, an optional effect handle, and
//! mirror flags. Everything a console toolkit needs under its widgets is
//! here: the cell data model, movable sub-views that alias their parent,
//! an editing facade, a backend-neutral render pipeline, and JSON
//! snapshots.
//!
//! ## Core Concepts
//!
//! - **Grid and views**: one owning [`Grid`], any number of [`SubView`]
//!   windows writing straight through to the parent's cells
//! - **Editor facade**: print, fill, shift, and copy over any [`Surface`]
//! - **Two pipelines**: the immediate [`Renderer`] walks cells every call;
//!   the [`CachedRenderer`] bakes once and blits until told to refresh
//! - **Opaque handles**: textures and effects are host-owned; the crate
//!   only does the rectangle math
//!
//! ## Example
//!
//! ```rust,ignore
//! use glyphgrid::{Color, Editor, Font, FontSize, Grid, TextureId};
//! use std::sync::Arc;
//!
//! let font = Arc::new(Font::new("ibm8x16", 8, 16, FontSize::One, 16, 16, 219, TextureId(0))?);
//! let mut grid = Grid::new(80, 25, font)?;
//!
//! let mut editor = Editor::new(&mut grid);
//! editor.print_fg(0, 0, "Hello", Color::WHITE)?;
//! editor.shift_up(1, false);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod editor;
pub mod error;
pub mod layout;
pub mod render;
pub mod serial;
pub mod surface;

// Re-exports for convenience
pub use editor::{ColoredGlyph, ColoredText, Editor, Ignore, ShiftCounters};
pub use error::{Error, Result};
pub use layout::Rect;
pub use render::{
    BatchSink, CachedRenderer, DrawPrimitive, DrawSink, Font, FontRegistry, FontSize,
    OffscreenTarget, Position, Renderer, TargetProvider, TextureId,
};
pub use serial::{GridSnapshot, ViewSnapshot};
pub use surface::{Appearance, Cell, Color, Effect, Grid, Mirror, SubView, Surface};
