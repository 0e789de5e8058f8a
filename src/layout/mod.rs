//! Geometry primitives.

mod rect;

pub use rect::Rect;
