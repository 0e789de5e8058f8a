//! Crate-level error type.
//!
//! Two strictness policies coexist deliberately and are documented on the
//! operations themselves: precondition violations surface as `Error`
//! variants, while partial-range operations (copy, print overflow,
//! out-of-bounds area fills) silently skip the affected cells.

use crate::layout::Rect;
use crate::render::FontSize;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by grid construction, editing, and serialization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A grid was requested with a zero or negative dimension.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A view window does not lie within its parent surface.
    #[error("view area {area:?} is out of range of a {width}x{height} surface")]
    ViewOutOfBounds {
        /// The offending window.
        area: Rect,
        /// Parent width.
        width: i32,
        /// Parent height.
        height: i32,
    },

    /// A print was started at a coordinate outside the surface.
    #[error("({x}, {y}) is out of range for print")]
    PositionOutOfRange {
        /// Starting X.
        x: i32,
        /// Starting Y.
        y: i32,
    },

    /// A bulk pixel assignment did not match the surface's cell count.
    #[error("pixel buffer holds {got} colors but the surface has {expected} cells")]
    PixelBufferMismatch {
        /// Cell count of the surface.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },

    /// A snapshot's cell payload disagrees with its declared dimensions.
    #[error("snapshot declares {expected} cells but holds {got}")]
    SnapshotMismatch {
        /// Cell count implied by the declared dimensions.
        expected: usize,
        /// Number of cells actually present.
        got: usize,
    },

    /// A font atlas was declared with no glyph columns or rows.
    #[error("font atlas must hold at least 1x1 glyphs, got {columns}x{rows}")]
    EmptyFontAtlas {
        /// Declared atlas columns.
        columns: i32,
        /// Declared atlas rows.
        rows: i32,
    },

    /// A font size multiplier scaled at least one glyph axis to zero.
    #[error("font cannot use size {0:?}, at least one axis is 0")]
    DegenerateFontSize(FontSize),

    /// File I/O failure during save or load.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Snapshot encoding or decoding failure.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
