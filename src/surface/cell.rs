//! Cell: The atomic unit of a glyph surface.
//!
//! A cell holds a glyph index into a font's symbol table, a foreground and
//! background color, an optional effect handle, and mirror flags. Cells are
//! plain values inside a [`Grid`](super::Grid); identity sharing with views
//! is achieved by index translation, not by aliased pointers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// True-color RGBA representation.
///
/// Alpha participates in rendering decisions: a fully transparent color is
/// never drawn, and a cell whose foreground and background are both fully
/// transparent renders nothing at all.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255)
    pub a: u8,
}

impl Color {
    /// Create a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fully transparent (0, 0, 0, 0).
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create from a 32-bit hex color (e.g., 0xFF5500CC as RGBA).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 24) & 0xFF) as u8,
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Check if the alpha channel is zero.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Check if the alpha channel is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<u32> for Color {
    /// Convert from a 32-bit RGBA hex color (e.g., 0xFF5500FF)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Glyph mirror flags applied when a cell is drawn.
    ///
    /// Empty means no mirroring; both flags together flip on both axes.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mirror: u8 {
        /// Flip the glyph horizontally.
        const HORIZONTAL = 0b0000_0001;
        /// Flip the glyph vertically.
        const VERTICAL = 0b0000_0010;
    }
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

impl Serialize for Mirror {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Mirror {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// An opaque handle into a caller-owned effect table.
///
/// The grid stores and round-trips effects but never interprets them;
/// animation and timing live in the surrounding framework.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Effect(pub u32);

/// The copyable visual unit of a cell: glyph, colors, and mirror.
///
/// Appearance excludes the effect handle and cell identity; shift and copy
/// operations move appearances between cells without transferring either.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Appearance {
    /// The glyph index from a font.
    pub glyph: u32,
    /// The foreground color.
    pub foreground: Color,
    /// The background color.
    pub background: Color,
    /// The mirror flags.
    pub mirror: Mirror,
}

impl Appearance {
    /// Create a new appearance with no mirroring.
    #[inline]
    pub const fn new(glyph: u32, foreground: Color, background: Color) -> Self {
        Self { glyph, foreground, background, mirror: Mirror::empty() }
    }
}

/// A single surface cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// The glyph index from a font for this cell.
    pub glyph: u32,
    /// The foreground color of this cell.
    pub foreground: Color,
    /// The background color of this cell.
    pub background: Color,
    /// The optional effect handle attached to this cell.
    pub effect: Option<Effect>,
    /// The mirror flags for this cell.
    pub mirror: Mirror,
}

impl Cell {
    /// Create a cell with glyph 0, the given colors, and no effect.
    #[inline]
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            glyph: 0,
            foreground,
            background,
            effect: None,
            mirror: Mirror::empty(),
        }
    }

    /// A cell is visible unless both of its colors are fully transparent.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        !(self.foreground.is_transparent() && self.background.is_transparent())
    }

    /// Get the appearance of this cell.
    #[inline]
    pub const fn appearance(&self) -> Appearance {
        Appearance {
            glyph: self.glyph,
            foreground: self.foreground,
            background: self.background,
            mirror: self.mirror,
        }
    }

    /// Overwrite this cell's visual unit, leaving the effect untouched.
    #[inline]
    pub fn set_appearance(&mut self, appearance: &Appearance) {
        self.glyph = appearance.glyph;
        self.foreground = appearance.foreground;
        self.background = appearance.background;
        self.mirror = appearance.mirror;
    }

    /// Reset to glyph 0, the given defaults, no effect, no mirror.
    #[inline]
    pub fn clear_to(&mut self, foreground: Color, background: Color) {
        self.glyph = 0;
        self.foreground = foreground;
        self.background = background;
        self.effect = None;
        self.mirror = Mirror::empty();
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph)
            .field("fg", &self.foreground)
            .field("bg", &self.background)
            .field("mirror", &self.mirror)
            .field("effect", &self.effect)
            .finish()
    }
}
