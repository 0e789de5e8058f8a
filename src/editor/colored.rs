//! Rich text: strings that carry per-glyph styling and write masks.

use bitflags::bitflags;

use crate::surface::{Color, Effect, Mirror};

bitflags! {
    /// Channels a colored glyph should NOT write when printed.
    ///
    /// An ignored channel leaves the destination cell's current value in
    /// place, so styled text can recolor existing glyphs or write glyphs
    /// over existing colors.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Ignore: u8 {
        /// Keep the destination glyph.
        const GLYPH = 0b0000_0001;
        /// Keep the destination foreground.
        const FOREGROUND = 0b0000_0010;
        /// Keep the destination background.
        const BACKGROUND = 0b0000_0100;
        /// Keep the destination mirror flags.
        const MIRROR = 0b0000_1000;
        /// Keep the destination effect.
        const EFFECT = 0b0001_0000;
    }
}

impl std::fmt::Debug for Ignore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One styled glyph of a [`ColoredText`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColoredGlyph {
    /// The glyph index.
    pub glyph: u32,
    /// Foreground to write.
    pub foreground: Color,
    /// Background to write.
    pub background: Color,
    /// Mirror flags to write.
    pub mirror: Mirror,
    /// Effect to write (`None` writes "no effect" unless ignored).
    pub effect: Option<Effect>,
    /// Channels to leave untouched in the destination cell.
    pub ignore: Ignore,
}

impl ColoredGlyph {
    /// A glyph with the given colors, no mirror, no effect, all channels written.
    #[inline]
    pub const fn new(glyph: u32, foreground: Color, background: Color) -> Self {
        Self {
            glyph,
            foreground,
            background,
            mirror: Mirror::empty(),
            effect: None,
            ignore: Ignore::empty(),
        }
    }
}

/// A run of styled glyphs.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ColoredText {
    glyphs: Vec<ColoredGlyph>,
}

impl ColoredText {
    /// An empty run.
    pub const fn new() -> Self {
        Self { glyphs: Vec::new() }
    }

    /// Build a run from a string, one glyph per char, uniformly colored.
    pub fn from_str(text: &str, foreground: Color, background: Color) -> Self {
        Self {
            glyphs: text
                .chars()
                .map(|c| ColoredGlyph::new(c as u32, foreground, background))
                .collect(),
        }
    }

    /// Number of glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when the run holds no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The glyphs in order.
    #[inline]
    pub fn glyphs(&self) -> &[ColoredGlyph] {
        &self.glyphs
    }

    /// Mutable access to the glyphs.
    #[inline]
    pub fn glyphs_mut(&mut self) -> &mut [ColoredGlyph] {
        &mut self.glyphs
    }

    /// Append one glyph.
    pub fn push(&mut self, glyph: ColoredGlyph) {
        self.glyphs.push(glyph);
    }

    /// Set the ignore mask on every glyph in the run.
    pub fn set_ignore(&mut self, ignore: Ignore) {
        for glyph in &mut self.glyphs {
            glyph.ignore = ignore;
        }
    }

    /// The plain string this run spells, unknown code points as
    /// `char::REPLACEMENT_CHARACTER`.
    pub fn to_plain_string(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| char::from_u32(g.glyph).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }
}

impl std::ops::Add for ColoredText {
    type Output = Self;

    fn add(mut self, mut rhs: Self) -> Self {
        self.glyphs.append(&mut rhs.glyphs);
        self
    }
}

impl<'a> IntoIterator for &'a ColoredText {
    type Item = &'a ColoredGlyph;
    type IntoIter = std::slice::Iter<'a, ColoredGlyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}
