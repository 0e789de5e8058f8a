//! Font metrics and the font registry.
//!
//! A font describes a fixed-cell glyph atlas: the pixel size of one glyph,
//! an integer-friendly size multiplier, the atlas layout in columns and
//! rows, and the index of the solid glyph used for background and tint
//! fills. The pixel data itself lives behind an opaque [`TextureId`]; this
//! crate only does the rectangle math.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::render::TextureId;

/// Scale multiplier applied to a font's native glyph size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, serde::Serialize, serde::Deserialize)]
pub enum FontSize {
    /// Quarter of the native size.
    Quarter,
    /// Half of the native size.
    Half,
    /// Native size.
    #[default]
    One,
    /// Double the native size.
    Two,
    /// Triple the native size.
    Three,
    /// Quadruple the native size.
    Four,
}

impl FontSize {
    /// The scale factor for this size.
    #[inline]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::One => 1.0,
            Self::Two => 2.0,
            Self::Three => 3.0,
            Self::Four => 4.0,
        }
    }
}

/// Metrics for a fixed-cell glyph atlas.
#[derive(Clone, Debug)]
pub struct Font {
    name: String,
    glyph_width: i32,
    glyph_height: i32,
    size: FontSize,
    columns: i32,
    rows: i32,
    solid_glyph: u32,
    texture: TextureId,
    // Scaled cell size, fixed at construction.
    cell_width: i32,
    cell_height: i32,
}

impl Font {
    /// Create a font from its atlas metrics.
    ///
    /// Errors with [`Error::EmptyFontAtlas`] when the atlas declares no
    /// glyph columns or rows, and with [`Error::DegenerateFontSize`] when
    /// the multiplier scales either glyph axis down to zero pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        glyph_width: i32,
        glyph_height: i32,
        size: FontSize,
        columns: i32,
        rows: i32,
        solid_glyph: u32,
        texture: TextureId,
    ) -> Result<Self> {
        // glyph_rect divides by columns; an empty atlas has no valid rect.
        if columns < 1 || rows < 1 {
            return Err(Error::EmptyFontAtlas { columns, rows });
        }
        let multiplier = size.multiplier();
        let cell_width = (glyph_width as f32 * multiplier) as i32;
        let cell_height = (glyph_height as f32 * multiplier) as i32;
        if cell_width == 0 || cell_height == 0 {
            return Err(Error::DegenerateFontSize(size));
        }
        Ok(Self {
            name: name.into(),
            glyph_width,
            glyph_height,
            size,
            columns,
            rows,
            solid_glyph,
            texture,
            cell_width,
            cell_height,
        })
    }

    /// The registry name of this font.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native (unscaled) glyph width in pixels.
    #[inline]
    pub const fn glyph_width(&self) -> i32 {
        self.glyph_width
    }

    /// Native (unscaled) glyph height in pixels.
    #[inline]
    pub const fn glyph_height(&self) -> i32 {
        self.glyph_height
    }

    /// The size multiplier this font was built with.
    #[inline]
    pub const fn size(&self) -> FontSize {
        self.size
    }

    /// Scaled on-screen cell width in pixels.
    #[inline]
    pub const fn cell_width(&self) -> i32 {
        self.cell_width
    }

    /// Scaled on-screen cell height in pixels.
    #[inline]
    pub const fn cell_height(&self) -> i32 {
        self.cell_height
    }

    /// Glyph index of the solid (fully filled) glyph.
    #[inline]
    pub const fn solid_glyph(&self) -> u32 {
        self.solid_glyph
    }

    /// The atlas texture handle.
    #[inline]
    pub const fn texture(&self) -> TextureId {
        self.texture
    }

    /// Atlas source rectangle for a glyph, in native pixels.
    ///
    /// Out-of-range indexes clamp to the last glyph in the atlas.
    pub fn glyph_rect(&self, glyph: u32) -> Rect {
        let last = (self.columns * self.rows - 1).max(0) as u32;
        let glyph = glyph.min(last) as i32;
        let col = glyph % self.columns;
        let row = glyph / self.columns;
        Rect::new(
            col * self.glyph_width,
            row * self.glyph_height,
            self.glyph_width,
            self.glyph_height,
        )
    }

    /// Atlas source rectangle for the solid glyph.
    #[inline]
    pub fn solid_rect(&self) -> Rect {
        self.glyph_rect(self.solid_glyph)
    }

    /// Destination rectangle for the cell at (x, y), in scaled pixels.
    #[inline]
    pub const fn render_rect(&self, x: i32, y: i32) -> Rect {
        Rect::new(
            x * self.cell_width,
            y * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// A rebuild of this font at a different size multiplier.
    pub fn with_size(&self, size: FontSize) -> Result<Self> {
        Self::new(
            self.name.clone(),
            self.glyph_width,
            self.glyph_height,
            size,
            self.columns,
            self.rows,
            self.solid_glyph,
            self.texture,
        )
    }

    /// A 16x16-glyph atlas with the given glyph size, for unit tests.
    #[cfg(test)]
    pub(crate) fn test_font(glyph_width: i32, glyph_height: i32, size: FontSize) -> Self {
        Self::new("test", glyph_width, glyph_height, size, 16, 16, 219, TextureId(0))
            .expect("test font metrics are valid")
    }
}

/// Named font lookup for deserialization and font switching.
///
/// The registry is an explicit value threaded to the call sites that need
/// it; there is no global font table. Lookups that miss fall back to the
/// registry's default font.
#[derive(Clone, Debug)]
pub struct FontRegistry {
    fonts: HashMap<String, Arc<Font>>,
    default: Arc<Font>,
}

impl FontRegistry {
    /// Create a registry with the given default font.
    ///
    /// The default is also registered under its own name.
    pub fn new(default: Arc<Font>) -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(default.name().to_owned(), Arc::clone(&default));
        Self { fonts, default }
    }

    /// Register a font under its own name, replacing any previous entry.
    pub fn register(&mut self, font: Arc<Font>) {
        self.fonts.insert(font.name().to_owned(), font);
    }

    /// The registry's default font.
    #[inline]
    pub fn default_font(&self) -> &Arc<Font> {
        &self.default
    }

    /// Look up a font by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<Font>> {
        self.fonts.get(name).cloned()
    }

    /// Look up a font by exact name, falling back to the default.
    pub fn get_or_default(&self, name: &str) -> Arc<Font> {
        self.get(name).unwrap_or_else(|| {
            debug!("font {name:?} not registered, using default {:?}", self.default.name());
            Arc::clone(&self.default)
        })
    }
}
