//! Editor: the manipulation facade over any [`Surface`].
//!
//! An editor borrows one surface at a time and exposes the whole editing
//! vocabulary: per-cell accessors, printing, copying, clearing, filling,
//! and shifting. [`Editor::retarget`] swaps the borrowed surface in O(1)
//! without touching cells, and the shift counters are editor state so they
//! survive the swap.
//!
//! Three strictness levels coexist, each documented on its operation:
//! validation errors (`print` with a bad start), silent partial progress
//! (print overflow, copies touching out-of-range cells), and silent
//! complete no-ops (`fill_area` with a rect that leaves the surface).

mod colored;

pub use colored::{ColoredGlyph, ColoredText, Ignore};

use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::surface::{Appearance, Color, Effect, Mirror, Surface};

/// Running totals of how far a surface has been shifted.
///
/// Hosts use these to scroll attachments (cursors, entities) in step with
/// the cell content.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ShiftCounters {
    /// Total rows shifted up.
    pub up: i32,
    /// Total rows shifted down.
    pub down: i32,
    /// Total columns shifted left.
    pub left: i32,
    /// Total columns shifted right.
    pub right: i32,
}

impl ShiftCounters {
    /// Zero all four counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Editing facade over a borrowed surface.
pub struct Editor<'a> {
    surface: &'a mut dyn Surface,
    /// Accumulated shift totals, surviving [`retarget`](Editor::retarget).
    pub shifts: ShiftCounters,
}

impl<'a> Editor<'a> {
    /// Create an editor over `surface`.
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface, shifts: ShiftCounters::default() }
    }

    /// Swap the edited surface. No cells move; counters persist.
    pub fn retarget(&mut self, surface: &'a mut dyn Surface) {
        self.surface = surface;
    }

    /// The surface currently being edited.
    #[inline]
    pub fn surface(&self) -> &dyn Surface {
        self.surface
    }

    /// Width of the edited surface.
    #[inline]
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    /// Height of the edited surface.
    #[inline]
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    // Per-cell accessors. All unchecked: out-of-range coordinates panic,
    // callers pre-validate with `surface().is_valid_cell`.

    /// Glyph at (x, y).
    #[inline]
    pub fn glyph(&self, x: i32, y: i32) -> u32 {
        self.surface.cell_at(x, y).glyph
    }

    /// Set the glyph at (x, y), keeping colors.
    #[inline]
    pub fn set_glyph(&mut self, x: i32, y: i32, glyph: u32) {
        self.surface.cell_at_mut(x, y).glyph = glyph;
    }

    /// Set the glyph and foreground at (x, y).
    #[inline]
    pub fn set_glyph_fg(&mut self, x: i32, y: i32, glyph: u32, foreground: Color) {
        let cell = self.surface.cell_at_mut(x, y);
        cell.glyph = glyph;
        cell.foreground = foreground;
    }

    /// Set the glyph and both colors at (x, y).
    #[inline]
    pub fn set_glyph_colors(
        &mut self,
        x: i32,
        y: i32,
        glyph: u32,
        foreground: Color,
        background: Color,
    ) {
        let cell = self.surface.cell_at_mut(x, y);
        cell.glyph = glyph;
        cell.foreground = foreground;
        cell.background = background;
    }

    /// Set the glyph, colors, and mirror at (x, y).
    #[inline]
    pub fn set_glyph_styled(
        &mut self,
        x: i32,
        y: i32,
        glyph: u32,
        foreground: Color,
        background: Color,
        mirror: Mirror,
    ) {
        self.set_glyph_colors(x, y, glyph, foreground, background);
        self.surface.cell_at_mut(x, y).mirror = mirror;
    }

    /// Foreground at (x, y).
    #[inline]
    pub fn foreground(&self, x: i32, y: i32) -> Color {
        self.surface.cell_at(x, y).foreground
    }

    /// Set the foreground at (x, y).
    #[inline]
    pub fn set_foreground(&mut self, x: i32, y: i32, color: Color) {
        self.surface.cell_at_mut(x, y).foreground = color;
    }

    /// Background at (x, y).
    #[inline]
    pub fn background(&self, x: i32, y: i32) -> Color {
        self.surface.cell_at(x, y).background
    }

    /// Set the background at (x, y).
    #[inline]
    pub fn set_background(&mut self, x: i32, y: i32, color: Color) {
        self.surface.cell_at_mut(x, y).background = color;
    }

    /// Mirror flags at (x, y).
    #[inline]
    pub fn mirror(&self, x: i32, y: i32) -> Mirror {
        self.surface.cell_at(x, y).mirror
    }

    /// Set the mirror flags at (x, y).
    #[inline]
    pub fn set_mirror(&mut self, x: i32, y: i32, mirror: Mirror) {
        self.surface.cell_at_mut(x, y).mirror = mirror;
    }

    /// Effect at (x, y).
    #[inline]
    pub fn effect(&self, x: i32, y: i32) -> Option<Effect> {
        self.surface.cell_at(x, y).effect
    }

    /// Set or clear the effect at (x, y).
    #[inline]
    pub fn set_effect(&mut self, x: i32, y: i32, effect: Option<Effect>) {
        self.surface.cell_at_mut(x, y).effect = effect;
    }

    /// Appearance at (x, y).
    #[inline]
    pub fn appearance(&self, x: i32, y: i32) -> Appearance {
        self.surface.cell_at(x, y).appearance()
    }

    /// Set the appearance at (x, y), keeping the effect.
    #[inline]
    pub fn set_appearance(&mut self, x: i32, y: i32, appearance: &Appearance) {
        self.surface.cell_at_mut(x, y).set_appearance(appearance);
    }

    /// Assign every cell's background from a pixel buffer, row-major.
    ///
    /// Errors with [`Error::PixelBufferMismatch`] unless the buffer holds
    /// exactly one color per cell.
    pub fn set_pixels(&mut self, pixels: &[Color]) -> Result<()> {
        let expected = self.surface.cell_count();
        if pixels.len() != expected {
            return Err(Error::PixelBufferMismatch { expected, got: pixels.len() });
        }
        for (index, color) in pixels.iter().enumerate() {
            self.surface.cell_mut(index).background = *color;
        }
        Ok(())
    }

    // Printing. The flat index advances linearly through storage, so text
    // continues onto the next row at a row boundary and truncates silently
    // at the end of the surface.

    /// Print text starting at (x, y), writing glyphs only.
    ///
    /// Empty text is a no-op. A start position off the surface errors with
    /// [`Error::PositionOutOfRange`].
    pub fn print(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        self.print_impl(x, y, text, None, None)
    }

    /// Print text, writing glyphs and foreground.
    pub fn print_fg(&mut self, x: i32, y: i32, text: &str, foreground: Color) -> Result<()> {
        self.print_impl(x, y, text, Some(foreground), None)
    }

    /// Print text, writing glyphs and both colors.
    pub fn print_colors(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        foreground: Color,
        background: Color,
    ) -> Result<()> {
        self.print_impl(x, y, text, Some(foreground), Some(background))
    }

    fn print_impl(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        foreground: Option<Color>,
        background: Option<Color>,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(mut index) = self.surface.index_of(x, y) else {
            return Err(Error::PositionOutOfRange { x, y });
        };
        let total = self.surface.cell_count();
        for ch in text.chars() {
            if index >= total {
                break;
            }
            let cell = self.surface.cell_mut(index);
            cell.glyph = ch as u32;
            if let Some(fg) = foreground {
                cell.foreground = fg;
            }
            if let Some(bg) = background {
                cell.background = bg;
            }
            index += 1;
        }
        Ok(())
    }

    /// Print text, stamping the full appearance and effect on every cell.
    pub fn print_styled(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        appearance: &Appearance,
        effect: Option<Effect>,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(mut index) = self.surface.index_of(x, y) else {
            return Err(Error::PositionOutOfRange { x, y });
        };
        let total = self.surface.cell_count();
        for ch in text.chars() {
            if index >= total {
                break;
            }
            let cell = self.surface.cell_mut(index);
            cell.set_appearance(appearance);
            cell.glyph = ch as u32;
            cell.effect = effect;
            index += 1;
        }
        Ok(())
    }

    /// Print styled text, honoring each glyph's ignore mask.
    pub fn print_colored(&mut self, x: i32, y: i32, text: &ColoredText) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(mut index) = self.surface.index_of(x, y) else {
            return Err(Error::PositionOutOfRange { x, y });
        };
        let total = self.surface.cell_count();
        for glyph in text {
            if index >= total {
                break;
            }
            let cell = self.surface.cell_mut(index);
            if !glyph.ignore.contains(Ignore::GLYPH) {
                cell.glyph = glyph.glyph;
            }
            if !glyph.ignore.contains(Ignore::FOREGROUND) {
                cell.foreground = glyph.foreground;
            }
            if !glyph.ignore.contains(Ignore::BACKGROUND) {
                cell.background = glyph.background;
            }
            if !glyph.ignore.contains(Ignore::MIRROR) {
                cell.mirror = glyph.mirror;
            }
            if !glyph.ignore.contains(Ignore::EFFECT) {
                cell.effect = glyph.effect;
            }
            index += 1;
        }
        Ok(())
    }

    /// Read up to `length` glyphs starting at (x, y) as a plain string.
    ///
    /// The inverse of [`print`](Editor::print): the read clamps at the end
    /// of the surface, and an out-of-range start yields an empty string.
    pub fn get_string(&self, x: i32, y: i32, length: usize) -> String {
        let Some(start) = self.surface.index_of(x, y) else {
            return String::new();
        };
        let end = (start + length).min(self.surface.cell_count());
        (start..end)
            .map(|i| {
                char::from_u32(self.surface.cell(i).glyph).unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect()
    }

    /// Read up to `length` cells starting at (x, y) as styled text.
    pub fn get_string_colored(&self, x: i32, y: i32, length: usize) -> ColoredText {
        let Some(start) = self.surface.index_of(x, y) else {
            return ColoredText::new();
        };
        let end = (start + length).min(self.surface.cell_count());
        let mut text = ColoredText::new();
        for i in start..end {
            let cell = self.surface.cell(i);
            text.push(ColoredGlyph {
                glyph: cell.glyph,
                foreground: cell.foreground,
                background: cell.background,
                mirror: cell.mirror,
                effect: cell.effect,
                ignore: Ignore::empty(),
            });
        }
        text
    }

    // Copying. Appearances move, identity and effects stay. Out-of-range
    // destination (or source) cells are skipped, never an error.

    /// Copy the overlapping top-left region into `dest` at (0, 0).
    pub fn copy_to(&self, dest: &mut dyn Surface) {
        let width = self.surface.width().min(dest.width());
        let height = self.surface.height().min(dest.height());
        for y in 0..height {
            for x in 0..width {
                let appearance = self.surface.cell_at(x, y).appearance();
                dest.cell_at_mut(x, y).set_appearance(&appearance);
            }
        }
    }

    /// Copy the whole surface into `dest` with its top-left at (x, y).
    pub fn copy_to_at(&self, dest: &mut dyn Surface, x: i32, y: i32) {
        for sy in 0..self.surface.height() {
            for sx in 0..self.surface.width() {
                if let Some(dest_index) = dest.index_of(x + sx, y + sy) {
                    let appearance = self.surface.cell_at(sx, sy).appearance();
                    dest.cell_mut(dest_index).set_appearance(&appearance);
                }
            }
        }
    }

    /// Copy `area` of the surface into `dest` at (0, 0).
    pub fn copy_area_to(&self, area: Rect, dest: &mut dyn Surface) {
        self.copy_area_to_at(area, dest, 0, 0);
    }

    /// Copy `area` of the surface into `dest` with its top-left at (x, y).
    pub fn copy_area_to_at(&self, area: Rect, dest: &mut dyn Surface, x: i32, y: i32) {
        for ay in 0..area.height {
            for ax in 0..area.width {
                let Some(src_index) = self.surface.index_of(area.x + ax, area.y + ay) else {
                    continue;
                };
                if let Some(dest_index) = dest.index_of(x + ax, y + ay) {
                    let appearance = self.surface.cell(src_index).appearance();
                    dest.cell_mut(dest_index).set_appearance(&appearance);
                }
            }
        }
    }

    // Clearing and filling.

    /// Reset every cell to glyph 0 and the surface defaults.
    pub fn clear(&mut self) {
        let foreground = self.surface.default_foreground();
        let background = self.surface.default_background();
        for index in 0..self.surface.cell_count() {
            self.surface.cell_mut(index).clear_to(foreground, background);
        }
    }

    /// Reset one cell to glyph 0 and the surface defaults.
    ///
    /// An out-of-range coordinate is a no-op.
    pub fn clear_cell(&mut self, x: i32, y: i32) {
        let foreground = self.surface.default_foreground();
        let background = self.surface.default_background();
        if let Some(index) = self.surface.index_of(x, y) {
            self.surface.cell_mut(index).clear_to(foreground, background);
        }
    }

    /// Overwrite selected channels of every cell.
    ///
    /// `None` leaves a channel untouched. The effect channel nests: pass
    /// `Some(None)` to strip effects, `Some(Some(e))` to attach one.
    pub fn fill(
        &mut self,
        foreground: Option<Color>,
        background: Option<Color>,
        glyph: Option<u32>,
        effect: Option<Option<Effect>>,
        mirror: Option<Mirror>,
    ) {
        let area = Rect::from_size(self.surface.width(), self.surface.height());
        self.fill_area(area, foreground, background, glyph, effect, mirror);
    }

    /// Overwrite selected channels of every cell inside `area`.
    ///
    /// All-or-nothing: unless `area` lies fully within the surface the
    /// whole call is a silent no-op.
    pub fn fill_area(
        &mut self,
        area: Rect,
        foreground: Option<Color>,
        background: Option<Color>,
        glyph: Option<u32>,
        effect: Option<Option<Effect>>,
        mirror: Option<Mirror>,
    ) {
        let bounds = Rect::from_size(self.surface.width(), self.surface.height());
        if !bounds.contains_rect(&area) {
            return;
        }
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let cell = self.surface.cell_at_mut(x, y);
                if let Some(fg) = foreground {
                    cell.foreground = fg;
                }
                if let Some(bg) = background {
                    cell.background = bg;
                }
                if let Some(g) = glyph {
                    cell.glyph = g;
                }
                if let Some(e) = effect {
                    cell.effect = e;
                }
                if let Some(m) = mirror {
                    cell.mirror = m;
                }
            }
        }
    }

    // Shifting. A negative amount redirects to the opposite direction,
    // zero is a no-op, and the matching counter accumulates the amount
    // after those checks. Movement is clamped to the surface extent.

    /// Shift all rows up by `amount`.
    ///
    /// Without wrapping the vacated bottom rows are cleared to the surface
    /// defaults; with wrapping the outgoing top rows re-enter at the
    /// bottom.
    pub fn shift_up(&mut self, amount: i32, wrap: bool) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.shift_down(-amount, wrap);
            return;
        }
        self.shifts.up += amount;
        let width = self.surface.width();
        let height = self.surface.height();
        let amount = amount.min(height);

        let mut wrapped = Vec::new();
        if wrap {
            for y in 0..amount {
                for x in 0..width {
                    let dest = ((height - amount + y) * width + x) as usize;
                    wrapped.push((dest, self.surface.cell_at(x, y).appearance()));
                }
            }
        }
        for y in amount..height {
            for x in 0..width {
                let appearance = self.surface.cell_at(x, y).appearance();
                self.surface.cell_at_mut(x, y - amount).set_appearance(&appearance);
            }
        }
        if wrap {
            for (index, appearance) in wrapped {
                self.surface.cell_mut(index).set_appearance(&appearance);
            }
        } else {
            for y in height - amount..height {
                for x in 0..width {
                    self.clear_cell(x, y);
                }
            }
        }
    }

    /// Shift all rows down by `amount`. See [`shift_up`](Editor::shift_up).
    pub fn shift_down(&mut self, amount: i32, wrap: bool) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.shift_up(-amount, wrap);
            return;
        }
        self.shifts.down += amount;
        let width = self.surface.width();
        let height = self.surface.height();
        let amount = amount.min(height);

        let mut wrapped = Vec::new();
        if wrap {
            for y in height - amount..height {
                for x in 0..width {
                    let dest = ((y - (height - amount)) * width + x) as usize;
                    wrapped.push((dest, self.surface.cell_at(x, y).appearance()));
                }
            }
        }
        for y in (0..height - amount).rev() {
            for x in 0..width {
                let appearance = self.surface.cell_at(x, y).appearance();
                self.surface.cell_at_mut(x, y + amount).set_appearance(&appearance);
            }
        }
        if wrap {
            for (index, appearance) in wrapped {
                self.surface.cell_mut(index).set_appearance(&appearance);
            }
        } else {
            for y in 0..amount {
                for x in 0..width {
                    self.clear_cell(x, y);
                }
            }
        }
    }

    /// Shift all columns left by `amount`.
    pub fn shift_left(&mut self, amount: i32, wrap: bool) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.shift_right(-amount, wrap);
            return;
        }
        self.shifts.left += amount;
        let width = self.surface.width();
        let height = self.surface.height();
        let amount = amount.min(width);

        let mut wrapped = Vec::new();
        if wrap {
            for x in 0..amount {
                for y in 0..height {
                    let dest = (y * width + width - amount + x) as usize;
                    wrapped.push((dest, self.surface.cell_at(x, y).appearance()));
                }
            }
        }
        for x in amount..width {
            for y in 0..height {
                let appearance = self.surface.cell_at(x, y).appearance();
                self.surface.cell_at_mut(x - amount, y).set_appearance(&appearance);
            }
        }
        if wrap {
            for (index, appearance) in wrapped {
                self.surface.cell_mut(index).set_appearance(&appearance);
            }
        } else {
            for x in width - amount..width {
                for y in 0..height {
                    self.clear_cell(x, y);
                }
            }
        }
    }

    /// Shift all columns right by `amount`.
    pub fn shift_right(&mut self, amount: i32, wrap: bool) {
        if amount == 0 {
            return;
        }
        if amount < 0 {
            self.shift_left(-amount, wrap);
            return;
        }
        self.shifts.right += amount;
        let width = self.surface.width();
        let height = self.surface.height();
        let amount = amount.min(width);

        let mut wrapped = Vec::new();
        if wrap {
            for x in width - amount..width {
                for y in 0..height {
                    let dest = (y * width + x - (width - amount)) as usize;
                    wrapped.push((dest, self.surface.cell_at(x, y).appearance()));
                }
            }
        }
        for x in (0..width - amount).rev() {
            for y in 0..height {
                let appearance = self.surface.cell_at(x, y).appearance();
                self.surface.cell_at_mut(x + amount, y).set_appearance(&appearance);
            }
        }
        if wrap {
            for (index, appearance) in wrapped {
                self.surface.cell_mut(index).set_appearance(&appearance);
            }
        } else {
            for x in 0..amount {
                for y in 0..height {
                    self.clear_cell(x, y);
                }
            }
        }
    }
}
