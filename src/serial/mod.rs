//! Snapshots: saving and loading surfaces as JSON.
//!
//! Fonts are not embedded. A grid snapshot records the font's registry
//! name and size; loading resolves it against a caller-supplied
//! [`FontRegistry`], falling back to the registry default when the name is
//! unknown. View snapshots carry no cell data at all, since a view owns
//! none; loading one reattaches it to a live parent grid.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::render::{FontRegistry, FontSize};
use crate::surface::{Cell, Color, Grid, SubView, Surface};

/// Serialized form of a [`Grid`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
    /// Cell payload, row-major, exactly `width * height` long.
    pub cells: Vec<Cell>,
    /// Registry name of the grid's font.
    pub font_name: String,
    /// Size multiplier the font was used at.
    pub font_size: FontSize,
    /// Default foreground.
    pub default_foreground: Color,
    /// Default background.
    pub default_background: Color,
    /// Tint.
    pub tint: Color,
}

/// Serialized form of a [`SubView`]: window and tint, no cells.
///
/// The font fields record what the view rendered with; loading ignores
/// them because a reattached view always uses its parent's font.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// The window in parent coordinates.
    pub area: Rect,
    /// Registry name of the font in use at save time.
    pub font_name: String,
    /// Size multiplier in use at save time.
    pub font_size: FontSize,
    /// Tint.
    pub tint: Color,
}

/// Write any serializable value to `path` as JSON.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

/// Read a JSON value back from `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

impl Grid {
    /// Capture this grid as a snapshot.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width(),
            height: self.height(),
            cells: self.cells().to_vec(),
            font_name: self.font().name().to_owned(),
            font_size: self.font().size(),
            default_foreground: self.default_foreground(),
            default_background: self.default_background(),
            tint: self.tint(),
        }
    }

    /// Rebuild a grid from a snapshot, resolving the font by name.
    ///
    /// An unregistered font name falls back to the registry default. A
    /// cell payload that disagrees with the declared dimensions errors
    /// with [`Error::SnapshotMismatch`].
    pub fn from_snapshot(snapshot: &GridSnapshot, registry: &FontRegistry) -> Result<Self> {
        let expected = (snapshot.width.max(0) as usize) * (snapshot.height.max(0) as usize);
        if snapshot.cells.len() != expected {
            return Err(Error::SnapshotMismatch { expected, got: snapshot.cells.len() });
        }

        let base = registry.get_or_default(&snapshot.font_name);
        let font = if base.size() == snapshot.font_size {
            base
        } else {
            debug!(
                "resizing font {:?} from {:?} to {:?} for snapshot",
                base.name(),
                base.size(),
                snapshot.font_size
            );
            Arc::new(base.with_size(snapshot.font_size)?)
        };

        let mut grid = Self::new(snapshot.width, snapshot.height, font)?;
        grid.set_default_foreground(snapshot.default_foreground);
        grid.set_default_background(snapshot.default_background);
        grid.set_tint(snapshot.tint);
        for (index, cell) in snapshot.cells.iter().enumerate() {
            *grid.cell_mut(index) = *cell;
        }
        Ok(grid)
    }

    /// Save this grid to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        save(&self.snapshot(), path)
    }

    /// Load a grid from `path`, resolving its font against `registry`.
    pub fn load(path: &Path, registry: &FontRegistry) -> Result<Self> {
        let snapshot: GridSnapshot = load(path)?;
        Self::from_snapshot(&snapshot, registry)
    }
}

impl<'a> SubView<'a> {
    /// Capture this view's window and tint as a snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            area: self.area(),
            font_name: self.font().name().to_owned(),
            font_size: self.font().size(),
            tint: self.tint(),
        }
    }

    /// Save this view to `path` as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        save(&self.snapshot(), path)
    }

    /// Load a view from `path`, attaching it to `parent`.
    ///
    /// Goes through normal view construction, so a window that does not
    /// fit the supplied parent errors with [`Error::ViewOutOfBounds`].
    pub fn load(path: &Path, parent: &'a mut Grid) -> Result<Self> {
        let snapshot: ViewSnapshot = load(path)?;
        let mut view = Self::new(parent, snapshot.area)?;
        view.set_tint(snapshot.tint);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Font;
    use crate::surface::{Effect, Mirror};

    fn registry() -> FontRegistry {
        FontRegistry::new(Arc::new(Font::test_font(8, 16, FontSize::One)))
    }

    fn populated_grid() -> Grid {
        let font = Arc::new(Font::test_font(8, 16, FontSize::One));
        let mut grid = Grid::new(4, 3, font).unwrap();
        grid.set_default_background(Color::BLACK);
        grid.set_tint(Color::new(10, 20, 30, 40));
        grid.cell_at_mut(1, 2).glyph = 65;
        grid.cell_at_mut(1, 2).foreground = Color::rgb(1, 2, 3);
        grid.cell_at_mut(1, 2).mirror = Mirror::VERTICAL;
        grid.cell_at_mut(0, 0).effect = Some(Effect(9));
        grid
    }

    #[test]
    fn test_grid_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let grid = populated_grid();
        grid.save(&path).unwrap();

        let loaded = Grid::load(&path, &registry()).unwrap();
        assert_eq!(loaded.width(), 4);
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.cells(), grid.cells());
        assert_eq!(loaded.default_background(), Color::BLACK);
        assert_eq!(loaded.tint(), Color::new(10, 20, 30, 40));
        assert_eq!(loaded.font().name(), "test");
    }

    #[test]
    fn test_unknown_font_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let mut snapshot = populated_grid().snapshot();
        snapshot.font_name = "never-registered".to_owned();
        save(&snapshot, &path).unwrap();

        let loaded = Grid::load(&path, &registry()).unwrap();
        assert_eq!(loaded.font().name(), "test");
    }

    #[test]
    fn test_font_size_restored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let mut snapshot = populated_grid().snapshot();
        snapshot.font_size = FontSize::Two;
        save(&snapshot, &path).unwrap();

        let loaded = Grid::load(&path, &registry()).unwrap();
        assert_eq!(loaded.font().size(), FontSize::Two);
        assert_eq!(loaded.font().cell_width(), 16);
    }

    #[test]
    fn test_corrupt_cell_count_rejected() {
        let mut snapshot = populated_grid().snapshot();
        snapshot.cells.pop();
        assert!(matches!(
            Grid::from_snapshot(&snapshot, &registry()),
            Err(Error::SnapshotMismatch { expected: 12, got: 11 })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(Grid::load(&path, &registry()), Err(Error::Io(_))));
    }

    #[test]
    fn test_corrupt_json_is_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(matches!(Grid::load(&path, &registry()), Err(Error::Serde(_))));
    }

    #[test]
    fn test_view_round_trip_reattaches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        let mut grid = populated_grid();
        {
            let mut view = SubView::new(&mut grid, Rect::new(1, 1, 2, 2)).unwrap();
            view.set_tint(Color::rgb(7, 7, 7));
            view.save(&path).unwrap();
        }

        let view = SubView::load(&path, &mut grid).unwrap();
        assert_eq!(view.area(), Rect::new(1, 1, 2, 2));
        assert_eq!(view.tint(), Color::rgb(7, 7, 7));
        // Cells come from the live parent, not the file.
        assert_eq!(view.cell_at(0, 1).glyph, 65);
    }

    #[test]
    fn test_view_load_validates_against_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        let mut grid = populated_grid();
        {
            let view = SubView::new(&mut grid, Rect::new(0, 0, 4, 3)).unwrap();
            view.save(&path).unwrap();
        }

        // A smaller parent cannot host the saved window.
        let font = Arc::new(Font::test_font(8, 16, FontSize::One));
        let mut small = Grid::new(2, 2, font).unwrap();
        assert!(matches!(
            SubView::load(&path, &mut small),
            Err(Error::ViewOutOfBounds { .. })
        ));
    }
}
