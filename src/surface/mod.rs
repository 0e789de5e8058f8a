//! Cell surfaces: the data model under every console-style UI element.

mod cell;
mod grid;
mod traits;
mod view;

pub use cell::{Appearance, Cell, Color, Effect, Mirror};
pub use grid::Grid;
pub use traits::{build_render_rects, Surface};
pub use view::SubView;
