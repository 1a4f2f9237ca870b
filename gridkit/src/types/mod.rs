mod color;
mod grid;
mod style;

pub use color::{Color, Rgb};
pub use grid::{Grid, Orient, Sticky};
pub use style::Style;
