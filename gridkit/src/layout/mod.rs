mod grid;
mod rect;

pub use rect::Rect;

pub(crate) use grid::{natural_size, scroll_region_height, update, y_fractions};
