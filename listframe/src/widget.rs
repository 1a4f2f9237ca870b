//! Capabilities the widgets need from whatever they are composed of.
//!
//! The containers only talk to their parts through these traits, so the
//! index model and the self-hiding scrollbar can be driven by test doubles.

use std::fmt;

pub use gridkit::{Grid, Orient, Sticky};

use crate::signal::SubId;

/// Identity of a widget, stable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

/// Something that can be placed in a grid and destroyed.
pub trait Widget {
    fn widget_id(&self) -> WidgetId;

    fn grid(&self, grid: Grid);

    fn grid_info(&self) -> Option<Grid>;

    fn grid_forget(&self);

    fn destroy(&self);

    /// Move to another cell, keeping span, sticky and padding.
    fn grid_cell(&self, column: usize, row: usize) {
        let grid = self.grid_info().unwrap_or_default();
        self.grid(Grid {
            column,
            row,
            ..grid
        });
    }
}

/// A widget that can be selected and can ask to be selected.
pub trait Selectable: Widget {
    fn is_selected(&self) -> bool;

    /// Show as selected. Does not notify anyone.
    fn select(&self);

    fn deselect(&self);

    /// Ask subscribers (normally the owning listbox) to select this widget.
    fn request_select(&self);

    /// Called with this widget's id whenever it asks to be selected.
    fn on_select_request(&self, f: Box<dyn Fn(WidgetId)>) -> SubId;
}

/// The scrollbar an [`AutoScrollbar`](crate::AutoScrollbar) wraps.
pub trait ScrollbarWidget: Widget {
    fn orient(&self) -> Orient;

    fn set_fraction(&self, first: f32, last: f32);
}
