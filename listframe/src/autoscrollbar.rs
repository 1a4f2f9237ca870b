//! Scrollbar that grids itself only while the view overflows.

use std::cell::Cell;

use gridkit::{Node, Orient};

use crate::error::{Error, Result};
use crate::widget::{Grid, ScrollbarWidget, Sticky};

/// A scrollbar that removes itself from the grid while everything is
/// visible and puts itself back when it is needed.
///
/// Only grid placement is supported, since hiding is done with
/// `grid_forget`.
pub struct AutoScrollbar<B: ScrollbarWidget> {
    bar: B,
    column: usize,
    row: usize,
    span: usize,
    hidden: Cell<bool>,
}

impl<B: ScrollbarWidget> AutoScrollbar<B> {
    /// Wrap `bar`, which will live at `column`/`row` of its parent's grid and
    /// span `span` cells along its orientation. The bar starts out shown.
    pub fn new(bar: B, column: usize, row: usize, span: usize) -> Self {
        let scrollbar = Self {
            bar,
            column,
            row,
            span: span.max(1),
            hidden: Cell::new(true),
        };
        scrollbar.show();
        scrollbar
    }

    /// Receive the visible fraction of the scrolled view.
    ///
    /// Everything visible (`lo <= 0` and `hi >= 1`) hides the bar; anything
    /// else shows it. The fractions are forwarded either way.
    pub fn set(&self, lo: f32, hi: f32) {
        if lo <= 0.0 && hi >= 1.0 {
            self.hide();
        } else {
            self.show();
        }
        self.bar.set_fraction(lo, hi);
    }

    pub fn show(&self) {
        if !self.hidden.replace(false) {
            return;
        }
        let grid = Grid::at(self.column, self.row);
        let grid = match self.bar.orient() {
            Orient::Vertical => grid.rowspan(self.span).sticky(Sticky::NS),
            Orient::Horizontal => grid.columnspan(self.span).sticky(Sticky::EW),
        };
        self.bar.grid(grid);
        log::debug!("scrollbar {} shown", self.bar.widget_id());
    }

    pub fn hide(&self) {
        if self.hidden.replace(true) {
            return;
        }
        self.bar.grid_forget();
        log::debug!("scrollbar {} hidden", self.bar.widget_id());
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn bar(&self) -> &B {
        &self.bar
    }

    pub fn pack(&self) -> Result<()> {
        Err(Error::UnsupportedGeometry { manager: "pack" })
    }

    pub fn place(&self) -> Result<()> {
        Err(Error::UnsupportedGeometry { manager: "place" })
    }
}

impl AutoScrollbar<Node> {
    /// A vertical bar in `parent` at `column`/`row`.
    pub fn vertical(parent: &Node, column: usize, row: usize) -> Self {
        Self::new(Node::scrollbar(parent, Orient::Vertical), column, row, 1)
    }

    pub fn horizontal(parent: &Node, column: usize, row: usize) -> Self {
        Self::new(Node::scrollbar(parent, Orient::Horizontal), column, row, 1)
    }
}
