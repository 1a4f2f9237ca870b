use std::cell::{Cell, RefCell};
use std::rc::Rc;

use listframe::widget::{Grid, Orient, ScrollbarWidget, Sticky, Widget, WidgetId};
use listframe::{AutoScrollbar, Error};

/// Scrollbar double that counts grid calls.
#[derive(Default)]
struct BarState {
    orient: Orient,
    grid: Cell<Option<Grid>>,
    grid_calls: Cell<usize>,
    forget_calls: Cell<usize>,
    fractions: RefCell<Vec<(f32, f32)>>,
}

#[derive(Clone, Default)]
struct MockBar {
    state: Rc<BarState>,
}

impl MockBar {
    fn horizontal() -> Self {
        Self {
            state: Rc::new(BarState {
                orient: Orient::Horizontal,
                ..Default::default()
            }),
        }
    }
}

impl std::ops::Deref for MockBar {
    type Target = BarState;

    fn deref(&self) -> &BarState {
        &self.state
    }
}

impl Widget for MockBar {
    fn widget_id(&self) -> WidgetId {
        WidgetId(1)
    }

    fn grid(&self, grid: Grid) {
        self.state.grid.set(Some(grid));
        self.grid_calls.set(self.grid_calls.get() + 1);
    }

    fn grid_info(&self) -> Option<Grid> {
        self.state.grid.get()
    }

    fn grid_forget(&self) {
        self.state.grid.set(None);
        self.forget_calls.set(self.forget_calls.get() + 1);
    }

    fn destroy(&self) {}
}

impl ScrollbarWidget for MockBar {
    fn orient(&self) -> Orient {
        self.state.orient
    }

    fn set_fraction(&self, first: f32, last: f32) {
        self.fractions.borrow_mut().push((first, last));
    }
}

fn vertical() -> (MockBar, AutoScrollbar<MockBar>) {
    let bar = MockBar::default();
    let scrollbar = AutoScrollbar::new(bar.clone(), 1, 0, 1);
    (bar, scrollbar)
}

// ============================================================================
// Show / Hide Tests
// ============================================================================

#[test]
fn test_starts_attached() {
    let (bar, scrollbar) = vertical();

    assert!(!scrollbar.is_hidden());
    assert_eq!(bar.state.grid.get(), Some(Grid::at(1, 0).sticky(Sticky::NS)));
}

#[test]
fn test_full_range_detaches_anything_else_attaches() {
    let cases = [
        (0.0, 1.0, true),
        (-0.1, 1.2, true),
        (0.0, 0.99, false),
        (0.01, 1.0, false),
        (0.3, 0.6, false),
        (0.5, 0.4, false),
    ];
    for (lo, hi, hidden) in cases {
        let (bar, scrollbar) = vertical();
        scrollbar.set(lo, hi);

        assert_eq!(scrollbar.is_hidden(), hidden, "set({lo}, {hi})");
        assert_eq!(bar.state.grid.get().is_none(), hidden, "set({lo}, {hi})");
    }
}

#[test]
fn test_attach_and_detach_are_idempotent() {
    let (bar, scrollbar) = vertical();

    scrollbar.set(0.2, 0.5);
    scrollbar.set(0.3, 0.6);
    assert_eq!(bar.grid_calls.get(), 1, "only the initial attach");

    scrollbar.set(0.0, 1.0);
    scrollbar.set(0.0, 1.0);
    assert_eq!(bar.forget_calls.get(), 1);

    scrollbar.set(0.1, 0.9);
    assert_eq!(bar.grid_calls.get(), 2);
}

#[test]
fn test_fractions_forwarded_even_when_hidden() {
    let (bar, scrollbar) = vertical();

    scrollbar.set(0.0, 1.0);
    scrollbar.set(0.25, 0.75);

    assert_eq!(*bar.fractions.borrow(), vec![(0.0, 1.0), (0.25, 0.75)]);
}

#[test]
fn test_horizontal_spans_columns() {
    let bar = MockBar::horizontal();
    let _scrollbar = AutoScrollbar::new(bar.clone(), 0, 1, 2);

    let grid = bar.state.grid.get().unwrap();
    assert_eq!(grid.columnspan, 2);
    assert_eq!(grid.rowspan, 1);
    assert_eq!(grid.sticky, Sticky::EW);
}

// ============================================================================
// Geometry Manager Tests
// ============================================================================

#[test]
fn test_pack_and_place_rejected() {
    let (_, scrollbar) = vertical();

    assert_eq!(
        scrollbar.pack(),
        Err(Error::UnsupportedGeometry { manager: "pack" })
    );
    let err = scrollbar.place().unwrap_err();
    assert_eq!(err.to_string(), "cannot use place with this widget");
}

#[test]
fn test_real_scrollbar_node() {
    let tk = gridkit::Toolkit::new(10, 10);
    let scrollbar = AutoScrollbar::vertical(tk.root(), 0, 0);

    scrollbar.set(0.0, 1.0);
    assert_eq!(scrollbar.bar().grid_info(), None);

    scrollbar.set(0.0, 0.5);
    assert_eq!(scrollbar.bar().fraction(), Some((0.0, 0.5)));
    assert!(scrollbar.bar().grid_info().is_some());
}
