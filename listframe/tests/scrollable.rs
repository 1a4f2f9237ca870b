use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gridkit::{Grid, Input, MouseButton, Node, Sticky, Toolkit};
use listframe::widget::{Widget, WidgetId};
use listframe::{ScrollConfig, ScrollableFrame};

/// A `width`x5 toolkit filled by a scrollable frame holding `rows` labels.
fn setup(width: u16, rows: usize) -> (Toolkit, ScrollableFrame, Vec<Node>) {
    let tk = Toolkit::new(width, 5);
    let root = tk.root();
    root.columnconfigure(0, 1);
    root.rowconfigure(0, 1);
    let frame = ScrollableFrame::new(root);
    frame.grid(Grid::at(0, 0).sticky(Sticky::NSEW));

    let labels = (0..rows)
        .map(|i| {
            let label = Node::label(frame.content(), format!("row {i}"));
            label.grid(Grid::at(0, i).sticky(Sticky::W));
            label
        })
        .collect();
    tk.update();
    (tk, frame, labels)
}

fn soon() -> Instant {
    Instant::now() + Duration::from_secs(1)
}

fn hover_content(tk: &Toolkit, frame: &ScrollableFrame) {
    let rect = frame.content().clip().expect("content is visible");
    tk.dispatch(Input::MouseMove {
        x: rect.x as u16,
        y: rect.y as u16,
    });
}

fn wheel(tk: &Toolkit, x: u16, y: u16, delta: i16) {
    tk.dispatch(Input::Wheel { x, y, delta });
}

fn ids(nodes: &[Node]) -> Vec<WidgetId> {
    nodes.iter().map(Widget::widget_id).collect()
}

// ============================================================================
// Scrollbar Visibility Tests
// ============================================================================

#[test]
fn test_scrollbar_hidden_when_content_fits() {
    let (_tk, frame, _) = setup(20, 3);

    assert!(frame.scrollbar().is_hidden());
    assert_eq!(frame.viewport().rect().map(|r| r.width), Some(20));
}

#[test]
fn test_scrollbar_shown_when_content_overflows() {
    let (_tk, frame, _) = setup(20, 10);

    assert!(!frame.scrollbar().is_hidden());
    assert_eq!(frame.viewport().rect().map(|r| r.width), Some(19));
    assert_eq!(frame.scrollbar().bar().rect().map(|r| (r.x, r.height)), Some((19, 5)));
}

#[test]
fn test_scrollbar_hides_after_items_removed() {
    let (tk, frame, labels) = setup(20, 10);
    for label in &labels[3..] {
        label.destroy();
    }
    tk.update();

    assert!(frame.scrollbar().is_hidden());
}

// ============================================================================
// Scroll Region Tests
// ============================================================================

#[test]
fn test_scroll_region_tracks_content() {
    let (tk, frame, _) = setup(20, 10);
    assert_eq!(frame.viewport().scroll_region().map(|r| r.height), Some(10));

    let extra = Node::label(frame.content(), "row 10");
    extra.grid(Grid::at(0, 10));
    tk.update();

    assert_eq!(frame.viewport().scroll_region().map(|r| r.height), Some(11));
}

#[test]
fn test_scroll_bottom() {
    let (_tk, frame, labels) = setup(20, 10);

    frame.scroll_bottom();

    assert_eq!(frame.viewport().yview(), (0.5, 1.0));
    assert!(labels[9].is_viewable());
    assert!(!labels[0].is_viewable());
}

#[test]
fn test_scrollbar_click_pages_view() {
    let (tk, frame, _) = setup(20, 10);

    tk.dispatch(Input::MouseDown {
        x: 19,
        y: 4,
        button: MouseButton::Left,
    });

    assert_eq!(frame.viewport().scroll_offset(), 4);
}

// ============================================================================
// Width Sync Tests
// ============================================================================

#[test]
fn test_content_matches_viewport_width() {
    let (tk, frame, _) = setup(20, 3);
    tk.run_timers(soon());

    assert_eq!(frame.content().rect().map(|r| r.width), Some(20));
}

#[test]
fn test_resize_while_settling_waits_for_settle() {
    let (tk, frame, _) = setup(20, 10);
    assert_eq!(frame.content().rect().map(|r| r.width), Some(19));

    tk.resize(30, 5);
    tk.update();
    assert_eq!(frame.viewport().rect().map(|r| r.width), Some(29));
    assert_eq!(
        frame.content().rect().map(|r| r.width),
        Some(19),
        "configure absorbed while the settle timer is pending"
    );

    tk.run_timers(soon());

    assert_eq!(frame.content().rect().map(|r| r.width), Some(29));
}

#[test]
fn test_resize_after_settle_applies_immediately() {
    let (tk, frame, _) = setup(20, 10);
    tk.run_timers(soon());

    tk.resize(30, 5);
    tk.update();

    assert_eq!(frame.content().rect().map(|r| r.width), Some(29));
}

#[test]
fn test_custom_settle_delay() {
    let tk = Toolkit::new(20, 5);
    let root = tk.root();
    root.columnconfigure(0, 1);
    root.rowconfigure(0, 1);
    let config = ScrollConfig::new().settle_delay(Duration::from_secs(60));
    let frame = ScrollableFrame::with_config(root, config);
    frame.grid(Grid::at(0, 0).sticky(Sticky::NSEW));
    tk.update();
    tk.resize(30, 5);
    tk.update();

    tk.run_timers(soon());

    assert_eq!(
        frame.content().rect().map(|r| r.width),
        Some(19),
        "still the width from before the scrollbar was hidden"
    );
}

// ============================================================================
// Mouse Wheel Tests
// ============================================================================

#[test]
fn test_wheel_scrolls_while_hovering_content() {
    let (tk, frame, _) = setup(20, 10);
    hover_content(&tk, &frame);

    wheel(&tk, 0, 0, -1);
    wheel(&tk, 0, 0, -1);
    assert_eq!(frame.viewport().scroll_offset(), 2);

    wheel(&tk, 0, 0, 3);
    assert_eq!(frame.viewport().scroll_offset(), 1, "one unit per notch");
}

#[test]
fn test_wheel_ignored_when_not_hovering() {
    let (tk, frame, _) = setup(20, 10);

    wheel(&tk, 19, 0, -1);

    assert_eq!(frame.viewport().scroll_offset(), 0);
}

#[test]
fn test_wheel_unbound_after_leave() {
    let (tk, frame, _) = setup(20, 10);
    hover_content(&tk, &frame);
    tk.dispatch(Input::MouseMove { x: 19, y: 0 });

    wheel(&tk, 19, 0, -1);

    assert_eq!(frame.viewport().scroll_offset(), 0);
}

#[test]
fn test_wheel_ignored_while_scrollbar_hidden() {
    let (tk, frame, _) = setup(20, 3);
    hover_content(&tk, &frame);

    wheel(&tk, 0, 0, -1);

    assert_eq!(frame.viewport().scroll_offset(), 0);
}

#[test]
fn test_wheel_units_config() {
    let tk = Toolkit::new(20, 5);
    let root = tk.root();
    root.columnconfigure(0, 1);
    root.rowconfigure(0, 1);
    let frame = ScrollableFrame::with_config(root, ScrollConfig::new().wheel_units(3));
    frame.grid(Grid::at(0, 0).sticky(Sticky::NSEW));
    for i in 0..10 {
        Node::label(frame.content(), "row").grid(Grid::at(0, i));
    }
    tk.update();
    hover_content(&tk, &frame);

    wheel(&tk, 0, 0, -1);

    assert_eq!(frame.viewport().scroll_offset(), 3);
}

// ============================================================================
// Visibility Tracking Tests
// ============================================================================

#[test]
fn test_visible_widgets_initially() {
    let (_tk, frame, labels) = setup(20, 10);

    assert_eq!(frame.visible_widgets(), ids(&labels[..5]));
}

#[test]
fn test_shown_and_hidden_notifications() {
    let (_tk, frame, labels) = setup(20, 10);
    let shown = Rc::new(RefCell::new(Vec::new()));
    let hidden = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&shown);
    frame.on_shown(move |id| s.borrow_mut().push(id));
    let h = Rc::clone(&hidden);
    frame.on_hidden(move |id| h.borrow_mut().push(id));

    frame.viewport().yview_scroll(2, gridkit::ScrollUnit::Units);

    assert_eq!(*hidden.borrow(), ids(&labels[..2]));
    assert_eq!(*shown.borrow(), ids(&labels[5..7]));
    assert_eq!(frame.visible_widgets(), ids(&labels[2..7]));
}

#[test]
fn test_destroy_removes_frame() {
    let (tk, frame, labels) = setup(20, 10);

    frame.destroy();
    tk.update();

    assert!(frame.outer().is_destroyed());
    assert!(labels[0].is_destroyed());
    assert!(tk.root().children().is_empty());
}
