use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gridkit::{Color, Input, MouseButton, Toolkit};
use listframe::prelude::*;
use listframe::widget::WidgetId;
use listframe::{Error, ItemStyle, SubId};

fn setup() -> (Toolkit, Listbox<ListboxItem>) {
    let tk = Toolkit::new(30, 10);
    let root = tk.root();
    root.columnconfigure(0, 1);
    root.rowconfigure(0, 1);
    let listbox = Listbox::new(root);
    listbox.grid(gridkit::Grid::at(0, 0).sticky(gridkit::Sticky::NSEW));
    tk.update();
    (tk, listbox)
}

fn item(listbox: &Listbox<ListboxItem>, text: &str) -> ListboxItem {
    ListboxItem::new(listbox.content(), text)
}

fn texts(items: &[ListboxItem]) -> Vec<String> {
    items.iter().map(ListboxItem::text).collect()
}

fn contents(listbox: &Listbox<ListboxItem>) -> Vec<String> {
    texts(&listbox.get_range(0, Index::End))
}

fn abc(listbox: &Listbox<ListboxItem>) -> Vec<ListboxItem> {
    let items: Vec<ListboxItem> = ["A", "B", "C"].iter().map(|t| item(listbox, t)).collect();
    listbox.insert(Index::End, items.clone());
    items
}

fn click(tk: &Toolkit, item: &ListboxItem) {
    let rect = item.node().rect().expect("item is laid out");
    tk.dispatch(Input::MouseDown {
        x: rect.x as u16,
        y: rect.y as u16,
        button: MouseButton::Left,
    });
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_append_two_items() {
    let (_tk, listbox) = setup();
    listbox.insert(Index::End, [item(&listbox, "A")]);
    listbox.insert(Index::End, [item(&listbox, "B")]);

    assert_eq!(contents(&listbox), vec!["A", "B"]);
    assert_eq!(listbox.size(), 2);
}

#[test]
fn test_insert_before_selection_moves_it() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);
    items[1].request_select();
    assert_eq!(listbox.selected_index(), Some(1));

    listbox.insert(0, [item(&listbox, "Z")]);

    assert_eq!(listbox.selected_index(), Some(2));
    assert_eq!(listbox.curselection(), vec![items[1].clone()]);
}

#[test]
fn test_delete_first_two() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);

    listbox.delete_range(0, 1);

    assert_eq!(contents(&listbox), vec!["C"]);
    assert_eq!(listbox.size(), 1);
    assert!(items[0].node().is_destroyed());
    assert!(items[1].node().is_destroyed());
}

#[test]
fn test_activate_end_on_empty_is_noop() {
    let (_tk, listbox) = setup();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&changes);
    listbox.on_select(move |i| seen.borrow_mut().push(i));

    listbox.activate(Index::End);

    assert!(changes.borrow().is_empty());
    assert!(listbox.curselection().is_empty());
}

#[test]
fn test_delete_selected_clears_curselection() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);
    items[2].request_select();

    listbox.delete_range(1, Index::End);

    assert!(listbox.curselection().is_empty());
    assert_eq!(listbox.index("active"), Ok(-1));
}

#[test]
fn test_delete_then_get_returns_following_item() {
    let (_tk, listbox) = setup();
    abc(&listbox);

    listbox.delete(1);

    assert_eq!(listbox.get(1).map(|i| i.text()), Some("C".to_string()));
}

// ============================================================================
// Activate Tests
// ============================================================================

#[test]
fn test_activate_selects_and_notifies() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&changes);
    listbox.on_select(move |i| seen.borrow_mut().push(i));

    listbox.activate(Index::End);
    listbox.activate(Index::End);
    listbox.activate(-5);

    assert_eq!(*changes.borrow(), vec![2, 0]);
    assert!(items[0].is_selected());
    assert!(!items[2].is_selected());
}

#[test]
fn test_activate_clamps_high_index() {
    let (_tk, listbox) = setup();
    abc(&listbox);

    listbox.activate(40);

    assert_eq!(listbox.selected_index(), Some(2));
}

// ============================================================================
// Index Tests
// ============================================================================

#[test]
fn test_index_keywords_and_strings() {
    let (_tk, listbox) = setup();
    abc(&listbox);

    assert_eq!(listbox.index(Index::End), Ok(3));
    assert_eq!(listbox.index("end"), Ok(3));
    assert_eq!(listbox.index("active"), Ok(-1));
    assert_eq!(listbox.index("7"), Ok(7));
    assert_eq!(listbox.index(2usize), Ok(2));

    listbox.activate(1);
    assert_eq!(listbox.index(Index::Active), Ok(1));
}

#[test]
fn test_index_rejects_garbage() {
    let (_tk, listbox) = setup();
    let err = listbox.index("middle").unwrap_err();

    assert_eq!(err, Error::BadIndex("middle".to_string()));
    assert_eq!(
        err.to_string(),
        "bad listbox index \"middle\": must be active, end, or a number"
    );
}

// ============================================================================
// Item Interaction Tests
// ============================================================================

#[test]
fn test_click_selects_item_once() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&changes);
    listbox.on_select(move |i| seen.borrow_mut().push(i));

    click(&tk, &items[1]);
    click(&tk, &items[1]);
    click(&tk, &items[0]);

    assert_eq!(*changes.borrow(), vec![1, 0]);
    assert!(items[0].is_selected());
    assert!(!items[1].is_selected());
}

#[test]
fn test_click_does_not_reach_listbox_frame() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    let reached = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&reached);
    listbox.content().bind(gridkit::EventKind::Button, move |_| {
        *flag.borrow_mut() = true;
        gridkit::Propagation::Continue
    });

    click(&tk, &items[0]);

    assert!(!*reached.borrow());
}

#[test]
fn test_selected_background() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);

    listbox.activate(0);

    assert_eq!(items[0].node().background(), Some(Color::named("light sky blue")));
    assert_eq!(items[1].node().background(), Some(Color::named("white")));
}

#[test]
fn test_hover_previews_only_unselected() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    listbox.activate(0);
    let first = items[0].node().rect().unwrap();
    let second = items[1].node().rect().unwrap();

    tk.dispatch(Input::MouseMove {
        x: second.x as u16,
        y: second.y as u16,
    });
    assert_eq!(items[1].node().background(), Some(Color::named("light sky blue")));

    tk.dispatch(Input::MouseMove {
        x: first.x as u16,
        y: first.y as u16,
    });
    assert_eq!(items[1].node().background(), Some(Color::named("white")));
    assert_eq!(items[0].node().background(), Some(Color::named("light sky blue")));

    tk.dispatch(Input::MouseMove { x: 29, y: 9 });
    assert_eq!(
        items[0].node().background(),
        Some(Color::named("light sky blue")),
        "leaving a selected item keeps it highlighted"
    );
}

#[test]
fn test_custom_item_style() {
    let (_tk, listbox) = setup();
    let style = ItemStyle::new().normal("black").selected("yellow");
    let custom = ListboxItem::with_style(listbox.content(), "X", style);
    listbox.insert(0, [custom.clone()]);

    listbox.activate(0);
    assert_eq!(custom.node().background(), Some(Color::named("yellow")));

    custom.deselect();
    assert_eq!(custom.node().background(), Some(Color::named("black")));
}

// ============================================================================
// Layout Tests
// ============================================================================

#[test]
fn test_items_stack_in_index_order() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);
    listbox.insert(1, [item(&listbox, "Z")]);

    let z = listbox.get(1).unwrap();
    let ys: Vec<i32> = [&items[0], &z, &items[1], &items[2]]
        .iter()
        .map(|i| i.node().rect().unwrap().y)
        .collect();

    assert_eq!(ys, vec![0, 1, 2, 3]);
}

#[test]
fn test_geometry_follows_delete() {
    let (_tk, listbox) = setup();
    let items = abc(&listbox);

    listbox.delete(0);

    assert_eq!(items[1].node().rect().map(|r| r.y), Some(0));
    assert_eq!(items[2].grid_info().map(|g| g.row), Some(1));
}

#[test]
fn test_caller_button_binding_keeps_click_selection() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    let clicks = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&clicks);
    items[1].node().bind(gridkit::EventKind::Button, move |_| {
        *seen.borrow_mut() += 1;
        gridkit::Propagation::Continue
    });

    click(&tk, &items[1]);

    assert_eq!(*clicks.borrow(), 1);
    assert_eq!(listbox.selected_index(), Some(1));
}

#[test]
fn test_caller_enter_binding_keeps_hover_preview() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    items[2].node().bind(gridkit::EventKind::Enter, |_| gridkit::Propagation::Continue);
    let rect = items[2].node().rect().expect("item is laid out");

    tk.dispatch(Input::MouseMove {
        x: rect.x as u16,
        y: rect.y as u16,
    });

    assert_eq!(items[2].node().background(), Some(Color::named("light sky blue")));
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

/// A list item that counts how often something subscribed to it.
#[derive(Clone)]
struct Tracked {
    item: ListboxItem,
    subscriptions: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(listbox: &Listbox<Tracked>, text: &str) -> Self {
        Self {
            item: ListboxItem::new(listbox.content(), text),
            subscriptions: Rc::default(),
        }
    }
}

impl Widget for Tracked {
    fn widget_id(&self) -> WidgetId {
        self.item.widget_id()
    }

    fn grid(&self, grid: gridkit::Grid) {
        self.item.grid(grid);
    }

    fn grid_info(&self) -> Option<gridkit::Grid> {
        self.item.grid_info()
    }

    fn grid_forget(&self) {
        self.item.grid_forget();
    }

    fn destroy(&self) {
        self.item.destroy();
    }
}

impl Selectable for Tracked {
    fn is_selected(&self) -> bool {
        self.item.is_selected()
    }

    fn select(&self) {
        self.item.select();
    }

    fn deselect(&self) {
        self.item.deselect();
    }

    fn request_select(&self) {
        self.item.request_select();
    }

    fn on_select_request(&self, f: Box<dyn Fn(WidgetId)>) -> SubId {
        self.subscriptions.set(self.subscriptions.get() + 1);
        self.item.on_select_request(f)
    }
}

#[test]
fn test_ignored_insert_does_not_subscribe() {
    let tk = Toolkit::new(30, 10);
    let listbox: Listbox<Tracked> = Listbox::new(tk.root());
    let x = Tracked::new(&listbox, "X");

    listbox.insert(-1, [x.clone()]);
    listbox.insert(Index::Active, [x.clone()]);
    assert_eq!(listbox.size(), 0);
    assert_eq!(x.subscriptions.get(), 0);

    listbox.insert(Index::End, [x.clone()]);
    assert_eq!(x.subscriptions.get(), 1);
}

#[test]
fn test_destroy_empties_listbox() {
    let (tk, listbox) = setup();
    let items = abc(&listbox);
    listbox.activate(1);

    listbox.destroy();
    tk.update();

    assert_eq!(listbox.size(), 0);
    assert!(listbox.curselection().is_empty());
    assert_eq!(listbox.selected_index(), None);
    assert_eq!(listbox.index(Index::Active), Ok(-1));
    assert!(items.iter().all(|item| item.node().is_destroyed()));
    assert!(listbox.frame().outer().is_destroyed());
}
