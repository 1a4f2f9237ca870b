//! Clickable listbox entry.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use gridkit::{Event, EventKind, Grid, MouseButton, Node, Propagation};

use crate::config::ItemStyle;
use crate::signal::{Signal, SubId};
use crate::widget::{Selectable, Widget, WidgetId};

/// A clickable one-line entry for a [`Listbox`](crate::Listbox).
///
/// A left click asks to be selected and stops the click there. Hovering an
/// unselected item previews the selected background.
#[derive(Clone)]
pub struct ListboxItem {
    node: Node,
    selected: Rc<Cell<bool>>,
    select_requested: Signal<WidgetId>,
    style: Rc<ItemStyle>,
}

impl ListboxItem {
    pub fn new(parent: &Node, text: impl Into<String>) -> Self {
        Self::with_style(parent, text, ItemStyle::default())
    }

    pub fn with_style(parent: &Node, text: impl Into<String>, style: ItemStyle) -> Self {
        let node = Node::label(parent, text);
        node.set_background(style.normal.clone());
        node.set_padding(style.padx, style.pady);

        let item = Self {
            node,
            selected: Rc::new(Cell::new(false)),
            select_requested: Signal::new(),
            style: Rc::new(style),
        };
        item.bind_events();
        item
    }

    fn bind_events(&self) {
        let requested = self.select_requested.clone();
        let id = self.widget_id();
        self.node.bind_widget(EventKind::Button, move |event| match event {
            Event::Button {
                button: MouseButton::Left,
                ..
            } => {
                requested.emit(&id);
                Propagation::Break
            }
            _ => Propagation::Continue,
        });

        for (kind, hovered) in [(EventKind::Enter, true), (EventKind::Leave, false)] {
            let node = self.node.downgrade();
            let selected = Rc::clone(&self.selected);
            let style = Rc::clone(&self.style);
            self.node.bind_widget(kind, move |_| {
                if let (false, Some(node)) = (selected.get(), node.upgrade()) {
                    let color = if hovered { &style.selected } else { &style.normal };
                    node.set_background(color.clone());
                }
                Propagation::Continue
            });
        }
    }

    pub fn text(&self) -> String {
        self.node.text_content()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.node.set_text(text);
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl PartialEq for ListboxItem {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl fmt::Debug for ListboxItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListboxItem")
            .field("id", &self.node.id())
            .field("text", &self.text())
            .field("selected", &self.selected.get())
            .finish()
    }
}

impl Widget for ListboxItem {
    fn widget_id(&self) -> WidgetId {
        self.node.widget_id()
    }

    fn grid(&self, grid: Grid) {
        self.node.grid(grid);
    }

    fn grid_info(&self) -> Option<Grid> {
        self.node.grid_info()
    }

    fn grid_forget(&self) {
        self.node.grid_forget();
    }

    fn destroy(&self) {
        self.node.destroy();
    }
}

impl Selectable for ListboxItem {
    fn is_selected(&self) -> bool {
        self.selected.get()
    }

    fn select(&self) {
        self.selected.set(true);
        self.node.set_background(self.style.selected.clone());
    }

    fn deselect(&self) {
        self.selected.set(false);
        self.node.set_background(self.style.normal.clone());
    }

    fn request_select(&self) {
        self.select_requested.emit(&self.widget_id());
    }

    fn on_select_request(&self, f: Box<dyn Fn(WidgetId)>) -> SubId {
        self.select_requested.subscribe(move |id| f(*id))
    }
}
