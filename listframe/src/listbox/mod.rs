//! A listbox whose entries are arbitrary selectable widgets.

mod model;

pub use model::ItemList;

use std::cell::RefCell;
use std::rc::Rc;

use gridkit::{Grid, Node};

use crate::config::ScrollConfig;
use crate::error::Result;
use crate::index::{AsIndex, Index};
use crate::scrollable::ScrollableFrame;
use crate::signal::{Signal, SubId};
use crate::widget::{Selectable, Widget, WidgetId};

/// Listbox-style container built on a [`ScrollableFrame`].
///
/// Items are created by the caller with [`content`](Self::content) as their
/// parent and handed to [`insert`](Self::insert), which places them and
/// listens for their selection requests. At most one item is selected.
pub struct Listbox<W: Selectable + Clone + 'static> {
    frame: ScrollableFrame,
    model: Rc<RefCell<ItemList<W>>>,
    selection_changed: Signal<usize>,
}

impl<W: Selectable + Clone + 'static> Listbox<W> {
    pub fn new(parent: &Node) -> Self {
        Self::with_config(parent, ScrollConfig::default())
    }

    pub fn with_config(parent: &Node, config: ScrollConfig) -> Self {
        Self {
            frame: ScrollableFrame::with_config(parent, config),
            model: Rc::new(RefCell::new(ItemList::new())),
            selection_changed: Signal::new(),
        }
    }

    /// Parent node for items.
    pub fn content(&self) -> &Node {
        self.frame.content()
    }

    pub fn frame(&self) -> &ScrollableFrame {
        &self.frame
    }

    /// Insert `items` before `index`. `End` appends; an index past the end
    /// is treated as `End`; a negative index (or `Active` with nothing
    /// selected) inserts nothing.
    pub fn insert(&self, index: impl Into<Index>, items: impl IntoIterator<Item = W>) {
        let items: Vec<W> = items.into_iter().collect();
        let added = items.clone();

        let inserted = self.model.borrow_mut().insert(index.into(), items);
        let Some(position) = inserted else {
            return;
        };
        for item in &added {
            self.subscribe(item);
        }
        log::debug!("inserted {} items at {position}", added.len());
        self.content().update_idletasks();
    }

    fn subscribe(&self, item: &W) {
        let model = Rc::downgrade(&self.model);
        let changed = self.selection_changed.clone();
        item.on_select_request(Box::new(move |id| {
            let Some(model) = model.upgrade() else {
                return;
            };
            let selected = model.borrow_mut().select(id);
            if let Some(index) = selected {
                changed.emit(&index);
            }
        }));
    }

    /// Delete the item at `first`.
    pub fn delete(&self, first: impl Into<Index>) {
        self.remove(first.into(), None);
    }

    /// Delete the items in `[first, last]`. An end past the list is clamped;
    /// an end before the start deletes nothing.
    pub fn delete_range(&self, first: impl Into<Index>, last: impl Into<Index>) {
        self.remove(first.into(), Some(last.into()));
    }

    fn remove(&self, first: Index, last: Option<Index>) {
        let removed = self.model.borrow_mut().remove(first, last);
        if removed > 0 {
            log::debug!("deleted {removed} items from {first}");
            self.content().update_idletasks();
        }
    }

    /// The item at `first`, if there is one.
    pub fn get(&self, first: impl Into<Index>) -> Option<W> {
        self.model.borrow().get(first.into())
    }

    /// Items in `[first, last]`.
    pub fn get_range(&self, first: impl Into<Index>, last: impl Into<Index>) -> Vec<W> {
        self.model.borrow().get_range(first.into(), last.into())
    }

    /// Select the item at `index`, clamped into the list, as if it had been
    /// clicked. Does nothing on an empty list.
    pub fn activate(&self, index: impl Into<Index>) {
        let target = self.model.borrow().activation_target(index.into());
        if let Some(item) = target {
            item.request_select();
        }
    }

    /// The selected item, as a list of zero or one.
    pub fn curselection(&self) -> Vec<W> {
        self.model.borrow().curselection()
    }

    /// Numeric value of `index`. `End` is the item count and `Active` is
    /// the selected position, or -1.
    pub fn index(&self, index: impl AsIndex) -> Result<isize> {
        let index = index.as_index()?;
        Ok(self.model.borrow().index(index))
    }

    pub fn size(&self) -> usize {
        self.model.borrow().len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.model.borrow().selected()
    }

    /// Called with the new selected position whenever the selection moves.
    pub fn on_select(&self, f: impl Fn(usize) + 'static) -> SubId {
        self.selection_changed.subscribe(move |index| f(*index))
    }

    pub fn scroll_bottom(&self) {
        self.frame.scroll_bottom();
    }
}

impl<W: Selectable + Clone + 'static> Widget for Listbox<W> {
    fn widget_id(&self) -> WidgetId {
        self.frame.widget_id()
    }

    fn grid(&self, grid: Grid) {
        self.frame.grid(grid);
    }

    fn grid_info(&self) -> Option<Grid> {
        self.frame.grid_info()
    }

    fn grid_forget(&self) {
        self.frame.grid_forget();
    }

    /// Destroy the frame and every item, leaving the listbox empty.
    fn destroy(&self) {
        let items = self.model.borrow_mut().clear();
        for item in &items {
            item.destroy();
        }
        self.frame.destroy();
    }
}
