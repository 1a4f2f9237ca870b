//! Index bookkeeping for [`Listbox`](super::Listbox), independent of any
//! toolkit.
//!
//! Every position is an `isize` while it is being resolved, because `Active`
//! with nothing selected resolves to -1 and numeric indices may be negative.
//! Each operation then decides whether a negative or too-large position is
//! clamped or ignored.

use crate::index::Index;
use crate::widget::{Selectable, WidgetId};

/// Ordered items plus the index of the selected one.
///
/// Item `i` is kept in grid row `i` of its parent.
pub struct ItemList<W> {
    items: Vec<W>,
    selected: Option<usize>,
}

impl<W> Default for ItemList<W> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
        }
    }
}

impl<W: Selectable + Clone> ItemList<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[W] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn len_isize(&self) -> isize {
        self.items.len() as isize
    }

    fn active(&self) -> isize {
        self.selected.map_or(-1, |i| i as isize)
    }

    /// Insert `new` in order before position `index`, moving each to its
    /// row in column 0, keeping any other grid options the caller set.
    /// Returns the position of the first inserted item, or `None` when the
    /// position is negative (including `Active` with no selection).
    pub fn insert(&mut self, index: Index, new: Vec<W>) -> Option<usize> {
        let point = match index {
            Index::End => self.len_isize(),
            Index::Active => self.active(),
            Index::At(i) => i.min(self.len_isize()),
        };
        if point < 0 {
            log::debug!("insert at {index} ignored: resolves to {point}");
            return None;
        }
        let point = point as usize;
        let count = new.len();
        if count == 0 {
            return Some(point);
        }

        for item in &self.items[point..] {
            let row = item.grid_info().map_or(0, |g| g.row);
            item.grid_cell(0, row + count);
        }
        for (offset, item) in new.iter().enumerate() {
            item.grid_cell(0, point + offset);
        }
        self.items.splice(point..point, new);

        if let Some(selected) = self.selected {
            if selected >= point {
                self.selected = Some(selected + count);
            }
        }
        Some(point)
    }

    /// Resolve `[first, last]` to an inclusive in-range span, or `None` when
    /// the start is out of range or the end comes before it.
    fn span(&self, first: Index, last: Option<Index>) -> Option<(usize, usize)> {
        let len = self.len_isize();
        let start = match first {
            Index::End => len - 1,
            Index::Active => self.active(),
            Index::At(i) => i.max(0),
        };
        if start < 0 || start >= len {
            return None;
        }

        let end = match last {
            None => start,
            Some(Index::End) => len - 1,
            Some(Index::Active) => self.active(),
            Some(Index::At(i)) => i,
        };
        if end < start {
            return None;
        }
        Some((start as usize, end.min(len - 1) as usize))
    }

    /// Destroy the items in `[first, last]` (only `first` when `last` is
    /// `None`) and move the rest up. Returns how many were removed.
    pub fn remove(&mut self, first: Index, last: Option<Index>) -> usize {
        let Some((start, end)) = self.span(first, last) else {
            return 0;
        };
        let removed: Vec<W> = self.items.drain(start..=end).collect();
        let count = removed.len();

        self.selected = match self.selected {
            Some(s) if (start..=end).contains(&s) => None,
            Some(s) if s > end => Some(s - count),
            other => other,
        };
        for item in &removed {
            item.destroy();
        }
        for item in &self.items[start..] {
            let row = item.grid_info().map_or(count, |g| g.row);
            item.grid_cell(0, row.saturating_sub(count));
        }
        count
    }

    /// Take every item out of the list and drop the selection. The items
    /// are returned as they were, not destroyed.
    pub fn clear(&mut self) -> Vec<W> {
        self.selected = None;
        std::mem::take(&mut self.items)
    }

    pub fn get(&self, first: Index) -> Option<W> {
        self.span(first, None).map(|(start, _)| self.items[start].clone())
    }

    pub fn get_range(&self, first: Index, last: Index) -> Vec<W> {
        self.span(first, Some(last))
            .map(|(start, end)| self.items[start..=end].to_vec())
            .unwrap_or_default()
    }

    /// The item `activate(index)` should select, `None` when empty.
    pub fn activation_target(&self, index: Index) -> Option<W> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.len_isize() - 1;
        let target = match index {
            Index::End => last,
            Index::Active => self.active(),
            Index::At(i) => i.min(last),
        };
        self.items.get(target.max(0) as usize).cloned()
    }

    pub fn curselection(&self) -> Vec<W> {
        self.selected
            .and_then(|i| self.items.get(i))
            .cloned()
            .into_iter()
            .collect()
    }

    /// Numeric value of `index`: `End` is the length, `Active` the selected
    /// position or -1.
    pub fn index(&self, index: Index) -> isize {
        match index {
            Index::End => self.len_isize(),
            Index::Active => self.active(),
            Index::At(i) => i,
        }
    }

    /// Make the item with `id` the selection. Returns its position if the
    /// selection changed.
    pub fn select(&mut self, id: WidgetId) -> Option<usize> {
        let Some(position) = self.items.iter().position(|w| w.widget_id() == id) else {
            log::warn!("selection request from {id}, which is not in the list");
            return None;
        };
        if self.selected == Some(position) {
            return None;
        }

        if let Some(previous) = self.selected.and_then(|i| self.items.get(i)) {
            previous.deselect();
        }
        self.items[position].select();
        self.selected = Some(position);
        log::debug!("selected {id} at {position}");
        Some(position)
    }
}
