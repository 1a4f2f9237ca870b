use std::rc::Rc;

use crate::event::{Event, EventKind, Propagation};

pub type Handler = Rc<dyn Fn(&Event) -> Propagation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

/// Which table a binding lives in.
///
/// Widget bindings are wiring a widget installs on its own nodes. They run
/// after the node's instance bindings and are left alone by
/// [`Bindings::set`] and [`Bindings::remove_kind`], so a caller binding the
/// same event does not unhook the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Instance,
    Widget,
}

/// Event handlers attached to a node (or to the toolkit for global bindings).
///
/// Handlers run instance bindings first, each tier in the order added.
/// Callers always take a snapshot with [`Bindings::handlers`] before
/// invoking, so a handler may rebind or unbind freely.
#[derive(Default)]
pub struct Bindings {
    next_id: u64,
    entries: Vec<(BindingId, EventKind, Tier, Handler)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every instance handler for `kind` with `handler`.
    pub fn set(&mut self, kind: EventKind, handler: Handler) -> BindingId {
        self.remove_kind(kind);
        self.add(kind, handler)
    }

    /// Append `handler` after the existing instance handlers for `kind`.
    pub fn add(&mut self, kind: EventKind, handler: Handler) -> BindingId {
        self.push(kind, Tier::Instance, handler)
    }

    /// Append a widget binding for `kind`.
    pub fn add_widget(&mut self, kind: EventKind, handler: Handler) -> BindingId {
        self.push(kind, Tier::Widget, handler)
    }

    fn push(&mut self, kind: EventKind, tier: Tier, handler: Handler) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, tier, handler));
        id
    }

    /// Remove one binding of either tier.
    pub fn remove(&mut self, id: BindingId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, ..)| *entry != id);
        self.entries.len() != before
    }

    /// Remove the instance handlers for `kind`.
    pub fn remove_kind(&mut self, kind: EventKind) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|(_, k, tier, _)| *k != kind || *tier == Tier::Widget);
        before - self.entries.len()
    }

    /// Handlers for `kind`: instance bindings, then widget bindings.
    pub fn handlers(&self, kind: EventKind) -> Vec<Handler> {
        [Tier::Instance, Tier::Widget]
            .into_iter()
            .flat_map(move |tier| {
                self.entries
                    .iter()
                    .filter(move |(_, k, t, _)| *k == kind && *t == tier)
                    .map(|(.., h)| Rc::clone(h))
            })
            .collect()
    }

    /// Whether an instance handler is bound for `kind`.
    pub fn has(&self, kind: EventKind) -> bool {
        self.entries
            .iter()
            .any(|(_, k, tier, _)| *k == kind && *tier == Tier::Instance)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run `handlers` in order until one breaks.
pub(crate) fn run(handlers: Vec<Handler>, event: &Event) -> Propagation {
    for handler in handlers {
        if handler(event) == Propagation::Break {
            return Propagation::Break;
        }
    }
    Propagation::Continue
}
