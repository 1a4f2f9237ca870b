//! Synchronous observer lists.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`Signal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    subscribers: Vec<(SubId, Subscriber<T>)>,
}

/// Synchronous observer list.
///
/// Subscribers run in registration order. `emit` works on a snapshot, so a
/// subscriber may subscribe or unsubscribe without affecting the emission in
/// progress. Clones share the same subscriber list.
pub struct Signal<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut registry = self.registry.borrow_mut();
        let id = SubId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|(sid, _)| *sid != id);
        registry.subscribers.len() != before
    }

    pub fn emit(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self
            .registry
            .borrow()
            .subscribers
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        for f in snapshot {
            f(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().subscribers.is_empty()
    }
}
