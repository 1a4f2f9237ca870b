//! One-shot deferred callbacks run by the event loop.
//!
//! Nothing here spawns threads: the loop asks the [`Scheduler`] for its next
//! deadline, sleeps or polls input until then, and calls
//! [`Scheduler::run_due`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Entry {
    id: TimerId,
    deadline: Instant,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared queue of pending one-shot callbacks.
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<TimerQueue>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` once, no earlier than `delay` from now.
    pub fn after(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        self.after_at(Instant::now() + delay, callback)
    }

    pub fn after_at(&self, deadline: Instant, callback: impl FnOnce() + 'static) -> TimerId {
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;
        queue.entries.push(Entry {
            id,
            deadline,
            callback: Box::new(callback),
        });
        id
    }

    /// Drop a pending callback. Returns false if it already ran.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.entries.len();
        queue.entries.retain(|e| e.id != id);
        queue.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.borrow().entries.iter().any(|e| e.id == id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow().entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().entries.is_empty()
    }

    /// Run every callback whose deadline is at or before `now`, earliest
    /// first. Callbacks scheduled while running wait for the next call.
    pub fn run_due(&self, now: Instant) -> usize {
        let mut due = {
            let mut queue = self.queue.borrow_mut();
            let (due, pending): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut queue.entries)
                .into_iter()
                .partition(|e| e.deadline <= now);
            queue.entries = pending;
            due
        };
        due.sort_by_key(|e| (e.deadline, e.id));

        let count = due.len();
        for entry in due {
            log::trace!("timer {:?} fired", entry.id);
            (entry.callback)();
        }
        count
    }
}

/// A debounce slot: at most one pending callback at a time.
///
/// `schedule_once` while a callback is pending is absorbed; the pending one
/// still fires at its original deadline.
#[derive(Clone)]
pub struct Timer {
    scheduler: Scheduler,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl Timer {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Schedule `callback` unless one is already pending. Returns whether
    /// it was scheduled.
    pub fn schedule_once(&self, delay: Duration, callback: impl FnOnce() + 'static) -> bool {
        if self.is_pending() {
            return false;
        }

        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.after(delay, move || {
            pending.set(None);
            callback();
        });
        self.pending.set(Some(id));
        true
    }

    pub fn cancel(&self) -> bool {
        match self.pending.take() {
            Some(id) => self.scheduler.cancel(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}
