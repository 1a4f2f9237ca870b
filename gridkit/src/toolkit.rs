use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Instant;

use crate::bindings::{self, Bindings};
use crate::buffer::Buffer;
use crate::event::{Event, Input, Propagation};
use crate::hit::hit_test;
use crate::layout;
use crate::node::{Node, NodeData};
use crate::render::render_to_buffer;
use crate::timer::Scheduler;

/// State every node of a toolkit can reach.
pub(crate) struct Shared {
    root: RefCell<Weak<RefCell<NodeData>>>,
    pub(crate) global: RefCell<Bindings>,
    hovered: RefCell<Vec<Node>>,
    size: Cell<(u16, u16)>,
    updating: Cell<bool>,
}

impl Shared {
    /// Layout the whole tree. Nested calls from inside layout callbacks
    /// return immediately; the outer pass picks up their changes.
    pub(crate) fn update(&self) {
        if self.updating.replace(true) {
            return;
        }
        let root = self.root.borrow().upgrade().map(|inner| Node { inner });
        if let Some(root) = root {
            let (width, height) = self.size.get();
            layout::update(&root, width, height);
        }
        self.updating.set(false);
    }
}

/// The top-level window: owns the root node, global bindings, hover state
/// and the timer queue.
///
/// The toolkit is headless; a [`Terminal`](crate::Terminal) draws it and
/// feeds it input, tests drive it directly.
pub struct Toolkit {
    shared: Rc<Shared>,
    root: Node,
    scheduler: Scheduler,
}

impl Toolkit {
    pub fn new(width: u16, height: u16) -> Self {
        let scheduler = Scheduler::new();
        let shared = Rc::new(Shared {
            root: RefCell::new(Weak::new()),
            global: RefCell::new(Bindings::new()),
            hovered: RefCell::new(Vec::new()),
            size: Cell::new((width, height)),
            updating: Cell::new(false),
        });
        let root = Node::root(Rc::downgrade(&shared), scheduler.clone());
        *shared.root.borrow_mut() = Rc::downgrade(&root.inner);

        Self {
            shared,
            root,
            scheduler,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn scheduler(&self) -> Scheduler {
        self.scheduler.clone()
    }

    pub fn size(&self) -> (u16, u16) {
        self.shared.size.get()
    }

    pub fn resize(&self, width: u16, height: u16) {
        if self.shared.size.replace((width, height)) != (width, height) {
            log::debug!("toolkit resized to {width}x{height}");
        }
    }

    /// Run layout until it settles.
    pub fn update(&self) {
        self.shared.update();
    }

    pub fn run_timers(&self, now: Instant) -> usize {
        self.scheduler.run_due(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Deepest visible node under the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Node> {
        hit_test(&self.root, i32::from(x), i32::from(y))
    }

    /// Node the pointer is currently over.
    pub fn hovered(&self) -> Option<Node> {
        self.shared.hovered.borrow().last().cloned()
    }

    pub fn render(&self, buf: &mut Buffer) {
        render_to_buffer(&self.root, buf);
    }

    /// Deliver raw input to the nodes it concerns.
    ///
    /// Button and wheel events go to the node under the pointer, then its
    /// ancestors, then global bindings, until a handler breaks. Key events
    /// go to the root and then global bindings.
    pub fn dispatch(&self, input: Input) -> Propagation {
        log::trace!("dispatch {input:?}");
        match input {
            Input::MouseMove { x, y } => {
                self.hover(x, y);
                Propagation::Continue
            }
            Input::MouseDown { x, y, button } => {
                self.hover(x, y);
                self.pointer_event(x, y, &Event::Button { x, y, button })
            }
            Input::Wheel { x, y, delta } => {
                self.hover(x, y);
                self.pointer_event(x, y, &Event::Wheel { x, y, delta })
            }
            Input::Key { key, modifiers } => {
                let event = Event::Key { key, modifiers };
                if self.root.event_generate(&event) == Propagation::Break {
                    return Propagation::Break;
                }
                self.global(&event)
            }
            Input::Resize { width, height } => {
                self.resize(width, height);
                self.update();
                Propagation::Continue
            }
        }
    }

    fn pointer_event(&self, x: u16, y: u16, event: &Event) -> Propagation {
        let mut current = self.hit_test(x, y);
        while let Some(node) = current {
            if node.event_generate(event) == Propagation::Break {
                return Propagation::Break;
            }
            current = node.parent();
        }
        self.global(event)
    }

    fn global(&self, event: &Event) -> Propagation {
        let handlers = self.shared.global.borrow().handlers(event.kind());
        bindings::run(handlers, event)
    }

    /// Update the hovered path, sending `Leave` innermost-first to nodes the
    /// pointer left and `Enter` outermost-first to nodes it entered.
    fn hover(&self, x: u16, y: u16) {
        let path = self.hit_test(x, y).map(|node| ancestry(&node)).unwrap_or_default();
        let previous = self.shared.hovered.replace(path.clone());

        for node in previous.iter().rev() {
            if !path.contains(node) {
                node.event_generate(&Event::Leave);
            }
        }
        for node in &path {
            if !previous.contains(node) {
                node.event_generate(&Event::Enter);
            }
        }
    }
}

/// `node` and its ancestors, root first.
fn ancestry(node: &Node) -> Vec<Node> {
    let mut path = vec![node.clone()];
    let mut current = node.parent();
    while let Some(parent) = current {
        current = parent.parent();
        path.push(parent);
    }
    path.reverse();
    path
}
