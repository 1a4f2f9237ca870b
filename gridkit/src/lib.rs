//! A small retained-mode widget toolkit for the terminal.
//!
//! Nodes form a tree under a [`Toolkit`]. Each node is placed in its
//! parent's grid, gets a rectangle from the layout pass and receives events
//! through per-node bindings. A [`Terminal`] draws the tree with crossterm
//! and turns terminal input into [`Input`] for [`Toolkit::dispatch`].

pub mod bindings;
pub mod buffer;
pub mod event;
pub mod hit;
pub mod layout;
pub mod node;
pub mod render;
pub mod terminal;
pub mod text;
pub mod timer;
pub mod toolkit;
pub mod types;

pub use bindings::BindingId;
pub use buffer::{Buffer, Cell};
pub use event::{Event, EventKind, Input, Key, Modifiers, MouseButton, Propagation};
pub use hit::hit_test;
pub use layout::Rect;
pub use node::{Node, NodeId, ScrollAction, ScrollUnit, WeakNode};
pub use terminal::Terminal;
pub use text::TextWrap;
pub use timer::{Scheduler, Timer, TimerId};
pub use toolkit::Toolkit;
pub use types::*;
