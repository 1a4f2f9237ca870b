//! Scrolling and list widgets for `gridkit`.
//!
//! - [`AutoScrollbar`]: a scrollbar that hides itself when everything fits.
//! - [`ScrollableFrame`]: a vertically scrolling container that reports which
//!   children are in view.
//! - [`Listbox`]: a single-selection list of caller-built widgets with
//!   Tk-style index arguments.
//! - [`ListboxItem`]: a clickable, hover-highlighted list entry.
//! - [`ResizableText`]: a text box that grows and shrinks with its content.

mod adapter;
mod autoscrollbar;
mod config;
mod error;
mod index;
mod item;
mod listbox;
mod resizable_text;
mod scrollable;
mod signal;

pub mod prelude;
pub mod widget;

pub use autoscrollbar::AutoScrollbar;
pub use config::{ItemStyle, ScrollConfig, TextConfig};
pub use error::{Error, Result};
pub use index::{AsIndex, Index};
pub use item::ListboxItem;
pub use listbox::{ItemList, Listbox};
pub use resizable_text::ResizableText;
pub use scrollable::ScrollableFrame;
pub use signal::{Signal, SubId};
pub use widget::WidgetId;
