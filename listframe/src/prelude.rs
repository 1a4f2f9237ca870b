//! Common imports for building with listframe.

pub use crate::widget::{Selectable, ScrollbarWidget, Widget};
pub use crate::{
    AutoScrollbar, Index, ItemStyle, Listbox, ListboxItem, ResizableText, ScrollConfig,
    ScrollableFrame, TextConfig,
};
