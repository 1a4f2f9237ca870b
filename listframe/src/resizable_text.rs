//! Text box sized to its wrapped content.

use std::cell::Cell;
use std::rc::Rc;

use gridkit::{EventKind, Grid, Node, Propagation, Timer};

use crate::config::TextConfig;
use crate::widget::{Widget, WidgetId};

/// A text box whose height follows the number of display lines its content
/// needs at its current width.
///
/// Content changes resize immediately. Width changes go through
/// [`on_configure`](Self::on_configure), which coalesces them into one
/// recompute per debounce period.
#[derive(Clone)]
pub struct ResizableText {
    inner: Rc<TextInner>,
}

struct TextInner {
    node: Node,
    line_count: Cell<usize>,
    timer: Timer,
    config: TextConfig,
}

impl ResizableText {
    pub fn new(parent: &Node) -> Self {
        Self::with_config(parent, TextConfig::default())
    }

    pub fn with_config(parent: &Node, config: TextConfig) -> Self {
        let node = Node::text(parent);
        node.set_wrap(config.wrap);
        if let Some(width) = config.width {
            node.set_width(width);
        }
        let timer = Timer::new(node.scheduler());

        let inner = Rc::new(TextInner {
            node,
            line_count: Cell::new(0),
            timer,
            config,
        });

        let weak = Rc::downgrade(&inner);
        inner.node.bind_widget(EventKind::Modified, move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.resize();
            }
            Propagation::Continue
        });

        Self { inner }
    }

    /// Recompute the display line count now.
    pub fn resize(&self) {
        self.inner.resize();
    }

    /// Schedule a recompute after the debounce delay unless one is pending.
    pub fn on_configure(&self) {
        let weak = Rc::downgrade(&self.inner);
        let scheduled = self
            .inner
            .timer
            .schedule_once(self.inner.config.resize_debounce, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.resize();
                }
            });
        if !scheduled {
            log::trace!("resize already pending for {}", self.inner.node.id());
        }
    }

    /// Call [`on_configure`](Self::on_configure) whenever the text box
    /// itself is resized.
    pub fn bind_configure(&self) {
        let this = Rc::downgrade(&self.inner);
        self.inner.node.bind_widget(EventKind::Configure, move |_| {
            if let Some(inner) = this.upgrade() {
                ResizableText { inner }.on_configure();
            }
            Propagation::Continue
        });
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.node.set_text(text);
    }

    /// Append `text`.
    pub fn insert(&self, text: &str) {
        self.inner.node.insert_text(text);
    }

    pub fn text(&self) -> String {
        self.inner.node.text_content()
    }

    /// Lines counted by the last recompute.
    pub fn line_count(&self) -> usize {
        self.inner.line_count.get()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.inner.timer.is_pending()
    }

    pub fn node(&self) -> &Node {
        &self.inner.node
    }
}

impl TextInner {
    fn resize(&self) {
        let lines = self.node.display_lines();
        if lines != self.line_count.get() {
            log::debug!("{} now {lines} lines", self.node.id());
            self.node.set_height(u16::try_from(lines).unwrap_or(u16::MAX));
            self.line_count.set(lines);
        }
        self.timer.cancel();
    }
}

impl Widget for ResizableText {
    fn widget_id(&self) -> WidgetId {
        self.inner.node.widget_id()
    }

    fn grid(&self, grid: Grid) {
        self.inner.node.grid(grid);
    }

    fn grid_info(&self) -> Option<Grid> {
        self.inner.node.grid_info()
    }

    fn grid_forget(&self) {
        self.inner.node.grid_forget();
    }

    fn destroy(&self) {
        self.inner.timer.cancel();
        self.inner.node.destroy();
    }
}
