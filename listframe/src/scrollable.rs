//! Vertically scrolling container with visibility tracking.

use std::cell::RefCell;
use std::rc::Rc;

use gridkit::{Event, EventKind, Grid, Node, Propagation, ScrollUnit, Sticky, Timer};

use crate::autoscrollbar::AutoScrollbar;
use crate::config::ScrollConfig;
use crate::signal::{Signal, SubId};
use crate::widget::{Widget, WidgetId};

/// A frame whose content scrolls vertically inside a viewport, with a
/// scrollbar that only appears when the content does not fit.
///
/// Children go in [`content`](Self::content). The frame tracks which of
/// them intersect the viewport and reports changes through
/// [`on_shown`](Self::on_shown) and [`on_hidden`](Self::on_hidden).
#[derive(Clone)]
pub struct ScrollableFrame {
    inner: Rc<Inner>,
}

struct Inner {
    outer: Node,
    viewport: Node,
    content: Node,
    vsb: AutoScrollbar<Node>,
    settle: Timer,
    config: ScrollConfig,
    visible: RefCell<Vec<WidgetId>>,
    shown: Signal<WidgetId>,
    hidden: Signal<WidgetId>,
}

impl ScrollableFrame {
    pub fn new(parent: &Node) -> Self {
        Self::with_config(parent, ScrollConfig::default())
    }

    pub fn with_config(parent: &Node, config: ScrollConfig) -> Self {
        let outer = Node::frame(parent);
        outer.columnconfigure(0, 1);
        outer.columnconfigure(1, 0);
        outer.rowconfigure(0, 1);

        let viewport = Node::viewport(&outer);
        viewport.grid(Grid::at(0, 0).sticky(Sticky::NSEW));

        let content = Node::frame(&viewport);
        content.columnconfigure(0, 1);
        viewport.create_window(&content);

        if let Some(background) = &config.background {
            viewport.set_background(background.clone());
            content.set_background(background.clone());
        }

        let vsb = AutoScrollbar::vertical(&outer, 1, 0);
        let settle = Timer::new(outer.scheduler());

        let inner = Rc::new(Inner {
            outer,
            viewport,
            content,
            vsb,
            settle,
            config,
            visible: RefCell::new(Vec::new()),
            shown: Signal::new(),
            hidden: Signal::new(),
        });
        Inner::connect(&inner);

        Self { inner }
    }

    /// Flush pending layout, then scroll to the end of the content.
    pub fn scroll_bottom(&self) {
        self.inner.viewport.update_idletasks();
        self.inner.viewport.yview_moveto(1.0);
    }

    /// Content children currently inside the viewport, top to bottom.
    pub fn visible_widgets(&self) -> Vec<WidgetId> {
        self.inner.visible.borrow().clone()
    }

    pub fn on_shown(&self, f: impl Fn(WidgetId) + 'static) -> SubId {
        self.inner.shown.subscribe(move |id| f(*id))
    }

    pub fn on_hidden(&self, f: impl Fn(WidgetId) + 'static) -> SubId {
        self.inner.hidden.subscribe(move |id| f(*id))
    }

    pub fn outer(&self) -> &Node {
        &self.inner.outer
    }

    /// Parent for scrolled children.
    pub fn content(&self) -> &Node {
        &self.inner.content
    }

    pub fn viewport(&self) -> &Node {
        &self.inner.viewport
    }

    pub fn scrollbar(&self) -> &AutoScrollbar<Node> {
        &self.inner.vsb
    }
}

impl Inner {
    fn connect(this: &Rc<Self>) {
        let weak = Rc::downgrade(this);
        this.viewport.set_yscrollcommand(move |first, last| {
            if let Some(inner) = weak.upgrade() {
                inner.vsb.set(first, last);
                inner.refresh_visible();
            }
        });

        let weak = Rc::downgrade(this);
        this.vsb.bar().set_command(move |action| {
            if let Some(inner) = weak.upgrade() {
                inner.viewport.yview_action(action);
            }
        });

        let weak = Rc::downgrade(this);
        this.content.bind_widget(EventKind::Configure, move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.viewport.set_scroll_region(inner.viewport.bbox_all());
                inner.refresh_visible();
            }
            Propagation::Continue
        });

        let weak = Rc::downgrade(this);
        this.viewport.bind_widget(EventKind::Configure, move |event| {
            if let (Some(inner), Event::Configure { width, .. }) = (weak.upgrade(), event) {
                inner.on_viewport_configure(*width);
            }
            Propagation::Continue
        });

        let weak = Rc::downgrade(this);
        this.content.bind_widget(EventKind::Enter, move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.bind_wheel();
            }
            Propagation::Continue
        });

        let weak = Rc::downgrade(this);
        this.content.bind_widget(EventKind::Leave, move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.content.unbind_all(EventKind::Wheel);
            }
            Propagation::Continue
        });
    }

    /// Resize the content to the viewport now, and again once resizing has
    /// settled. Configure events in between are dropped.
    fn on_viewport_configure(self: &Rc<Self>, width: u16) {
        if self.settle.is_pending() {
            return;
        }
        self.viewport.set_window_width(width);

        let weak = Rc::downgrade(self);
        self.settle.schedule_once(self.config.settle_delay, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Some(rect) = inner.viewport.rect() {
                inner.viewport.set_window_width(rect.width);
            }
            inner.viewport.update_idletasks();
        });
    }

    fn bind_wheel(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.content.bind_all(EventKind::Wheel, move |event| {
            if let (Some(inner), Event::Wheel { delta, .. }) = (weak.upgrade(), event) {
                inner.on_wheel(*delta);
            }
            Propagation::Continue
        });
    }

    fn on_wheel(&self, delta: i16) {
        if self.vsb.is_hidden() || delta == 0 {
            return;
        }
        let direction = -i32::from(delta.signum());
        self.viewport
            .yview_scroll(direction * self.config.wheel_units, ScrollUnit::Units);
    }

    /// Recompute which content children are in view and announce changes.
    fn refresh_visible(&self) {
        let mut now: Vec<(i32, WidgetId)> = self
            .content
            .children()
            .iter()
            .filter(|child| child.is_viewable())
            .filter_map(|child| child.rect().map(|r| (r.y, child.widget_id())))
            .collect();
        now.sort_by_key(|(y, _)| *y);
        let now: Vec<WidgetId> = now.into_iter().map(|(_, id)| id).collect();

        let previous = self.visible.replace(now.clone());
        if previous == now {
            return;
        }
        for id in previous.iter().filter(|id| !now.contains(id)) {
            log::trace!("{id} scrolled out of view");
            self.hidden.emit(id);
        }
        for id in now.iter().filter(|id| !previous.contains(id)) {
            log::trace!("{id} scrolled into view");
            self.shown.emit(id);
        }
    }
}

impl Widget for ScrollableFrame {
    fn widget_id(&self) -> WidgetId {
        self.inner.outer.widget_id()
    }

    fn grid(&self, grid: Grid) {
        self.inner.outer.grid(grid);
    }

    fn grid_info(&self) -> Option<Grid> {
        self.inner.outer.grid_info()
    }

    fn grid_forget(&self) {
        self.inner.outer.grid_forget();
    }

    fn destroy(&self) {
        self.inner.settle.cancel();
        self.inner.content.unbind_all(EventKind::Wheel);
        self.inner.outer.destroy();
    }
}
