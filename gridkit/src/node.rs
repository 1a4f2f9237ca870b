use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::bindings::{self, BindingId, Bindings, Handler};
use crate::event::{Event, EventKind, Propagation};
use crate::layout::{self, Rect};
use crate::text::{self, TextWrap};
use crate::timer::{Scheduler, TimerId};
use crate::toolkit::Shared;
use crate::types::{Color, Grid, Orient, Style};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Columns a text node asks for when nothing else is configured.
pub const DEFAULT_TEXT_WIDTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollUnit {
    Units,
    Pages,
}

/// What a scrollbar asks its view to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    Scroll(i32, ScrollUnit),
    MoveTo(f32),
}

pub type ScrollCommand = Rc<dyn Fn(ScrollAction)>;
pub type YScrollCommand = Rc<dyn Fn(f32, f32)>;

pub(crate) struct ScrollbarState {
    pub orient: Orient,
    pub first: f32,
    pub last: f32,
    pub command: Option<ScrollCommand>,
}

pub(crate) struct ViewportState {
    /// Node embedded at the viewport origin.
    pub window: Option<Node>,
    /// Width forced onto the window; its natural width otherwise.
    pub window_width: Option<u16>,
    pub scroll_region: Option<Rect>,
    pub offset_y: i32,
    pub yscroll: Option<YScrollCommand>,
    /// Fractions last passed to `yscroll`.
    pub reported: Option<(f32, f32)>,
}

pub(crate) enum Kind {
    Frame,
    Label { text: String },
    Text { text: String, wrap: TextWrap },
    Scrollbar(ScrollbarState),
    Viewport(ViewportState),
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Frame => "frame",
            Kind::Label { .. } => "label",
            Kind::Text { .. } => "text",
            Kind::Scrollbar(_) => "scrollbar",
            Kind::Viewport(_) => "viewport",
        }
    }
}

pub(crate) struct NodeData {
    pub id: NodeId,
    pub kind: Kind,
    pub parent: Weak<RefCell<NodeData>>,
    pub children: Vec<Node>,
    pub grid: Option<Grid>,
    pub column_weights: HashMap<usize, u16>,
    pub row_weights: HashMap<usize, u16>,
    /// Requested size; text nodes measure height in lines.
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub style: Style,
    pub ipadx: u16,
    pub ipady: u16,
    pub bindings: Bindings,
    /// Laid-out rectangle in screen coordinates, `None` while unmapped.
    pub rect: Option<Rect>,
    /// Visible part of `rect`, `None` when entirely clipped away.
    pub clip: Option<Rect>,
    pub destroyed: bool,
    pub toolkit: Weak<Shared>,
    pub scheduler: Scheduler,
}

/// Start and length of a scrollbar thumb over a trough of `len` cells.
/// The thumb is never shorter than one cell.
pub(crate) fn thumb_span(first: f32, last: f32, len: u16) -> (u16, u16) {
    if len == 0 {
        return (0, 0);
    }
    let total = f32::from(len);
    let start = (first.clamp(0.0, 1.0) * total).round() as u16;
    let end = (last.clamp(0.0, 1.0) * total).round() as u16;
    let start = start.min(len - 1);
    let size = end.saturating_sub(start).clamp(1, len - start);
    (start, size)
}

/// Handle to a retained widget node.
///
/// Cloning the handle does not clone the node. A node stays in its parent's
/// child list until [`Node::destroy`] is called.
#[derive(Clone)]
pub struct Node {
    pub(crate) inner: Rc<RefCell<NodeData>>,
}

/// Non-owning handle, for bindings that refer back to their own node.
#[derive(Clone)]
pub struct WeakNode {
    inner: Weak<RefCell<NodeData>>,
}

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.inner.upgrade().map(|inner| Node { inner })
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Node")
            .field("id", &data.id)
            .field("kind", &data.kind.name())
            .field("grid", &data.grid)
            .field("rect", &data.rect)
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Node {}

impl Node {
    pub(crate) fn root(toolkit: Weak<Shared>, scheduler: Scheduler) -> Self {
        Self::build(Kind::Frame, Weak::new(), toolkit, scheduler)
    }

    fn build(
        kind: Kind,
        parent: Weak<RefCell<NodeData>>,
        toolkit: Weak<Shared>,
        scheduler: Scheduler,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                id: NodeId::next(),
                kind,
                parent,
                children: Vec::new(),
                grid: None,
                column_weights: HashMap::new(),
                row_weights: HashMap::new(),
                width: None,
                height: None,
                style: Style::default(),
                ipadx: 0,
                ipady: 0,
                bindings: Bindings::new(),
                rect: None,
                clip: None,
                destroyed: false,
                toolkit,
                scheduler,
            })),
        }
    }

    fn child_of(parent: &Node, kind: Kind) -> Self {
        let (toolkit, scheduler) = {
            let p = parent.inner.borrow();
            (p.toolkit.clone(), p.scheduler.clone())
        };
        let node = Self::build(kind, Rc::downgrade(&parent.inner), toolkit, scheduler);
        parent.inner.borrow_mut().children.push(node.clone());
        log::trace!("created {} {} in {}", node.kind_name(), node.id(), parent.id());
        node
    }

    /// A plain container that lays out its gridded children.
    pub fn frame(parent: &Node) -> Self {
        Self::child_of(parent, Kind::Frame)
    }

    /// A single line of text, the basis for buttons and list items.
    pub fn label(parent: &Node, text: impl Into<String>) -> Self {
        Self::child_of(parent, Kind::Label { text: text.into() })
    }

    /// Multi-line wrapped text.
    pub fn text(parent: &Node) -> Self {
        Self::child_of(
            parent,
            Kind::Text {
                text: String::new(),
                wrap: TextWrap::default(),
            },
        )
    }

    /// A scrollbar; clicking the trough on either side of the thumb pages
    /// the attached view.
    pub fn scrollbar(parent: &Node, orient: Orient) -> Self {
        let node = Self::child_of(
            parent,
            Kind::Scrollbar(ScrollbarState {
                orient,
                first: 0.0,
                last: 1.0,
                command: None,
            }),
        );
        let weak = node.downgrade();
        node.bind_widget(EventKind::Button, move |event| {
            let (Some(node), Event::Button { x, y, .. }) = (weak.upgrade(), event) else {
                return Propagation::Continue;
            };
            if let Some(action) = node.trough_action(*x, *y) {
                node.invoke(action);
            }
            Propagation::Break
        });
        node
    }

    fn trough_action(&self, x: u16, y: u16) -> Option<ScrollAction> {
        let (orient, first, last, rect) = {
            let data = self.inner.borrow();
            let Kind::Scrollbar(state) = &data.kind else {
                return None;
            };
            (state.orient, state.first, state.last, data.rect?)
        };
        let (pos, len) = match orient {
            Orient::Vertical => (i32::from(y) - rect.y, rect.height),
            Orient::Horizontal => (i32::from(x) - rect.x, rect.width),
        };
        let (start, size) = thumb_span(first, last, len);
        if pos < i32::from(start) {
            Some(ScrollAction::Scroll(-1, ScrollUnit::Pages))
        } else if pos >= i32::from(start) + i32::from(size) {
            Some(ScrollAction::Scroll(1, ScrollUnit::Pages))
        } else {
            None
        }
    }

    /// A clipping region showing one embedded window, scrollable vertically.
    pub fn viewport(parent: &Node) -> Self {
        Self::child_of(
            parent,
            Kind::Viewport(ViewportState {
                window: None,
                window_width: None,
                scroll_region: None,
                offset_y: 0,
                yscroll: None,
                reported: None,
            }),
        )
    }

    pub fn id(&self) -> NodeId {
        self.inner.borrow().id
    }

    pub fn kind_name(&self) -> &'static str {
        self.inner.borrow().kind.name()
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn parent(&self) -> Option<Node> {
        self.inner.borrow().parent.upgrade().map(|inner| Node { inner })
    }

    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Place the node in its parent's grid, replacing any previous placement.
    pub fn grid(&self, grid: Grid) {
        let mut data = self.inner.borrow_mut();
        if data.grid != Some(grid) {
            log::debug!("grid {} at column {} row {}", data.id, grid.column, grid.row);
        }
        data.grid = Some(grid);
    }

    pub fn grid_info(&self) -> Option<Grid> {
        self.inner.borrow().grid
    }

    /// Remove the node from layout; it keeps its configuration and can be
    /// gridded again.
    pub fn grid_forget(&self) {
        let mut data = self.inner.borrow_mut();
        if data.grid.take().is_some() {
            log::debug!("grid_forget {}", data.id);
        }
    }

    pub fn columnconfigure(&self, column: usize, weight: u16) {
        self.inner.borrow_mut().column_weights.insert(column, weight);
    }

    pub fn rowconfigure(&self, row: usize, weight: u16) {
        self.inner.borrow_mut().row_weights.insert(row, weight);
    }

    pub fn set_width(&self, width: u16) {
        self.inner.borrow_mut().width = Some(width);
    }

    /// Requested height; in lines for text nodes.
    pub fn set_height(&self, height: u16) {
        self.inner.borrow_mut().height = Some(height);
    }

    pub fn requested_height(&self) -> Option<u16> {
        self.inner.borrow().height
    }

    /// Internal padding on each side.
    pub fn set_padding(&self, padx: u16, pady: u16) {
        let mut data = self.inner.borrow_mut();
        data.ipadx = padx;
        data.ipady = pady;
    }

    /// Size the node would like, given its content and children.
    pub fn natural_size(&self) -> (u16, u16) {
        layout::natural_size(self)
    }

    /// Laid-out rectangle from the last layout pass.
    pub fn rect(&self) -> Option<Rect> {
        self.inner.borrow().rect
    }

    /// Visible part of the node from the last layout pass.
    pub fn clip(&self) -> Option<Rect> {
        self.inner.borrow().clip
    }

    pub fn is_mapped(&self) -> bool {
        self.inner.borrow().rect.is_some()
    }

    /// Mapped and at least partly inside every clipping ancestor.
    pub fn is_viewable(&self) -> bool {
        self.inner.borrow().clip.is_some()
    }

    // ------------------------------------------------------------------
    // Appearance
    // ------------------------------------------------------------------

    pub fn style(&self) -> Style {
        self.inner.borrow().style.clone()
    }

    pub fn configure_style(&self, f: impl FnOnce(&mut Style)) {
        f(&mut self.inner.borrow_mut().style);
    }

    pub fn set_background(&self, color: impl Into<Color>) {
        self.inner.borrow_mut().style.background = Some(color.into());
    }

    pub fn background(&self) -> Option<Color> {
        self.inner.borrow().style.background.clone()
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Label or text content; empty for other kinds.
    pub fn text_content(&self) -> String {
        match &self.inner.borrow().kind {
            Kind::Label { text } | Kind::Text { text, .. } => text.clone(),
            _ => String::new(),
        }
    }

    /// Replace the text and fire `Modified` if it changed.
    pub fn set_text(&self, value: impl Into<String>) {
        let value = value.into();
        let changed = match &mut self.inner.borrow_mut().kind {
            Kind::Label { text } | Kind::Text { text, .. } if *text != value => {
                *text = value;
                true
            }
            _ => false,
        };
        if changed {
            self.event_generate(&Event::Modified);
        }
    }

    /// Append to the text and fire `Modified`.
    pub fn insert_text(&self, value: &str) {
        if value.is_empty() {
            return;
        }
        let changed = match &mut self.inner.borrow_mut().kind {
            Kind::Label { text } | Kind::Text { text, .. } => {
                text.push_str(value);
                true
            }
            _ => false,
        };
        if changed {
            self.event_generate(&Event::Modified);
        }
    }

    pub fn set_wrap(&self, mode: TextWrap) {
        if let Kind::Text { wrap, .. } = &mut self.inner.borrow_mut().kind {
            *wrap = mode;
        }
    }

    /// Display lines the text needs at the node's current width.
    ///
    /// Uses the laid-out width when mapped, the requested width otherwise.
    pub fn display_lines(&self) -> usize {
        let data = self.inner.borrow();
        let (content, mode) = match &data.kind {
            Kind::Text { text, wrap } => (text.as_str(), *wrap),
            Kind::Label { text } => (text.as_str(), TextWrap::None),
            _ => return 0,
        };
        let width = data
            .rect
            .map(|r| r.width)
            .or(data.width)
            .unwrap_or(DEFAULT_TEXT_WIDTH)
            .saturating_sub(data.ipadx * 2);
        text::display_line_count(content, width as usize, mode)
    }

    // ------------------------------------------------------------------
    // Scrollbar
    // ------------------------------------------------------------------

    /// Orientation, for scrollbar nodes.
    pub fn orient(&self) -> Option<Orient> {
        match &self.inner.borrow().kind {
            Kind::Scrollbar(state) => Some(state.orient),
            _ => None,
        }
    }

    /// Set the visible fraction `[first, last]` a scrollbar displays.
    pub fn set_fraction(&self, first: f32, last: f32) {
        if let Kind::Scrollbar(state) = &mut self.inner.borrow_mut().kind {
            state.first = first.clamp(0.0, 1.0);
            state.last = last.clamp(0.0, 1.0);
        }
    }

    pub fn fraction(&self) -> Option<(f32, f32)> {
        match &self.inner.borrow().kind {
            Kind::Scrollbar(state) => Some((state.first, state.last)),
            _ => None,
        }
    }

    /// Callback a scrollbar invokes when clicked.
    pub fn set_command(&self, command: impl Fn(ScrollAction) + 'static) {
        if let Kind::Scrollbar(state) = &mut self.inner.borrow_mut().kind {
            state.command = Some(Rc::new(command));
        }
    }

    /// Invoke a scrollbar's command as if the user had clicked it.
    pub fn invoke(&self, action: ScrollAction) {
        let command = match &self.inner.borrow().kind {
            Kind::Scrollbar(state) => state.command.clone(),
            _ => None,
        };
        if let Some(command) = command {
            command(action);
        }
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    /// Embed `window` at the viewport's origin.
    pub fn create_window(&self, window: &Node) {
        if let Kind::Viewport(state) = &mut self.inner.borrow_mut().kind {
            state.window = Some(window.clone());
        }
    }

    pub fn window(&self) -> Option<Node> {
        match &self.inner.borrow().kind {
            Kind::Viewport(state) => state.window.clone(),
            _ => None,
        }
    }

    pub fn set_window_width(&self, width: u16) {
        if let Kind::Viewport(state) = &mut self.inner.borrow_mut().kind {
            if state.window_width != Some(width) {
                log::debug!("viewport window width -> {width}");
            }
            state.window_width = Some(width);
        }
    }

    pub fn window_width(&self) -> Option<u16> {
        match &self.inner.borrow().kind {
            Kind::Viewport(state) => state.window_width,
            _ => None,
        }
    }

    /// Region the view can scroll over; `None` falls back to the window bounds.
    pub fn set_scroll_region(&self, region: Option<Rect>) {
        if let Kind::Viewport(state) = &mut self.inner.borrow_mut().kind {
            state.scroll_region = region;
        }
    }

    pub fn scroll_region(&self) -> Option<Rect> {
        match &self.inner.borrow().kind {
            Kind::Viewport(state) => state.scroll_region,
            _ => None,
        }
    }

    /// Bounding box of the embedded window in viewport coordinates.
    pub fn bbox_all(&self) -> Option<Rect> {
        let window = self.window()?;
        let rect = window.rect()?;
        Some(Rect::from_size(rect.width, rect.height))
    }

    /// Called with `(first, last)` whenever the visible fraction changes.
    pub fn set_yscrollcommand(&self, command: impl Fn(f32, f32) + 'static) {
        if let Kind::Viewport(state) = &mut self.inner.borrow_mut().kind {
            state.yscroll = Some(Rc::new(command));
            state.reported = None;
        }
    }

    /// Visible vertical fraction from the last layout pass.
    pub fn yview(&self) -> (f32, f32) {
        layout::y_fractions(&self.inner.borrow()).unwrap_or((0.0, 1.0))
    }

    pub fn scroll_offset(&self) -> i32 {
        match &self.inner.borrow().kind {
            Kind::Viewport(state) => state.offset_y,
            _ => 0,
        }
    }

    /// Scroll by `amount` units (rows) or pages, then re-layout.
    pub fn yview_scroll(&self, amount: i32, unit: ScrollUnit) {
        {
            let mut data = self.inner.borrow_mut();
            let page = data
                .rect
                .map(|r| i32::from(r.height).saturating_sub(1).max(1))
                .unwrap_or(1);
            if let Kind::Viewport(state) = &mut data.kind {
                let step = match unit {
                    ScrollUnit::Units => amount,
                    ScrollUnit::Pages => amount * page,
                };
                state.offset_y = (state.offset_y + step).max(0);
                log::trace!("yview_scroll {amount} {unit:?} -> offset {}", state.offset_y);
            }
        }
        self.update_idletasks();
    }

    /// Scroll so `fraction` of the scroll region is above the view, then re-layout.
    pub fn yview_moveto(&self, fraction: f32) {
        {
            let mut data = self.inner.borrow_mut();
            let region = layout::scroll_region_height(&data);
            if let Kind::Viewport(state) = &mut data.kind {
                state.offset_y = (fraction.clamp(0.0, 1.0) * region as f32).round() as i32;
            }
        }
        self.update_idletasks();
    }

    /// Route a scrollbar action to this viewport.
    pub fn yview_action(&self, action: ScrollAction) {
        match action {
            ScrollAction::Scroll(amount, unit) => self.yview_scroll(amount, unit),
            ScrollAction::MoveTo(fraction) => self.yview_moveto(fraction),
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Bind `handler` to `kind`, replacing earlier handlers for that kind.
    /// Widget bindings stay.
    pub fn bind(&self, kind: EventKind, handler: impl Fn(&Event) -> Propagation + 'static) -> BindingId {
        self.inner.borrow_mut().bindings.set(kind, Rc::new(handler))
    }

    /// Bind `handler` to `kind` after any existing handlers.
    pub fn bind_add(
        &self,
        kind: EventKind,
        handler: impl Fn(&Event) -> Propagation + 'static,
    ) -> BindingId {
        self.inner.borrow_mut().bindings.add(kind, Rc::new(handler))
    }

    /// Bind a handler that belongs to the widget built on this node.
    ///
    /// It runs after the instance handlers unless one of them breaks, and
    /// only [`unbind_id`](Self::unbind_id) or destroying the node removes it.
    pub fn bind_widget(
        &self,
        kind: EventKind,
        handler: impl Fn(&Event) -> Propagation + 'static,
    ) -> BindingId {
        self.inner.borrow_mut().bindings.add_widget(kind, Rc::new(handler))
    }

    /// Remove the instance handlers for `kind`.
    pub fn unbind(&self, kind: EventKind) {
        self.inner.borrow_mut().bindings.remove_kind(kind);
    }

    pub fn unbind_id(&self, id: BindingId) -> bool {
        self.inner.borrow_mut().bindings.remove(id)
    }

    pub fn has_binding(&self, kind: EventKind) -> bool {
        self.inner.borrow().bindings.has(kind)
    }

    /// Bind a toolkit-wide handler, replacing earlier global handlers for `kind`.
    pub fn bind_all(&self, kind: EventKind, handler: impl Fn(&Event) -> Propagation + 'static) {
        let handler: Handler = Rc::new(handler);
        if let Some(shared) = self.inner.borrow().toolkit.upgrade() {
            shared.global.borrow_mut().set(kind, handler);
        }
    }

    pub fn unbind_all(&self, kind: EventKind) {
        if let Some(shared) = self.inner.borrow().toolkit.upgrade() {
            shared.global.borrow_mut().remove_kind(kind);
        }
    }

    /// Run this node's own handlers for `event`.
    pub fn event_generate(&self, event: &Event) -> Propagation {
        let handlers = self.inner.borrow().bindings.handlers(event.kind());
        log::trace!("{} <- {:?} ({} handlers)", self.id(), event, handlers.len());
        bindings::run(handlers, event)
    }

    // ------------------------------------------------------------------
    // Scheduling and lifecycle
    // ------------------------------------------------------------------

    pub fn scheduler(&self) -> Scheduler {
        self.inner.borrow().scheduler.clone()
    }

    pub fn after(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        self.scheduler().after(delay, callback)
    }

    pub fn after_cancel(&self, id: TimerId) -> bool {
        self.scheduler().cancel(id)
    }

    /// Run pending layout now, delivering `Configure` and y-scroll callbacks.
    pub fn update_idletasks(&self) {
        let shared = self.inner.borrow().toolkit.upgrade();
        if let Some(shared) = shared {
            shared.update();
        }
    }

    /// Destroy the node and its subtree and detach it from its parent.
    pub fn destroy(&self) {
        let (parent, children, id) = {
            let mut data = self.inner.borrow_mut();
            if data.destroyed {
                return;
            }
            data.destroyed = true;
            data.grid = None;
            data.rect = None;
            data.clip = None;
            data.bindings.clear();
            if let Kind::Viewport(state) = &mut data.kind {
                state.window = None;
                state.yscroll = None;
            }
            if let Kind::Scrollbar(state) = &mut data.kind {
                state.command = None;
            }
            (data.parent.upgrade(), std::mem::take(&mut data.children), data.id)
        };

        for child in children {
            child.destroy();
        }

        if let Some(parent) = parent {
            let mut parent = parent.borrow_mut();
            parent.children.retain(|c| !Rc::ptr_eq(&c.inner, &self.inner));
            if let Kind::Viewport(state) = &mut parent.kind {
                if state.window.as_ref() == Some(self) {
                    state.window = None;
                }
            }
        }
        log::debug!("destroyed {id}");
    }
}
