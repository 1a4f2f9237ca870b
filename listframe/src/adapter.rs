//! Widget traits for plain toolkit nodes.

use gridkit::{Grid, Node, NodeId, Orient};

use crate::widget::{ScrollbarWidget, Widget, WidgetId};

impl From<NodeId> for WidgetId {
    fn from(id: NodeId) -> Self {
        WidgetId(id.get())
    }
}

impl Widget for Node {
    fn widget_id(&self) -> WidgetId {
        self.id().into()
    }

    fn grid(&self, grid: Grid) {
        Node::grid(self, grid);
    }

    fn grid_info(&self) -> Option<Grid> {
        Node::grid_info(self)
    }

    fn grid_forget(&self) {
        Node::grid_forget(self);
    }

    fn destroy(&self) {
        Node::destroy(self);
    }
}

impl ScrollbarWidget for Node {
    fn orient(&self) -> Orient {
        Node::orient(self).unwrap_or_default()
    }

    fn set_fraction(&self, first: f32, last: f32) {
        Node::set_fraction(self, first, last);
    }
}
