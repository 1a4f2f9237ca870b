use crate::node::Node;

/// Find the deepest visible node containing the point.
///
/// Children are checked last-to-first so later siblings win where they
/// overlap. Nodes scrolled out of a viewport are never hit.
pub fn hit_test(node: &Node, x: i32, y: i32) -> Option<Node> {
    let (clip, children) = {
        let data = node.inner.borrow();
        (data.clip, data.children.clone())
    };

    if !clip?.contains(x, y) {
        return None;
    }

    children
        .iter()
        .rev()
        .find_map(|child| hit_test(child, x, y))
        .or_else(|| Some(node.clone()))
}
