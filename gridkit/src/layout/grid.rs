use std::collections::HashMap;

use super::Rect;
use crate::event::Event;
use crate::node::{Kind, Node, NodeData, NodeId, YScrollCommand, DEFAULT_TEXT_WIDTH};
use crate::text::{display_line_count, display_width};
use crate::types::Grid;

/// Handlers may change geometry, so layout repeats until nothing fires.
const MAX_PASSES: usize = 8;

enum Deferred {
    Configure(Node, u16, u16),
    YScroll(YScrollCommand, f32, f32),
}

/// Lay out the tree under `root` and deliver the resulting callbacks,
/// repeating while callbacks keep changing geometry.
pub(crate) fn update(root: &Node, width: u16, height: u16) {
    for pass in 0..MAX_PASSES {
        let deferred = run_pass(root, width, height);
        if deferred.is_empty() {
            return;
        }
        log::trace!("layout pass {pass}: {} callbacks", deferred.len());

        for item in deferred {
            match item {
                Deferred::Configure(node, width, height) => {
                    node.event_generate(&Event::Configure { width, height });
                }
                Deferred::YScroll(command, first, last) => command(first, last),
            }
        }
    }
    log::warn!("layout still changing after {MAX_PASSES} passes");
}

fn run_pass(root: &Node, width: u16, height: u16) -> Vec<Deferred> {
    let mut previous = HashMap::new();
    reset(root, &mut previous);

    let area = Rect::from_size(width, height);
    place(root, area, Some(area));

    let mut deferred = Vec::new();
    collect(root, &previous, &mut deferred);
    deferred
}

fn reset(node: &Node, previous: &mut HashMap<NodeId, (u16, u16)>) {
    let children = {
        let mut data = node.inner.borrow_mut();
        if let Some(rect) = data.rect.take() {
            previous.insert(data.id, (rect.width, rect.height));
        }
        data.clip = None;
        data.children.clone()
    };
    for child in &children {
        reset(child, previous);
    }
}

fn collect(node: &Node, previous: &HashMap<NodeId, (u16, u16)>, out: &mut Vec<Deferred>) {
    let (children, configure, yscroll) = {
        let mut data = node.inner.borrow_mut();
        let configure = data
            .rect
            .map(|r| (r.width, r.height))
            .filter(|size| previous.get(&data.id) != Some(size));
        let fractions = y_fractions(&data);
        let yscroll = match (&mut data.kind, fractions) {
            (Kind::Viewport(state), Some(f)) if state.reported != Some(f) => {
                state.reported = Some(f);
                state.yscroll.clone().map(|command| (command, f))
            }
            _ => None,
        };
        (data.children.clone(), configure, yscroll)
    };

    if let Some((width, height)) = configure {
        out.push(Deferred::Configure(node.clone(), width, height));
    }
    if let Some((command, (first, last))) = yscroll {
        out.push(Deferred::YScroll(command, first, last));
    }
    for child in &children {
        collect(child, previous, out);
    }
}

/// Height of the area a viewport scrolls over.
pub(crate) fn scroll_region_height(data: &NodeData) -> i32 {
    let Kind::Viewport(state) = &data.kind else {
        return 0;
    };
    if let Some(region) = state.scroll_region {
        return i32::from(region.height);
    }
    state
        .window
        .as_ref()
        .and_then(Node::rect)
        .map_or(0, |r| i32::from(r.height))
}

/// Visible vertical fraction of a mapped viewport.
pub(crate) fn y_fractions(data: &NodeData) -> Option<(f32, f32)> {
    let Kind::Viewport(state) = &data.kind else {
        return None;
    };
    let rect = data.rect?;
    let region = scroll_region_height(data);
    if region <= 0 {
        return Some((0.0, 1.0));
    }

    let region = region as f32;
    let first = (state.offset_y as f32 / region).clamp(0.0, 1.0);
    let last = ((state.offset_y + i32::from(rect.height)) as f32 / region).clamp(0.0, 1.0);
    Some((first, last))
}

enum Arrange {
    Grid(Rect),
    Window,
    Leaf,
}

fn place(node: &Node, rect: Rect, clip: Option<Rect>) {
    let (arrange, visible) = {
        let mut data = node.inner.borrow_mut();
        data.rect = Some(rect);
        data.clip = clip.and_then(|c| rect.intersect(&c));
        let arrange = match data.kind {
            Kind::Frame => Arrange::Grid(rect.shrink(data.ipady, data.ipadx, data.ipady, data.ipadx)),
            Kind::Viewport(_) => Arrange::Window,
            _ => Arrange::Leaf,
        };
        (arrange, data.clip)
    };

    match arrange {
        Arrange::Grid(area) => arrange_grid(node, area, visible),
        Arrange::Window => place_window(node, rect, visible),
        Arrange::Leaf => {}
    }
}

fn place_window(viewport: &Node, rect: Rect, clip: Option<Rect>) {
    let (window, forced_width, region) = {
        let data = viewport.inner.borrow();
        match &data.kind {
            Kind::Viewport(state) => (state.window.clone(), state.window_width, state.scroll_region),
            _ => return,
        }
    };
    let Some(window) = window else {
        return;
    };
    if window.is_destroyed() {
        return;
    }

    let (natural_width, natural_height) = natural_size(&window);
    let width = forced_width.unwrap_or(natural_width);
    let region_height = region.map_or(i32::from(natural_height), |r| i32::from(r.height));
    let max_offset = (region_height - i32::from(rect.height)).max(0);

    let offset = {
        let mut data = viewport.inner.borrow_mut();
        match &mut data.kind {
            Kind::Viewport(state) => {
                state.offset_y = state.offset_y.clamp(0, max_offset);
                state.offset_y
            }
            _ => 0,
        }
    };

    place(
        &window,
        Rect::new(rect.x, rect.y - offset, width, natural_height),
        clip,
    );
}

fn arrange_grid(node: &Node, area: Rect, clip: Option<Rect>) {
    let (children, column_weights, row_weights) = {
        let data = node.inner.borrow();
        (
            gridded(&data.children),
            data.column_weights.clone(),
            data.row_weights.clone(),
        )
    };
    if children.is_empty() {
        return;
    }

    let measured: Vec<(Grid, (u16, u16))> = children
        .iter()
        .map(|(child, grid)| (*grid, natural_size(child)))
        .collect();
    let (mut widths, mut heights) = track_sizes(&measured);
    distribute(&mut widths, &column_weights, area.width);
    distribute(&mut heights, &row_weights, area.height);

    let xs = offsets(area.x, &widths);
    let ys = offsets(area.y, &heights);

    for ((child, _), (grid, (natural_width, natural_height))) in children.iter().zip(measured) {
        let cell = Rect::new(
            xs[grid.column],
            ys[grid.row],
            to_u16(xs[grid.column + grid.columnspan.max(1)] - xs[grid.column]),
            to_u16(ys[grid.row + grid.rowspan.max(1)] - ys[grid.row]),
        );
        let inner = cell.shrink(grid.pady.0, grid.padx.1, grid.pady.1, grid.padx.0);
        let (x, width) = stick(inner.x, inner.width, natural_width, grid.sticky.west, grid.sticky.east);
        let (y, height) = stick(inner.y, inner.height, natural_height, grid.sticky.north, grid.sticky.south);

        place(child, Rect::new(x, y, width, height), clip);
    }
}

fn gridded(children: &[Node]) -> Vec<(Node, Grid)> {
    children
        .iter()
        .filter_map(|child| {
            let data = child.inner.borrow();
            if data.destroyed {
                return None;
            }
            data.grid.map(|grid| (child.clone(), grid))
        })
        .collect()
}

/// Natural column widths and row heights; spanning children don't
/// contribute.
fn track_sizes(measured: &[(Grid, (u16, u16))]) -> (Vec<i32>, Vec<i32>) {
    let columns = measured
        .iter()
        .map(|(g, _)| g.column + g.columnspan.max(1))
        .max()
        .unwrap_or(0);
    let rows = measured
        .iter()
        .map(|(g, _)| g.row + g.rowspan.max(1))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0i32; columns];
    let mut heights = vec![0i32; rows];

    for (grid, (width, height)) in measured {
        if grid.columnspan <= 1 {
            let need = i32::from(*width) + i32::from(grid.padx.0) + i32::from(grid.padx.1);
            widths[grid.column] = widths[grid.column].max(need);
        }
        if grid.rowspan <= 1 {
            let need = i32::from(*height) + i32::from(grid.pady.0) + i32::from(grid.pady.1);
            heights[grid.row] = heights[grid.row].max(need);
        }
    }

    (widths, heights)
}

/// Hand out (or take back) the difference between `available` and the
/// natural total, proportionally to track weights.
fn distribute(sizes: &mut [i32], weights: &HashMap<usize, u16>, available: u16) {
    let extra = i32::from(available) - sizes.iter().sum::<i32>();
    let weighted: Vec<(usize, i32)> = (0..sizes.len())
        .filter_map(|i| weights.get(&i).filter(|w| **w > 0).map(|w| (i, i32::from(*w))))
        .collect();
    let total: i32 = weighted.iter().map(|(_, w)| w).sum();
    if extra == 0 || total == 0 {
        return;
    }

    let mut given = 0;
    for (n, (index, weight)) in weighted.iter().enumerate() {
        let share = if n + 1 == weighted.len() {
            extra - given
        } else {
            extra * weight / total
        };
        given += share;
        sizes[*index] = (sizes[*index] + share).max(0);
    }
}

fn offsets(start: i32, sizes: &[i32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(sizes.len() + 1);
    let mut pos = start;
    out.push(pos);
    for size in sizes {
        pos += size;
        out.push(pos);
    }
    out
}

fn stick(start: i32, available: u16, natural: u16, lead: bool, trail: bool) -> (i32, u16) {
    if lead && trail {
        return (start, available);
    }
    let size = natural.min(available);
    let slack = i32::from(available - size);
    let pos = if lead {
        start
    } else if trail {
        start + slack
    } else {
        start + slack / 2
    };
    (pos, size)
}

fn to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

/// Size a node asks for: content plus internal padding, with requested
/// width/height replacing the content size.
pub(crate) fn natural_size(node: &Node) -> (u16, u16) {
    let data = node.inner.borrow();
    let (width, height) = match &data.kind {
        Kind::Frame => {
            let measured: Vec<(Grid, (u16, u16))> = gridded(&data.children)
                .iter()
                .map(|(child, grid)| (*grid, natural_size(child)))
                .collect();
            let (widths, heights) = track_sizes(&measured);
            (
                to_u16(widths.iter().sum()),
                to_u16(heights.iter().sum()),
            )
        }
        Kind::Label { text } => (to_u16(display_width(text) as i32), 1),
        Kind::Text { text, wrap } => {
            let width = data.width.unwrap_or(DEFAULT_TEXT_WIDTH);
            let lines = display_line_count(text, width as usize, *wrap);
            (width, to_u16(lines as i32))
        }
        Kind::Scrollbar(_) | Kind::Viewport(_) => (1, 1),
    };

    (
        data.width.unwrap_or(width).saturating_add(data.ipadx * 2),
        data.height.unwrap_or(height).saturating_add(data.ipady * 2),
    )
}
