use crate::buffer::{Buffer, Cell};
use crate::layout::Rect;
use crate::node::{thumb_span, Kind, Node};
use crate::text::wrap;
use crate::types::{Orient, Rgb};

const TRACK_VERTICAL: char = '│';
const TRACK_HORIZONTAL: char = '─';
const THUMB: char = '█';

/// Draw the tree under `root` into `buf`.
///
/// Only nodes with a visible clip rectangle are drawn, so children scrolled
/// out of a viewport cost nothing here.
pub fn render_to_buffer(root: &Node, buf: &mut Buffer) {
    buf.clear();
    draw(root, buf, Rgb::BLACK);
}

fn draw(node: &Node, buf: &mut Buffer, inherited_bg: Rgb) {
    let data = node.inner.borrow();
    let (Some(rect), Some(clip)) = (data.rect, data.clip) else {
        return;
    };

    let bg = match &data.style.background {
        Some(color) => {
            let bg = color.to_rgb();
            buf.fill(rect, clip, bg);
            bg
        }
        None => inherited_bg,
    };
    let fg = data
        .style
        .foreground
        .as_ref()
        .map_or_else(|| contrast(bg), |c| c.to_rgb());
    let content = rect.shrink(data.ipady, data.ipadx, data.ipady, data.ipadx);

    match &data.kind {
        Kind::Label { text } => {
            buf.put_str(content.x, content.y, text, fg, data.style.bold, clip);
        }
        Kind::Text { text, wrap: mode } => {
            let lines = wrap(text, content.width as usize, *mode);
            for (i, line) in lines.iter().take(content.height as usize).enumerate() {
                buf.put_str(content.x, content.y + i as i32, line, fg, data.style.bold, clip);
            }
        }
        Kind::Scrollbar(state) => {
            draw_scrollbar(buf, rect, clip, state.orient, (state.first, state.last), fg);
        }
        Kind::Frame | Kind::Viewport(_) => {}
    }

    let children = data.children.clone();
    drop(data);
    for child in &children {
        draw(child, buf, bg);
    }
}

fn draw_scrollbar(buf: &mut Buffer, rect: Rect, clip: Rect, orient: Orient, fraction: (f32, f32), fg: Rgb) {
    let len = match orient {
        Orient::Vertical => rect.height,
        Orient::Horizontal => rect.width,
    };
    let (start, size) = thumb_span(fraction.0, fraction.1, len);

    for i in 0..len {
        let on_thumb = i >= start && i < start + size;
        let ch = match (on_thumb, orient) {
            (true, _) => THUMB,
            (false, Orient::Vertical) => TRACK_VERTICAL,
            (false, Orient::Horizontal) => TRACK_HORIZONTAL,
        };
        let (x, y) = match orient {
            Orient::Vertical => (rect.x, rect.y + i32::from(i)),
            Orient::Horizontal => (rect.x + i32::from(i), rect.y),
        };
        if clip.contains(x, y) {
            let bg = buf.get(x as u16, y as u16).map_or(Rgb::BLACK, |c| c.bg);
            buf.set(x, y, Cell::new(ch).with_fg(fg).with_bg(bg));
        }
    }
}

/// Black or white, whichever reads better on `bg`.
fn contrast(bg: Rgb) -> Rgb {
    let luma = 0.299 * f32::from(bg.r) + 0.587 * f32::from(bg.g) + 0.114 * f32::from(bg.b);
    if luma > 140.0 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_picks_readable_foreground() {
        assert_eq!(contrast(Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrast(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(contrast(Rgb::new(135, 206, 250)), Rgb::BLACK);
    }
}
