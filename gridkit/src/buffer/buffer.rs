use super::Cell;
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::Rgb;

/// A screen-sized grid of cells.
///
/// All drawing helpers take signed coordinates and a clip rectangle;
/// anything outside the clip or the buffer is dropped.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x as i32, y as i32).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Paint the background of every cell in `rect ∩ clip`.
    pub fn fill(&mut self, rect: Rect, clip: Rect, bg: Rgb) {
        let Some(area) = rect.intersect(&clip) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = Cell::default().with_bg(bg);
                }
            }
        }
    }

    /// Write a single line of text starting at `(x, y)`, keeping each cell's
    /// existing background. Returns the number of columns consumed.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Rgb, bold: bool, clip: Rect) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let width = char_width(ch) as i32;
            if width == 0 {
                continue;
            }
            if clip.contains(col, y) {
                if let Some(i) = self.index(col, y) {
                    let cell = &mut self.cells[i];
                    cell.char = ch;
                    cell.fg = fg;
                    cell.bold = bold;
                    cell.wide_continuation = false;
                }
                if width == 2 && clip.contains(col + 1, y) {
                    if let Some(i) = self.index(col + 1, y) {
                        self.cells[i].wide_continuation = true;
                    }
                }
            }
            col += width;
        }
        (col - x) as u16
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Cells of `self` that differ from `other`, with their positions.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = self.width as usize;
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    /// One row as a plain string, wide continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.wide_continuation)
            .map(|c| c.char)
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
