/// Which cell edges a gridded node sticks to.
///
/// Sticking to both opposite edges stretches the node across the cell;
/// sticking to neither centres it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sticky {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Sticky {
    pub const NONE: Sticky = Sticky::new(false, false, false, false);
    pub const N: Sticky = Sticky::new(true, false, false, false);
    pub const S: Sticky = Sticky::new(false, true, false, false);
    pub const E: Sticky = Sticky::new(false, false, true, false);
    pub const W: Sticky = Sticky::new(false, false, false, true);
    pub const NS: Sticky = Sticky::new(true, true, false, false);
    pub const EW: Sticky = Sticky::new(false, false, true, true);
    pub const NSEW: Sticky = Sticky::new(true, true, true, true);

    pub const fn new(north: bool, south: bool, east: bool, west: bool) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub const fn union(self, other: Sticky) -> Self {
        Self {
            north: self.north || other.north,
            south: self.south || other.south,
            east: self.east || other.east,
            west: self.west || other.west,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orient {
    #[default]
    Vertical,
    Horizontal,
}

/// Grid placement of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub column: usize,
    pub row: usize,
    pub columnspan: usize,
    pub rowspan: usize,
    pub sticky: Sticky,
    /// External padding (left, right).
    pub padx: (u16, u16),
    /// External padding (top, bottom).
    pub pady: (u16, u16),
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            column: 0,
            row: 0,
            columnspan: 1,
            rowspan: 1,
            sticky: Sticky::NONE,
            padx: (0, 0),
            pady: (0, 0),
        }
    }
}

impl Grid {
    pub fn at(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            ..Default::default()
        }
    }

    pub fn sticky(mut self, sticky: Sticky) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn columnspan(mut self, span: usize) -> Self {
        self.columnspan = span.max(1);
        self
    }

    pub fn rowspan(mut self, span: usize) -> Self {
        self.rowspan = span.max(1);
        self
    }

    pub fn padx(mut self, left: u16, right: u16) -> Self {
        self.padx = (left, right);
        self
    }

    pub fn pady(mut self, top: u16, bottom: u16) -> Self {
        self.pady = (top, bottom);
        self
    }
}
