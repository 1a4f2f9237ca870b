//! Widget configuration types.

use std::time::Duration;

use gridkit::{Color, TextWrap};

/// Behaviour of a [`ScrollableFrame`](crate::ScrollableFrame).
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Delay before the content width is re-synced after the viewport is
    /// resized. Configure events while a resync is pending are absorbed.
    pub settle_delay: Duration,
    /// Rows scrolled per wheel notch.
    pub wheel_units: i32,
    /// Background of the viewport and content frame.
    pub background: Option<Color>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(75),
            wheel_units: 1,
            background: Some(Color::named("white")),
        }
    }
}

impl ScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn wheel_units(mut self, units: i32) -> Self {
        self.wheel_units = units;
        self
    }

    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// Look of a [`ListboxItem`](crate::ListboxItem).
#[derive(Debug, Clone)]
pub struct ItemStyle {
    pub normal: Color,
    /// Background when selected, and while hovered when not selected.
    pub selected: Color,
    pub padx: u16,
    pub pady: u16,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            normal: Color::named("white"),
            selected: Color::named("light sky blue"),
            padx: 1,
            pady: 0,
        }
    }
}

impl ItemStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normal(mut self, color: impl Into<Color>) -> Self {
        self.normal = color.into();
        self
    }

    pub fn selected(mut self, color: impl Into<Color>) -> Self {
        self.selected = color.into();
        self
    }

    pub fn padding(mut self, padx: u16, pady: u16) -> Self {
        self.padx = padx;
        self.pady = pady;
        self
    }
}

/// Behaviour of a [`ResizableText`](crate::ResizableText).
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Delay between a configure event and the height recompute it causes.
    pub resize_debounce: Duration,
    pub wrap: TextWrap,
    /// Width in columns; the laid-out width wins once mapped.
    pub width: Option<u16>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            resize_debounce: Duration::from_millis(200),
            wrap: TextWrap::Char,
            width: None,
        }
    }
}

impl TextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    pub fn wrap(mut self, wrap: TextWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}
