/// Raw input a backend feeds into [`Toolkit::dispatch`](crate::Toolkit::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    MouseMove { x: u16, y: u16 },
    MouseDown { x: u16, y: u16, button: MouseButton },
    /// Positive delta scrolls up, negative scrolls down.
    Wheel { x: u16, y: u16, delta: i16 },
    Key { key: Key, modifiers: Modifiers },
    Resize { width: u16, height: u16 },
}

/// Events delivered to node bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Button { x: u16, y: u16, button: MouseButton },
    /// Pointer entered the node or one of its descendants.
    Enter,
    /// Pointer left the node and all of its descendants.
    Leave,
    Wheel { x: u16, y: u16, delta: i16 },
    /// The node's laid-out size changed (or it was mapped).
    Configure { width: u16, height: u16 },
    /// Text content changed.
    Modified,
    Key { key: Key, modifiers: Modifiers },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Button,
    Enter,
    Leave,
    Wheel,
    Configure,
    Modified,
    Key,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Button { .. } => EventKind::Button,
            Self::Enter => EventKind::Enter,
            Self::Leave => EventKind::Leave,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::Configure { .. } => EventKind::Configure,
            Self::Modified => EventKind::Modified,
            Self::Key { .. } => EventKind::Key,
        }
    }
}

/// Returned by handlers: `Break` stops the event from reaching ancestors
/// and global bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Input {
    /// Convert a crossterm event; events the toolkit has no use for map to `None`.
    pub fn from_crossterm(event: &crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};

        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key {
                key: Key::try_from(key.code).ok()?,
                modifiers: key.modifiers.into(),
            }),
            CtEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(button) => Some(Self::MouseDown {
                        x,
                        y,
                        button: button.into(),
                    }),
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        Some(Self::MouseMove { x, y })
                    }
                    MouseEventKind::ScrollUp => Some(Self::Wheel { x, y, delta: 1 }),
                    MouseEventKind::ScrollDown => Some(Self::Wheel { x, y, delta: -1 }),
                    _ => None,
                }
            }
            CtEvent::Resize(width, height) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

impl TryFrom<crossterm::event::KeyCode> for Key {
    type Error = ();

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;
        Ok(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return Err(()),
        })
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
