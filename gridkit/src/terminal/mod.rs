use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event,
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::event::Input;
use crate::text::char_width;
use crate::toolkit::Toolkit;
use crate::types::Rgb;

/// Crossterm backend: raw mode, alternate screen and mouse capture for as
/// long as it lives, double-buffered diff drawing.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::info!("terminal opened at {width}x{height}");

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Wait up to `timeout` for input and drain whatever else is queued.
    /// `None` blocks until something arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<Input>> {
        let mut raw = Vec::new();

        match timeout {
            Some(dur) => {
                if event::poll(dur)? {
                    raw.push(event::read()?);
                }
            }
            None => raw.push(event::read()?),
        }
        while !raw.is_empty() && event::poll(Duration::ZERO)? {
            raw.push(event::read()?);
        }

        Ok(raw.iter().filter_map(Input::from_crossterm).collect())
    }

    /// Lay out the toolkit at the terminal size and write changed cells.
    pub fn draw(&mut self, toolkit: &Toolkit) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        toolkit.resize(width, height);
        toolkit.update();
        toolkit.render(&mut self.current_buffer);

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::WHITE;
        let mut last_bg = Rgb::BLACK;
        let mut last_bold = false;

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_crossterm(last_fg)),
            SetBackgroundColor(to_crossterm(last_bg))
        )?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = cell.bg;
            }
            if cell.bold != last_bold {
                let attr = if cell.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(self.stdout, SetAttribute(attr))?;
                last_bold = cell.bold;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::info!("terminal restored");
    }
}
