use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::element::Element;
use crate::event::{convert, Event};
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::types::{Rgb, TextStyle};

/// Terminal session: raw mode, alternate screen, mouse capture. Renders the
/// element tree through a double buffer and writes only what changed.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
    last_layout: LayoutResult,
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
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            last_layout: LayoutResult::new(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Poll input, translating raw crossterm events into the crate's event
    /// model. With no timeout, blocks until at least one event arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();

        match timeout {
            None => {
                if let Some(converted) = convert(&event::read()?) {
                    events.push(converted);
                }
            }
            Some(duration) => {
                if !event::poll(duration)? {
                    return Ok(events);
                }
                if let Some(converted) = convert(&event::read()?) {
                    events.push(converted);
                }
            }
        }

        // Drain whatever else is already pending.
        while event::poll(Duration::ZERO)? {
            if let Some(converted) = convert(&event::read()?) {
                events.push(converted);
            }
        }

        Ok(events)
    }

    /// Lay out and render the tree, flushing only changed cells.
    pub fn render(&mut self, root: &Element) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
        }

        self.current.clear();
        self.last_layout = layout(root, Rect::from_size(width, height));
        render_to_buffer(root, &self.last_layout, &mut self.current);
        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(&self.last_layout)
    }

    /// Layout from the last render.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut cursor_at: Option<(u16, u16)> = None;
        let mut fg = None::<Rgb>;
        let mut bg = None::<Rgb>;
        let mut attrs = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.is_continuation() {
                continue;
            }

            if cursor_at != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(ct_color(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(ct_color(cell.bg)))?;
                bg = Some(cell.bg);
            }
            if cell.style != attrs {
                queue_attrs(&mut self.stdout, attrs, cell.style)?;
                attrs = cell.style;
            }

            write!(self.stdout, "{}", cell.ch)?;
            let advance = crate::text::char_width(cell.ch).max(1) as u16;
            cursor_at = Some((x + advance, y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn ct_color(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn queue_attrs(stdout: &mut io::Stdout, from: TextStyle, to: TextStyle) -> io::Result<()> {
    if from.bold != to.bold {
        let attr = if to.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        queue!(stdout, SetAttribute(attr))?;
    }
    if from.dim != to.dim {
        let attr = if to.dim {
            Attribute::Dim
        } else {
            Attribute::NormalIntensity
        };
        queue!(stdout, SetAttribute(attr))?;
    }
    if from.underline != to.underline {
        let attr = if to.underline {
            Attribute::Underlined
        } else {
            Attribute::NoUnderline
        };
        queue!(stdout, SetAttribute(attr))?;
    }
    Ok(())
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
    }
}
