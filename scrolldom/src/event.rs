/// Input events, pointer-centric: the widget does its own targeting, so
/// events carry raw screen coordinates rather than element targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PointerDown {
        x: u16,
        y: u16,
        button: PointerButton,
    },
    PointerMove {
        x: u16,
        y: u16,
    },
    PointerUp {
        x: u16,
        y: u16,
        button: PointerButton,
    },
    /// Wheel notch; positive delta scrolls content down.
    Wheel {
        x: u16,
        y: u16,
        delta: i16,
    },
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    Resize {
        width: u16,
        height: u16,
    },
}

/// Rows scrolled per wheel notch.
pub const WHEEL_NOTCH: i16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Convert a raw crossterm event into the crate's event model. Events with
/// no equivalent (focus changes, paste) map to `None`.
pub fn convert(event: &crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CtEvent, MouseEventKind};

    match event {
        CtEvent::Key(key) => {
            let key_code = convert_key(key.code)?;
            Some(Event::Key {
                key: key_code,
                modifiers: convert_modifiers(key.modifiers),
            })
        }
        CtEvent::Mouse(mouse) => {
            let (x, y) = (mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(button) => Some(Event::PointerDown {
                    x,
                    y,
                    button: convert_button(button),
                }),
                MouseEventKind::Up(button) => Some(Event::PointerUp {
                    x,
                    y,
                    button: convert_button(button),
                }),
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    Some(Event::PointerMove { x, y })
                }
                MouseEventKind::ScrollUp => Some(Event::Wheel {
                    x,
                    y,
                    delta: -WHEEL_NOTCH,
                }),
                MouseEventKind::ScrollDown => Some(Event::Wheel {
                    x,
                    y,
                    delta: WHEEL_NOTCH,
                }),
                _ => None,
            }
        }
        CtEvent::Resize(width, height) => Some(Event::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn convert_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}

fn convert_modifiers(mods: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers;
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn convert_button(button: crossterm::event::MouseButton) -> PointerButton {
    use crossterm::event::MouseButton as CtButton;
    match button {
        CtButton::Left => PointerButton::Primary,
        CtButton::Right => PointerButton::Secondary,
        CtButton::Middle => PointerButton::Middle,
    }
}
