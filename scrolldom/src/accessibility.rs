/// Accessibility role of an element, mirrored from the roles assistive
/// technology expects for a composite scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    None,
    Scrollbar,
    Slider,
    Button,
}

/// Current/min/max value triple exposed on the scrollbar element, kept in
/// sync with the viewport's scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AriaRange {
    pub now: u16,
    pub min: u16,
    pub max: u16,
}

impl AriaRange {
    pub const fn new(now: u16, min: u16, max: u16) -> Self {
        Self { now, min, max }
    }
}
