use super::{Color, Style};

/// Visual theme for the synthetic scrollbar, in the spirit of a classic
/// desktop widget: beveled grey thumb, stippled track, arrow buttons.
#[derive(Debug, Clone)]
pub struct ScrollTheme {
    pub arrow_up: char,
    pub arrow_down: char,
    pub track: Style,
    pub thumb: Style,
    pub thumb_dragging: Style,
    pub button: Style,
    pub button_disabled: Style,
    /// Applied to every bar part while the bar is idle (auto-hide).
    pub idle: Style,
}

impl Default for ScrollTheme {
    fn default() -> Self {
        let chrome = Color::oklch(0.82, 0.005, 260.0);
        let shadow = Color::oklch(0.45, 0.005, 260.0);
        let well = Color::oklch(0.92, 0.0, 0.0);

        Self {
            arrow_up: '▲',
            arrow_down: '▼',
            track: Style::new().background(well).foreground(shadow).fill('░'),
            thumb: Style::new().background(chrome).foreground(shadow).fill('█'),
            thumb_dragging: Style::new()
                .background(chrome)
                .foreground(Color::oklch(0.25, 0.005, 260.0))
                .fill('█'),
            button: Style::new().background(chrome).foreground(shadow),
            button_disabled: Style::new().background(chrome).foreground(shadow).dim(),
            idle: Style::new().background(well).foreground(shadow).dim(),
        }
    }
}
