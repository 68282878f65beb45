use ratatui::style::Color;

/// One line of window content and the colors it is highlighted with when selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

impl Row {
    pub fn new(text: impl Into<String>, fg: Color, bg: Color) -> Self {
        Self {
            text: text.into(),
            fg,
            bg,
        }
    }
}
