use ratatui::style::Color;

/// Fixed kid-friendly palette. Bright accents, green/red feedback.
pub struct Theme {
    pub accent: Color,
    pub good: Color,
    pub bad: Color,
    pub dim: Color,
    pub bar_filled: Color,
    pub bar_empty: Color,
}

pub const THEME: Theme = Theme {
    accent: Color::Cyan,
    good: Color::Green,
    bad: Color::Red,
    dim: Color::DarkGray,
    bar_filled: Color::Cyan,
    bar_empty: Color::DarkGray,
};
