use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Days borrowed from neighboring months to fill out a month view
pub(crate) const ADJACENT_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

pub(crate) const WEEKEND_STYLE: Style = Style::new().fg(Color::LightBlue).bg(Color::Black);

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
