use crate::theme::{ADJACENT_STYLE, WEEKEND_STYLE};
use calgrid::view::DateStyler;
use ratatui::style::Style;
use time::{Date, Weekday};

/// Dims days outside the month being viewed and colors weekends
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Highlighter;

impl DateStyler for Highlighter {
    fn date_style(&self, date: Date, in_focus: bool) -> Style {
        if !in_focus {
            ADJACENT_STYLE
        } else if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            WEEKEND_STYLE
        } else {
            Style::new()
        }
    }
}
