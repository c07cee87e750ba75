mod widget;
pub use self::widget::GridWidget;
use crate::grid::{CalendarGrid, OutOfTimeError};
use ratatui::style::Style;
use time::Date;

/// Callback deciding how each date cell of a grid is drawn
pub trait DateStyler {
    /// `in_focus` is false for dates shown only to pad a month view out to
    /// whole weeks
    fn date_style(&self, date: Date, in_focus: bool) -> Style;
}

impl<T: DateStyler + ?Sized> DateStyler for &T {
    fn date_style(&self, date: Date, in_focus: bool) -> Style {
        (**self).date_style(date, in_focus)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
        }
    }
}

/// A [`CalendarGrid`] paired with the kind of view being displayed, so that
/// "next" and "previous" page by month or by week as appropriate
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pager {
    grid: CalendarGrid,
    mode: ViewMode,
    today: Date,
}

impl Pager {
    pub fn new(grid: CalendarGrid, today: Date) -> Pager {
        Pager {
            grid,
            mode: ViewMode::default(),
            today,
        }
    }

    pub fn in_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn toggle_view(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Advance by one month or one week, depending on the view mode
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the calendar cannot be advanced any
    /// further
    pub fn one_page_forwards(&mut self) -> Result<(), OutOfTimeError> {
        match self.mode {
            ViewMode::Month => self.grid.next_month(),
            ViewMode::Week => self.grid.next_week(),
        }
    }

    /// Retreat by one month or one week, depending on the view mode
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the calendar cannot be moved back any
    /// further
    pub fn one_page_backwards(&mut self) -> Result<(), OutOfTimeError> {
        match self.mode {
            ViewMode::Month => self.grid.previous_month(),
            ViewMode::Week => self.grid.previous_week(),
        }
    }

    pub fn jump_to_today(&mut self) {
        self.grid.jump_to(self.today);
    }

    pub fn jump_to(&mut self, date: Date) {
        self.grid.jump_to(date);
    }

    /// The dates to lay out for the current view.  Month views are always
    /// padded to whole weeks; use [`Pager::shows_date()`] to find out which
    /// cells should be left blank.
    pub fn dates(&self) -> Vec<Date> {
        match self.mode {
            ViewMode::Month => self.grid.month_grid_with(true),
            ViewMode::Week => self.grid.week_grid(),
        }
    }

    /// Whether the date belongs to the month or week being viewed
    pub fn in_focus(&self, date: Date) -> bool {
        match self.mode {
            ViewMode::Month => {
                let cursor = self.grid.cursor();
                (date.year(), date.month()) == (cursor.year(), cursor.month())
            }
            ViewMode::Week => true,
        }
    }

    /// Whether the cell for `date` should be drawn at all
    pub fn shows_date(&self, date: Date) -> bool {
        self.grid.include_adjacent_dates() || self.in_focus(date)
    }

    /// A label for the current view, e.g. "February 2024"
    pub fn title(&self) -> String {
        let cursor = self.grid.cursor();
        match self.mode {
            ViewMode::Month => format!("{} {}", cursor.month(), cursor.year()),
            ViewMode::Week => match self.dates().first() {
                Some(start) => format!("Week of {start}"),
                None => format!("Week of {cursor}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridOptions;
    use time::macros::date;

    fn pager(include_adjacent_dates: bool) -> Pager {
        let grid = CalendarGrid::new(
            GridOptions::new()
                .initial_date(date!(2024 - 01 - 31))
                .include_adjacent_dates(include_adjacent_dates),
        )
        .expect("options should be valid");
        Pager::new(grid, date!(2024 - 01 - 31))
    }

    #[test]
    fn test_month_paging() {
        let mut p = pager(true);
        assert_eq!(p.mode(), ViewMode::Month);
        assert_eq!(p.title(), "January 2024");
        assert_eq!(p.one_page_forwards(), Ok(()));
        assert_eq!(p.grid().cursor(), date!(2024 - 02 - 01));
        assert_eq!(p.title(), "February 2024");
        assert_eq!(p.dates().len(), 35);
        assert_eq!(p.one_page_backwards(), Ok(()));
        assert_eq!(p.one_page_backwards(), Ok(()));
        assert_eq!(p.title(), "December 2023");
    }

    #[test]
    fn test_week_paging() {
        let mut p = pager(true).in_mode(ViewMode::Week);
        assert_eq!(p.title(), "Week of 2024-01-28");
        assert_eq!(p.one_page_forwards(), Ok(()));
        assert_eq!(p.grid().cursor(), date!(2024 - 02 - 07));
        assert_eq!(p.title(), "Week of 2024-02-04");
        assert_eq!(p.dates().len(), 7);
    }

    #[test]
    fn test_toggle_and_jump() {
        let mut p = pager(true);
        p.one_page_forwards().expect("next month should exist");
        p.toggle_view();
        assert_eq!(p.mode(), ViewMode::Week);
        assert_eq!(p.dates().first(), Some(&date!(2024 - 01 - 28)));
        p.jump_to(date!(2030 - 06 - 15));
        assert_eq!(p.grid().cursor(), date!(2030 - 06 - 15));
        p.jump_to_today();
        assert_eq!(p.grid().cursor(), p.today());
        p.toggle_view();
        assert_eq!(p.mode(), ViewMode::Month);
    }

    #[test]
    fn test_shows_date() {
        let p = pager(false);
        assert!(p.shows_date(date!(2024 - 01 - 01)));
        assert!(!p.shows_date(date!(2023 - 12 - 31)));
        assert!(!p.shows_date(date!(2024 - 02 - 01)));
        let p = p.in_mode(ViewMode::Week);
        assert!(p.shows_date(date!(2024 - 02 - 01)));
        let p = pager(true);
        assert!(p.shows_date(date!(2023 - 12 - 31)));
        assert!(!p.in_focus(date!(2023 - 12 - 31)));
    }
}
