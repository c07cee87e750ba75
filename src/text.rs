//! Rendering date sequences as plain lines of text
use crate::grid::DAYS_IN_WEEK;
use std::iter::successors;
use time::{Date, Weekday};

/// Number of columns per day of week
pub const CELL_WIDTH: usize = 4;

pub trait WeekdayExt {
    /// Two-letter English abbreviation, e.g. "Mo"
    fn abbrev(&self) -> &'static str;

    /// Zero-based column of this weekday in a week starting on `first`
    fn column(&self, first: Weekday) -> u16;
}

impl WeekdayExt for Weekday {
    fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
        }
    }

    fn column(&self, first: Weekday) -> u16 {
        let here = u16::from(self.number_days_from_sunday());
        let start = u16::from(first.number_days_from_sunday());
        (here + 7 - start) % 7
    }
}

/// Iterate over the seven weekdays in display order, starting at `first`
pub fn weekdays_from(first: Weekday) -> impl Iterator<Item = Weekday> {
    successors(Some(first), |wd| Some(wd.next())).take(DAYS_IN_WEEK)
}

/// Header line naming each column of a week starting on `first`, aligned to
/// cells produced by [`day_cell()`]
pub fn weekday_header(first: Weekday) -> String {
    let mut header = String::with_capacity(CELL_WIDTH * DAYS_IN_WEEK);
    for wd in weekdays_from(first) {
        header.push(' ');
        header.push_str(wd.abbrev());
        header.push(' ');
    }
    header
}

/// Format a day-of-month cell, bracketing it if `is_today`
pub fn day_cell(date: Date, is_today: bool) -> String {
    if is_today {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    }
}

pub fn blank_cell() -> String {
    " ".repeat(CELL_WIDTH)
}

/// Lay `dates` out in rows of seven, producing each cell's text with `cell`.
/// Trailing whitespace is trimmed from each row. A final partial row is
/// emitted as-is.
pub fn render_rows<F>(dates: &[Date], mut cell: F) -> Vec<String>
where
    F: FnMut(Date) -> String,
{
    dates
        .chunks(DAYS_IN_WEEK)
        .map(|week| {
            week.iter()
                .map(|&d| cell(d))
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CalendarGrid, GridOptions};
    use time::macros::date;

    #[test]
    fn test_weekday_header() {
        assert_eq!(
            weekday_header(Weekday::Sunday),
            " Su  Mo  Tu  We  Th  Fr  Sa "
        );
        assert_eq!(
            weekday_header(Weekday::Monday),
            " Mo  Tu  We  Th  Fr  Sa  Su "
        );
    }

    #[test]
    fn test_column() {
        assert_eq!(Weekday::Sunday.column(Weekday::Sunday), 0);
        assert_eq!(Weekday::Sunday.column(Weekday::Monday), 6);
        assert_eq!(Weekday::Monday.column(Weekday::Monday), 0);
        assert_eq!(Weekday::Tuesday.column(Weekday::Saturday), 3);
    }

    #[test]
    fn test_render_month() {
        let grid = CalendarGrid::new(
            GridOptions::new()
                .first_weekday(1)
                .initial_date(date!(2024 - 02 - 01)),
        )
        .expect("options should be valid");
        let dates = grid.month_grid();
        let rows = render_rows(&dates, |d| day_cell(d, d == date!(2024 - 02 - 14)));
        assert_eq!(
            rows,
            [
                " 29  30  31   1   2   3   4",
                "  5   6   7   8   9  10  11",
                " 12  13 [14] 15  16  17  18",
                " 19  20  21  22  23  24  25",
                " 26  27  28  29   1   2   3",
            ]
        );
    }

    #[test]
    fn test_render_blanks_other_months() {
        let grid = CalendarGrid::new(GridOptions::new().initial_date(date!(2024 - 02 - 01)))
            .expect("options should be valid");
        let dates = grid.month_grid_with(true);
        let rows = render_rows(&dates, |d| {
            if d.month() == time::Month::February {
                day_cell(d, false)
            } else {
                blank_cell()
            }
        });
        assert_eq!(rows.first().map(String::as_str), Some("                  1   2   3"));
        assert_eq!(rows.last().map(String::as_str), Some(" 25  26  27  28  29"));
    }

    #[test]
    fn test_render_partial_row() {
        let dates = [date!(2024 - 02 - 01), date!(2024 - 02 - 02)];
        assert_eq!(render_rows(&dates, |d| day_cell(d, false)), ["  1   2"]);
    }
}
