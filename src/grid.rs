//! Month and week grids computed around a movable cursor date.
//!
//! A [`CalendarGrid`] holds the date currently in view plus the weekday on
//! which displayed weeks begin.  Grid queries return freshly built, ascending
//! sequences of dates; navigation moves the cursor in place.
use std::iter::successors;
use thiserror::Error;
use time::{Date, Duration, OffsetDateTime, Weekday};

pub const DAYS_IN_WEEK: usize = 7;

/// Construction parameters for a [`CalendarGrid`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridOptions {
    first_weekday: i32,
    initial_date: Option<Date>,
    include_adjacent_dates: bool,
}

impl GridOptions {
    /// Options for a Sunday-first grid starting on today's date and padding
    /// month grids with adjacent dates
    pub fn new() -> GridOptions {
        GridOptions {
            first_weekday: 0,
            initial_date: None,
            include_adjacent_dates: true,
        }
    }

    /// Set the first day of the week as a number from 0 (Sunday) to 6
    /// (Saturday).  Out-of-range values are rejected by
    /// [`CalendarGrid::new()`].
    pub fn first_weekday(mut self, first_weekday: i32) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    pub fn week_starts_on(mut self, weekday: Weekday) -> Self {
        self.first_weekday = i32::from(weekday.number_days_from_sunday());
        self
    }

    pub fn initial_date(mut self, date: Date) -> Self {
        self.initial_date = Some(date);
        self
    }

    /// Whether [`CalendarGrid::month_grid()`] pads the month out to whole
    /// weeks with dates from the neighboring months
    pub fn include_adjacent_dates(mut self, include: bool) -> Self {
        self.include_adjacent_dates = include;
        self
    }
}

impl Default for GridOptions {
    fn default() -> GridOptions {
        GridOptions::new()
    }
}

/// A cursor over the calendar that can lay out the month or week around it.
///
/// Queries take `&self` and never change the cursor, so repeated queries
/// without intervening navigation return equal sequences.  Navigation takes
/// `&mut self`; callers sharing one grid across threads must serialize access
/// themselves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarGrid {
    first_weekday: Weekday,
    cursor: Date,
    include_adjacent_dates: bool,
}

impl CalendarGrid {
    /// Create a grid from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the configured first weekday is not
    /// in the range 0 through 6.
    pub fn new(options: GridOptions) -> Result<CalendarGrid, ConfigurationError> {
        let first_weekday =
            weekday_from_index(options.first_weekday).ok_or(ConfigurationError {
                first_weekday: options.first_weekday,
            })?;
        Ok(CalendarGrid {
            first_weekday,
            cursor: options.initial_date.unwrap_or_else(today),
            include_adjacent_dates: options.include_adjacent_dates,
        })
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The weekday on which displayed weeks end, i.e., the day before
    /// [`first_weekday()`](CalendarGrid::first_weekday)
    pub fn last_weekday(&self) -> Weekday {
        self.first_weekday.previous()
    }

    pub fn cursor(&self) -> Date {
        self.cursor
    }

    pub fn include_adjacent_dates(&self) -> bool {
        self.include_adjacent_dates
    }

    /// Return the dates of the cursor's month, padded or not according to the
    /// grid's configured default
    pub fn month_grid(&self) -> Vec<Date> {
        self.month_grid_with(self.include_adjacent_dates)
    }

    /// Return every date of the cursor's month in order.  If
    /// `include_adjacent_dates` is true, the days from the previous and next
    /// months that share a week with the first and last of the month are
    /// included as well, so that the result consists of whole weeks running
    /// from the first weekday to the last weekday.
    pub fn month_grid_with(&self, include_adjacent_dates: bool) -> Vec<Date> {
        let first_of_month = month_bound(self.cursor, Direction::Backward);
        let last_of_month = month_bound(self.cursor, Direction::Forward);
        let month_dates = successors(Some(first_of_month), |&d| d.next_day())
            .take_while(|&d| d <= last_of_month);
        if !include_adjacent_dates {
            return month_dates.collect();
        }
        let mut dates = walk_to_weekday(first_of_month, self.first_weekday, Direction::Backward);
        dates.extend(month_dates);
        dates.extend(walk_to_weekday(
            last_of_month,
            self.last_weekday(),
            Direction::Forward,
        ));
        dates
    }

    /// Return the seven days of the week containing the cursor, from the
    /// first weekday to the last weekday
    pub fn week_grid(&self) -> Vec<Date> {
        let mut dates = walk_to_weekday(self.cursor, self.first_weekday, Direction::Backward);
        dates.push(self.cursor);
        dates.extend(walk_to_weekday(
            self.cursor,
            self.last_weekday(),
            Direction::Forward,
        ));
        dates
    }

    /// Move the cursor to the first day of the following month.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the cursor is already in the last
    /// representable month, in which case the cursor is left unchanged.
    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let date = month_bound(self.cursor, Direction::Forward)
            .next_day()
            .ok_or(OutOfTimeError)?;
        self.jump_to(date);
        Ok(())
    }

    /// Move the cursor to the first day of the preceding month.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the cursor is already in the first
    /// representable month, in which case the cursor is left unchanged.
    pub fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let last_of_previous = month_bound(self.cursor, Direction::Backward)
            .previous_day()
            .ok_or(OutOfTimeError)?;
        self.jump_to(month_bound(last_of_previous, Direction::Backward));
        Ok(())
    }

    /// Move the cursor seven days forwards.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if that would pass the last representable
    /// date, in which case the cursor is left unchanged.
    pub fn next_week(&mut self) -> Result<(), OutOfTimeError> {
        let date = self
            .cursor
            .checked_add(Duration::weeks(1))
            .ok_or(OutOfTimeError)?;
        self.jump_to(date);
        Ok(())
    }

    /// Move the cursor seven days backwards.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if that would pass the first representable
    /// date, in which case the cursor is left unchanged.
    pub fn previous_week(&mut self) -> Result<(), OutOfTimeError> {
        let date = self
            .cursor
            .checked_sub(Duration::weeks(1))
            .ok_or(OutOfTimeError)?;
        self.jump_to(date);
        Ok(())
    }

    pub fn jump_to(&mut self, date: Date) {
        let from = self.cursor;
        log::debug!("Moving calendar cursor from {from} to {date}");
        self.cursor = date;
    }
}

/// Error returned when a [`CalendarGrid`] is configured with a first weekday
/// outside of 0 through 6
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("first weekday must be between 0 and 6 (0 = Sunday), got {first_weekday}")]
pub struct ConfigurationError {
    pub first_weekday: i32,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// Return the current local date, falling back to the current UTC date if the
/// local offset cannot be determined
pub fn today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(e) => {
            log::warn!("Failed to determine local date; using UTC instead: {e}");
            OffsetDateTime::now_utc().date()
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn step(self, date: Date) -> Option<Date> {
        match self {
            Direction::Backward => date.previous_day(),
            Direction::Forward => date.next_day(),
        }
    }
}

fn weekday_from_index(index: i32) -> Option<Weekday> {
    let index = u8::try_from(index)
        .ok()
        .filter(|&i| usize::from(i) < DAYS_IN_WEEK)?;
    Some(Weekday::Sunday.nth_next(index))
}

// Step away from `start` one day at a time in the given direction until
// reaching a date that falls on `target`, and return the stepped-over dates
// (including the one on `target`, but not `start`) in chronological order.
// If `start` is already on `target`, nothing is returned.  At the end of time,
// the walk stops short.
fn walk_to_weekday(start: Date, target: Weekday, direction: Direction) -> Vec<Date> {
    let mut dates = Vec::with_capacity(DAYS_IN_WEEK - 1);
    let mut date = start;
    while date.weekday() != target {
        let Some(d) = direction.step(date) else {
            log::debug!("Week walk from {start} towards {target} stopped at the end of time");
            break;
        };
        dates.push(d);
        date = d;
    }
    if direction == Direction::Backward {
        dates.reverse();
    }
    dates
}

// The first (Backward) or last (Forward) day of the month containing `date`
fn month_bound(date: Date, direction: Direction) -> Date {
    successors(Some(date), |&d| direction.step(d))
        .take_while(|d| d.month() == date.month())
        .last()
        .unwrap_or(date)
}
