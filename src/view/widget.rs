use super::{DateStyler, Pager};
use crate::grid::DAYS_IN_WEEK;
use crate::text::{day_cell, weekdays_from, WeekdayExt};
use ratatui::{prelude::*, widgets::*};
use time::{Date, Weekday};

/// Width of the grid in columns
const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// When inserting a vertical bar-like character between consecutive days in
/// the same week but different months, draw it this many columns to the right
/// of the left edge of the day on the left.
const VBAR_OFFSET: u16 = 5;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

const ACS_HLINE: char = '─';
const ACS_VLINE: char = '│';
const ACS_TTEE: char = '┬';
const ACS_ULCORNER: char = '┌';
const ACS_LRCORNER: char = '┘';

/// Draws the month or week selected by a [`Pager`], styling each day with a
/// [`DateStyler`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GridWidget<S>(S);

impl<S> GridWidget<S> {
    pub fn new(styler: S) -> GridWidget<S> {
        GridWidget(styler)
    }
}

impl<S: DateStyler> StatefulWidget for GridWidget<S> {
    type State = Pager;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let first = state.grid().first_weekday();
        let today = state.today();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(state.title());
        canvas.draw_header(first);
        for (week_no, week) in std::iter::zip(0u16.., state.dates().chunks(DAYS_IN_WEEK)) {
            for &date in week {
                if !state.shows_date(date) {
                    continue;
                }
                let col = date.weekday().column(first);
                let style = self.0.date_style(date, state.in_focus(date));
                canvas.draw_day(week_no, col, day_cell(date, date == today), style);
                if is_last_day_of_month(date) {
                    canvas.draw_month_border(week_no, col);
                }
            }
        }
    }
}

fn is_last_day_of_month(date: Date) -> bool {
    match date.next_day() {
        Some(tomorrow) => date.month() != tomorrow.month(),
        None => true,
    }
}

fn header_line(first: Weekday) -> String {
    let mut line = String::with_capacity(usize::from(MAIN_WIDTH));
    for wd in weekdays_from(first) {
        if !line.is_empty() {
            line.push_str("   ");
        }
        line.push(' ');
        line.push_str(wd.abbrev());
        line.push(' ');
    }
    line
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: String) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(Style::new().bold()));
    }

    fn draw_header(&mut self, first: Weekday) {
        self.mvprint(1, 0, header_line(first), Some(Style::new().bold()));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, s: String, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * col,
            s,
            Some(style),
        );
    }

    // `week_no` and `col` specify the "coordinates" of the last day of the
    // month after which the border is drawn
    fn draw_month_border(&mut self, week_no: u16, col: u16) {
        let y = week_no * WEEK_LINES + HEADER_LINES;
        let offset = DAY_WIDTH * col;
        let bar_col = offset + VBAR_OFFSET;
        if usize::from(col) + 1 < DAYS_IN_WEEK {
            self.mvaddch(y, bar_col, ACS_VLINE);
            self.mvaddch(
                y - 1,
                bar_col,
                if week_no == 0 { ACS_TTEE } else { ACS_ULCORNER },
            );
            if week_no > 0 {
                if let Some(length) = MAIN_WIDTH.checked_sub(offset + VBAR_OFFSET + 1) {
                    self.hline(y - 1, bar_col + 1, ACS_HLINE, length);
                }
            }
            self.mvaddch(y + 1, bar_col, ACS_LRCORNER);
        }
        self.hline(y + 1, 0, ACS_HLINE, offset + VBAR_OFFSET);
    }

    fn mvaddch(&mut self, y: u16, x: u16, ch: char) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_char(ch);
            }
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // grid's area, though we need to be sure that the Rect passed to
            // the Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
