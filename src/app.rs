use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use calgrid::view::{DateStyler, GridWidget, Pager};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S> {
    pager: Pager,
    styler: S,
    state: AppState,
}

impl<S: DateStyler> App<S> {
    pub(crate) fn new(pager: Pager, styler: S) -> App<S> {
        App {
            pager,
            styler,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('l' | 'n') | KeyCode::Right | KeyCode::PageDown => self.page_down(),
                KeyCode::Char('h' | 'p') | KeyCode::Left | KeyCode::PageUp => self.page_up(),
                KeyCode::Char('v') => {
                    self.pager.toggle_view();
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.pager.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let input = match key {
                        KeyCode::Char('-') => JumpToInput::Negative,
                        KeyCode::Char('+') => JumpToInput::Positive,
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => JumpToInput::Digit(d),
                            None => return false,
                        },
                        KeyCode::Backspace | KeyCode::Delete => JumpToInput::Backspace,
                        KeyCode::Enter => JumpToInput::Enter,
                        _ => return false,
                    };
                    match state.handle_input(input) {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.pager.jump_to(date);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn page_down(&mut self) -> bool {
        self.pager
            .one_page_forwards()
            .inspect_err(|e| log::info!("Cannot page forwards: {e}"))
            .is_ok()
    }

    fn page_up(&mut self) -> bool {
        self.pager
            .one_page_backwards()
            .inspect_err(|e| log::info!("Cannot page backwards: {e}"))
            .is_ok()
    }
}

impl<S: DateStyler> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        GridWidget::new(&self.styler).render(area, buf, &mut self.pager);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Highlighter;
    use crate::theme::{ADJACENT_STYLE, WEEKEND_STYLE};
    use calgrid::view::ViewMode;
    use calgrid::{CalendarGrid, GridOptions};
    use ratatui::style::Modifier;
    use time::macros::date;
    use time::Date;

    fn app(date: Date) -> App<Highlighter> {
        let grid = CalendarGrid::new(GridOptions::new().initial_date(date))
            .expect("options should be valid");
        App::new(Pager::new(grid, date!(2024 - 02 - 14)), Highlighter)
    }

    #[test]
    fn test_render_month() {
        let mut app = app(date!(2024 - 02 - 01));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "                                 February 2024                                  ",
            "                  Su     Mo     Tu     We     Th     Fr     Sa                  ",
            "                 ──────────────────────────┬───────────────────                 ",
            "                  28     29     30     31  │   1      2      3                  ",
            "                 ──────────────────────────┘                                    ",
            "                   4      5      6      7      8      9     10                  ",
            "                                                                                ",
            "                  11     12     13    [14]    15     16     17                  ",
            "                                                                                ",
            "                  18     19     20     21     22     23     24                  ",
            "                                                  ┌────────────                 ",
            "                  25     26     27     28     29  │   1      2                  ",
            "                 ─────────────────────────────────┘                             ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
            "                                                                                ",
        ]);
        let heading = BASE_STYLE.add_modifier(Modifier::BOLD);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(33, 0, 13, 1), heading);
        expected.set_style(Rect::new(17, 1, 46, 1), heading);
        for x in [17, 24, 31, 38] {
            expected.set_style(Rect::new(x, 3, 4, 1), ADJACENT_STYLE);
        }
        expected.set_style(Rect::new(59, 3, 4, 1), WEEKEND_STYLE);
        for y in [5, 7, 9] {
            expected.set_style(Rect::new(17, y, 4, 1), WEEKEND_STYLE);
            expected.set_style(Rect::new(59, y, 4, 1), WEEKEND_STYLE);
        }
        expected.set_style(Rect::new(17, 11, 4, 1), WEEKEND_STYLE);
        expected.set_style(Rect::new(52, 11, 4, 1), ADJACENT_STYLE);
        expected.set_style(Rect::new(59, 11, 4, 1), ADJACENT_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_paging_keys() {
        let mut app = app(date!(2024 - 01 - 31));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.pager.grid().cursor(), date!(2024 - 02 - 01));
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!(app.pager.grid().cursor(), date!(2024 - 03 - 01));
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Char('h')));
        assert_eq!(app.pager.grid().cursor(), date!(2024 - 01 - 01));
        assert!(app.handle_key(KeyCode::Char('v')));
        assert_eq!(app.pager.mode(), ViewMode::Week);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.pager.grid().cursor(), date!(2024 - 01 - 08));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.pager.grid().cursor(), date!(2024 - 02 - 14));
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_paging_past_end_of_time() {
        let mut app = app(Date::MAX);
        assert!(!app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.pager.grid().cursor(), Date::MAX);
    }

    #[test]
    fn test_jump_keys() {
        let mut app = app(date!(2024 - 02 - 01));
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "19991231".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.pager.grid().cursor(), date!(1999 - 12 - 31));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app(date!(2024 - 02 - 01));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
