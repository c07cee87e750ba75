mod app;
mod help;
mod highlight;
mod jumpto;
mod theme;
use crate::app::App;
use crate::highlight::Highlighter;
use anyhow::Context;
use calgrid::text::{blank_cell, day_cell, render_rows, weekday_header};
use calgrid::view::{Pager, ViewMode};
use calgrid::{today, CalendarGrid, ConfigurationError, GridOptions};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('f') | Arg::Long("first-weekday") => {
                    opts.first_weekday = parser.value()?.parse()?;
                }
                Arg::Long("week") => opts.mode = ViewMode::Week,
                Arg::Long("no-adjacent") => opts.include_adjacent_dates = false,
                Arg::Long("print") => opts.print = true,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: calgrid [<options>] [YYYY-MM-DD]");
                println!();
                println!("Month & week calendar grids with a configurable first weekday");
                println!();
                println!("Options:");
                println!("  -f, --first-weekday <N>");
                println!("                    Start weeks on day N (0 = Sunday ... 6 = Saturday)");
                println!("                    [default: 0]");
                println!("      --week        Start in week view instead of month view");
                println!("      --no-adjacent Leave days from neighboring months blank");
                println!("      --print       Print the calendar to stdout and exit");
                println!("      --log-file <PATH>");
                println!("                    Write log messages to the given file");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    first_weekday: i32,
    date: Option<Date>,
    mode: ViewMode,
    include_adjacent_dates: bool,
    print: bool,
    log_file: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            first_weekday: 0,
            date: None,
            mode: ViewMode::Month,
            include_adjacent_dates: true,
            print: false,
            log_file: None,
        }
    }
}

impl RunOptions {
    fn grid(&self) -> Result<CalendarGrid, ConfigurationError> {
        let mut options = GridOptions::new()
            .first_weekday(self.first_weekday)
            .include_adjacent_dates(self.include_adjacent_dates);
        if let Some(date) = self.date {
            options = options.initial_date(date);
        }
        CalendarGrid::new(options)
    }

    fn run(self) -> anyhow::Result<()> {
        let _logger = self.start_logger()?;
        let grid = self.grid().context("invalid calendar configuration")?;
        let pager = Pager::new(grid, today()).in_mode(self.mode);
        if self.print {
            for line in render_text(&pager) {
                println!("{line}");
            }
            Ok(())
        } else {
            with_terminal(|mut terminal| {
                terminal.hide_cursor().context("failed to hide cursor")?;
                App::new(pager, Highlighter).run(terminal)?;
                Ok(())
            })
        }
    }

    // Log messages written to stderr would garble the full-screen interface,
    // so the logger is only started when there's somewhere safe to write.
    fn start_logger(&self) -> anyhow::Result<Option<LoggerHandle>> {
        if !self.print && self.log_file.is_none() {
            return Ok(None);
        }
        let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
            .context("invalid log specification")?;
        if let Some(path) = &self.log_file {
            let spec = FileSpec::try_from(path)
                .context("invalid log file path")?
                .suppress_timestamp();
            logger = logger.log_to_file(spec).append();
        }
        let handle = logger.start().context("failed to initialize logging")?;
        Ok(Some(handle))
    }
}

fn render_text(pager: &Pager) -> Vec<String> {
    let today = pager.today();
    let mut lines = vec![
        pager.title(),
        weekday_header(pager.grid().first_weekday())
            .trim_end()
            .to_owned(),
    ];
    lines.extend(render_rows(&pager.dates(), |d| {
        if pager.shows_date(d) {
            day_cell(d, d == today)
        } else {
            blank_cell()
        }
    }));
    lines
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
