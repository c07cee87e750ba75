//! Month and week calendar grids with a configurable first day of the week.
//!
//! [`CalendarGrid`] computes the sequence of dates to display for the month
//! or week around its cursor, including the days borrowed from neighboring
//! months needed to complete whole weeks.  Rendering is left to separate
//! adapters: [`text`] lays a sequence out as lines of text via a per-cell
//! callback, and [`view`] provides a `ratatui` widget.
pub mod grid;
pub mod text;
pub mod view;
pub use crate::grid::{today, CalendarGrid, ConfigurationError, GridOptions, OutOfTimeError};
