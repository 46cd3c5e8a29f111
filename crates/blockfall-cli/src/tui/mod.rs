//! Minimal terminal application runtime on ratatui + crossterm.
//!
//! An [`App`] is driven by three kinds of events: terminal input, renders (throttled to a
//! frame rate) and ticks, whose deadline the app itself reports.

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
