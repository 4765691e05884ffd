//! Minimal terminal runtime: a blocking event loop that interleaves gravity
//! ticks, redraws and crossterm input for a single [`App`].

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
