//! Dashboard TUI
//!
//! Terminal user interface using Ratatui.

mod app;
mod backend;
mod form;
mod help;
mod resources;
mod sidebar;
mod thread;
mod ui;

pub use app::run;
