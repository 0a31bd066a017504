//! WidgetBoard Application
//!
//! Headless shell over the core: edits canvas documents in the storage directory from the
//! command line.

mod app;
mod commands;

pub use app::{App, AppError};
pub use commands::{Cli, Command};
