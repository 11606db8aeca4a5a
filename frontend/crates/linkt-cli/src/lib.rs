//! linkt-cli library
//!
//! Exposes the command runner so integration tests can drive it without
//! spawning the binary.

pub(crate) mod app;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub mod logger;


pub use app::{App, LogNavigator, run};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
