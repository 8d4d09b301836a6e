//! Command-line front end: one subcommand per admin page.

pub mod args;
pub mod commands;
pub mod render;

pub use args::Cli;
pub use commands::{open_list, run};
