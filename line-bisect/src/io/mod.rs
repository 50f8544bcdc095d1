//! I/O adapters: commands file, command execution, config, console output.

pub mod command;
pub mod config;
pub mod line_source;
pub mod report;
