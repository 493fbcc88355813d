//! CLI layer: argument parsing and command handlers over the library

pub mod args;
pub mod commands;
