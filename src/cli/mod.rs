//! CLI module for recap
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;
pub mod completions;

pub use args::{AgentCommand, Cli, Commands, ConfigCommand, MeetingCommand, UserCommand};
