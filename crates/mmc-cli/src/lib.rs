//! Multi-messenger correlator CLI library.
//!
//! This crate provides the command-line interface for the correlation
//! engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EventsAction};
pub use config::Config;
