//! Command-line interface components
//!
//! This module contains CLI-specific code for the DataCamp Fetcher
//! application: argument parsing and the session handler.

pub mod args;
pub mod commands;

pub use args::{Cli, GlobalArgs, SessionArgs};
pub use commands::{handle_session, run_session, SessionEnd, LOGIN_FAILED};
