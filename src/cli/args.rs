//! Command-line argument parsing for DataCamp Fetcher
//!
//! This module defines the CLI structure using clap derive macros. The token
//! can also come from the `DATACAMP_TOKEN` environment variable.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::app::DownloadFlags;
use crate::constants::env;

/// DataCamp Fetcher - Archive DataCamp courses and tracks
#[derive(Parser, Debug)]
#[command(
    name = "datacamp_fetcher",
    version,
    about = "Download videos, exercises and datasets of DataCamp courses and tracks",
    long_about = "Lists your completed (or all) DataCamp courses or tracks and downloads the ones you pick.
After each batch the listing is shown again; enter nothing or close the input to stop."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Logging and configuration options
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What to list and what to download
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// DataCamp authentication token (the `_dct` cookie)
    #[arg(short, long, env = env::TOKEN, hide_env_values = true)]
    pub token: String,

    /// List completed (T) tracks, completed (C) courses, all tracks (TA) or all courses (CA)
    #[arg(short, long, value_name = "MODE")]
    pub list: String,

    /// Folder to download into, default is the current directory
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Download the videos
    #[arg(short, long)]
    pub video: bool,

    /// Download the exercises
    #[arg(short, long)]
    pub exercise: bool,

    /// Download the datasets
    #[arg(short, long)]
    pub dataset: bool,

    /// Download videos, exercises and datasets
    #[arg(short, long)]
    pub all: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        self.log_level_or(tracing::Level::WARN)
    }

    /// Logging level from the verbosity flags, `default` when none is set
    pub fn log_level_or(&self, default: tracing::Level) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            default
        }
    }
}

impl SessionArgs {
    /// The individual content selectors, before `--all` is applied
    pub fn flags(&self) -> DownloadFlags {
        DownloadFlags::new(self.video, self.exercise, self.dataset)
    }

    /// Download root; the current directory when `--path` is absent
    pub fn destination(&self) -> std::io::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("datacamp_fetcher").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-t", "abc", "-l", "C", "-v", "-d", "-p", "/tmp/out"]);

        assert_eq!(cli.session.token, "abc");
        assert_eq!(cli.session.list, "C");
        assert_eq!(cli.session.flags(), DownloadFlags::new(true, false, true));
        assert!(!cli.session.all);
        assert_eq!(cli.session.destination().unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&[
            "--token", "abc", "--list", "TA", "--exercise", "--all", "--very-verbose",
        ]);

        assert_eq!(cli.session.flags(), DownloadFlags::new(false, true, false));
        assert!(cli.session.all);
        assert!(cli.global.very_verbose);
    }

    #[test]
    fn test_list_is_required() {
        let result = Cli::try_parse_from(["datacamp_fetcher", "-t", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_destination_is_current_dir() {
        let cli = parse(&["-t", "abc", "-l", "T"]);
        assert_eq!(
            cli.session.destination().unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn test_log_level() {
        let cli_quiet = parse(&["-t", "abc", "-l", "T", "-q"]);
        let cli_verbose = parse(&["-t", "abc", "-l", "T", "--verbose"]);
        let cli_default = parse(&["-t", "abc", "-l", "T"]);

        assert_eq!(cli_quiet.log_level(), tracing::Level::ERROR);
        assert_eq!(cli_verbose.log_level(), tracing::Level::INFO);
        assert_eq!(cli_default.log_level(), tracing::Level::WARN);
        assert_eq!(
            cli_default.log_level_or(tracing::Level::DEBUG),
            tracing::Level::DEBUG
        );
    }
}
