//! DataCamp Fetcher Library
//!
//! A Rust library for archiving DataCamp courses and tracks: videos,
//! exercise write-ups and datasets, picked interactively from a listing.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
