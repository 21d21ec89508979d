//! Error types for DataCamp Fetcher
//!
//! This module defines error types for all components of the application.
//! Errors are designed to be actionable and provide clear context for debugging and
//! user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token is empty or malformed
    #[error("Invalid authentication token: {reason}")]
    InvalidToken { reason: String },

    /// HTTP request failed during authentication
    #[error("HTTP request failed during authentication")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the token
    #[error("DataCamp login failed. Please check your token and try again")]
    LoginFailed,

    /// A configured base URL could not be parsed
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },
}

/// Catalog listing errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request error
    #[error("Catalog request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned error status
    #[error("Catalog server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// CSS selector error
    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector { selector: String },

    /// JSON payload could not be decoded
    #[error("Invalid catalog payload")]
    JsonParse(#[from] serde_json::Error),

    /// URL could not be built
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// Download and content errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// I/O error during file operations
    #[error("File I/O error")]
    Io(#[from] std::io::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Server returned error status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// JSON payload could not be decoded
    #[error("Invalid content payload")]
    JsonParse(#[from] serde_json::Error),

    /// Atomic file operation failed
    #[error("Atomic file operation failed: could not rename {temp_path} to {final_path}")]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },

    /// Expected content is missing from a page or payload
    #[error("Missing content: {what}")]
    MissingContent { what: String },
}

/// Selection expression and list mode errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A token is not a non-negative integer
    #[error("'{token}' is not a valid id")]
    InvalidNumber { token: String },

    /// One side of an `a-b` range is empty
    #[error("Range '{input}' is missing a bound")]
    MissingRangeBound { input: String },

    /// Range start is greater than range end
    #[error("Range {start}-{end} is reversed")]
    ReversedRange { start: u32, end: u32 },

    /// The selected id is not in the fetched listing
    #[error("No item with id {id} in the listing")]
    UnknownId { id: u32 },

    /// `--list` value outside the recognized codes
    #[error("No valid list type provided! Only 'T', 'C', 'TA' or 'CA' allowed! (list={value})")]
    InvalidListMode { value: String },
}

/// Orchestration errors
#[derive(Error, Debug)]
pub enum OrchestrationError {
    /// Background listing task panicked or was cancelled
    #[error("Background listing task failed: {reason}")]
    ListingTaskFailed { reason: String },

    /// Console output or stdin failed
    #[error("Terminal I/O error")]
    Terminal(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Selection error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Orchestration error
    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "authentication",
            AppError::Catalog(_) => "catalog",
            AppError::Download(_) => "download",
            AppError::Selection(_) => "selection",
            AppError::Orchestration(_) => "orchestration",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Catalog result type alias
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Selection result type alias
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Non-success HTTP status returned by the platform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status} for {url}")]
pub struct UnexpectedStatus {
    pub status: u16,
    pub url: String,
}

// Status conversions for the shared HTTP handler
impl From<UnexpectedStatus> for CatalogError {
    fn from(err: UnexpectedStatus) -> Self {
        CatalogError::ServerError {
            status: err.status,
            url: err.url,
        }
    }
}

impl From<UnexpectedStatus> for DownloadError {
    fn from(err: UnexpectedStatus) -> Self {
        DownloadError::ServerError {
            status: err.status,
            url: err.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let auth = AppError::from(AuthError::LoginFailed);
        assert_eq!(auth.category(), "authentication");

        let selection = AppError::from(SelectionError::UnknownId { id: 7 });
        assert_eq!(selection.category(), "selection");

        let generic = AppError::generic("boom");
        assert_eq!(generic.category(), "generic");
    }

    #[test]
    fn test_transparent_messages() {
        let err = AppError::from(SelectionError::ReversedRange { start: 5, end: 2 });
        assert_eq!(err.to_string(), "Range 5-2 is reversed");

        let err = AppError::from(SelectionError::InvalidListMode {
            value: "X".to_string(),
        });
        assert!(err.to_string().contains("list=X"));
    }
}
