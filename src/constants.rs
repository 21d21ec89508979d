//! Application constants for DataCamp Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable holding the DataCamp authentication token
    pub const TOKEN: &str = "DATACAMP_TOKEN";
}

/// Authentication constants
pub mod auth {
    /// Name of the session cookie carrying the authentication token
    pub const TOKEN_COOKIE: &str = "_dct";

    /// Path of the endpoint that reports the signed-in user
    pub const SIGNED_IN_PATH: &str = "/api/users/signed_in";

    /// Number of leading token characters shown in logs
    pub const TOKEN_VISIBLE_PREFIX: usize = 4;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "DataCamp-Fetcher/0.1.0 (Course Archive Tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
}

/// DataCamp service URLs
pub mod platform {
    /// Main site, hosts profile pages and the track catalog
    pub const SITE_BASE_URL: &str = "https://www.datacamp.com";

    /// Campus API, serves course structure and exercises
    pub const CAMPUS_API_BASE_URL: &str = "https://campus-api.datacamp.com/api";

    /// Projector service, resolves video keys to media links
    pub const PROJECTOR_BASE_URL: &str = "https://projector.datacamp.com";
}

/// Web scraping CSS selectors
pub mod selectors {
    /// Course card on profile pages
    pub const COURSE_BLOCK: &str = "div.course-block";

    /// Link inside a course card
    pub const COURSE_LINK: &str = "a.course-block__link";

    /// Track card on profile and catalog pages
    pub const TRACK_BLOCK: &str = "div.track-block";

    /// Link inside a track card
    pub const TRACK_LINK: &str = "a.track-block__link";

    /// Title inside any catalog card
    pub const BLOCK_TITLE: &str = "h4";

    /// Title of a track page
    pub const TRACK_PAGE_TITLE: &str = "h1";

    /// Course links listed on a track page
    pub const TRACK_PAGE_COURSE_LINK: &str = "a[href*='/courses/']";
}

/// Exercise types reported by the campus API
pub mod exercises {
    /// Type tag of video exercises
    pub const VIDEO_EXERCISE_TYPE: &str = "VideoExercise";
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic operations
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";

    /// Folder for course videos
    pub const VIDEOS_DIR: &str = "Videos";

    /// Folder for exercise write-ups
    pub const EXERCISES_DIR: &str = "Exercises";

    /// Folder for course datasets
    pub const DATASETS_DIR: &str = "Datasets";

    /// Characters replaced when turning titles into file names
    pub const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
}

/// Terminal interaction constants
pub mod ui {
    use super::Duration;

    /// Redraw interval of the waiting indicator
    pub const SPINNER_INTERVAL: Duration = Duration::from_millis(400);

    /// Frames of the waiting indicator; the last entry is the finished state
    pub const SPINNER_FRAMES: &[&str] = &[".  ", ".. ", "...", ""];

    /// Width of the separator printed after login
    pub const SEPARATOR_WIDTH: usize = 100;

    /// Prompt shown before reading a selection expression
    pub const SELECTION_PROMPT: &str = "Enter the id(s) you want to download separated by a space or you can enter 'a-b' to download items from a to b: ";
}

/// Configuration file lookup
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "datacamp-fetcher.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "datacamp-fetcher";

    /// File name inside the user config dir
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use env::TOKEN as ENV_TOKEN;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use platform::{CAMPUS_API_BASE_URL, PROJECTOR_BASE_URL, SITE_BASE_URL};
pub use ui::SPINNER_INTERVAL;
