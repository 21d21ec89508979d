//! Prelude module for DataCamp Fetcher Library
//!
//! Re-exports the items most integrations need, so a single
//! `use datacamp_fetcher::prelude::*;` is enough to log in, list and download.
//!
//! # Usage
//!
//! ```rust,no_run
//! use datacamp_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let token = Token::new("my-session-token")?;
//!     let client = Arc::new(login(ClientConfig::default(), &token).await?);
//!
//!     let orchestrator = Orchestrator::new(
//!         Arc::clone(&client),
//!         client,
//!         OrchestratorConfig::default(),
//!         Console::stdout(true),
//!     );
//!     let mut input = std::io::stdin().lock();
//!     orchestrator.run(ListMode::AllTracks, &mut input).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

pub use crate::app::{
    Catalog,
    CatalogItem,
    CatalogKind,
    ClientConfig,
    Console,
    ContentDownloader,
    CycleOutcome,
    DownloadFlags,
    ListMode,
    Orchestrator,
    OrchestratorConfig,
    PlatformClient,
    Selection,
    SessionSummary,
};

pub use crate::auth::{Token, login};

pub use crate::config::AppConfig;

pub use crate::constants::{ENV_TOKEN, USER_AGENT};

pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

pub use tokio;
