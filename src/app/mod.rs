//! Core application logic for DataCamp Fetcher
//!
//! This module contains the authenticated HTTP client, catalog listings,
//! content downloads, selection parsing and the interactive orchestrator.
//!
//! # Examples
//!
//! ```rust,no_run
//! use datacamp_fetcher::app::{Catalog, ClientConfig, ListMode, PlatformClient};
//! use datacamp_fetcher::auth::Token;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = Token::new("my-session-token")?;
//! let client = PlatformClient::login(ClientConfig::default(), &token).await?;
//!
//! for item in client.list(ListMode::CompletedCourses).await? {
//!     println!("{}. {}", item.id, item.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod content;
pub mod models;
pub mod orchestrator;
pub mod selection;

// Re-export main public API
pub use catalog::Catalog;
pub use client::{ApiConfig, ClientConfig, Endpoints, PlatformClient, Session};
pub use content::ContentDownloader;
pub use models::{CatalogItem, CatalogKind, DownloadFlags, ListMode, sanitize_file_name};
pub use orchestrator::{
    Console, CycleOutcome, Orchestrator, OrchestratorConfig, SessionSummary,
};
pub use selection::{Selection, resolve};
