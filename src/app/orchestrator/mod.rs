//! Interactive selection and download dispatch
//!
//! The orchestrator drives one session of repeated cycles. Each cycle:
//!
//! 1. Fetches and prints the listing for the active [`ListMode`] in a
//!    background task while a waiting indicator runs in the foreground
//! 2. Ends the session if the listing is empty
//! 3. Prompts for ids and parses them as a [`Selection`]
//! 4. Dispatches one download per id, in input order, awaiting each before
//!    the next
//!
//! The listing fetched at the start of a cycle is the one selections in that
//! cycle resolve against. Any failure ends the session with the error.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use datacamp_fetcher::app::{
//!     ClientConfig, Console, ListMode, Orchestrator, OrchestratorConfig, PlatformClient,
//! };
//! use datacamp_fetcher::auth::Token;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = Token::new("my-session-token")?;
//! let client = Arc::new(PlatformClient::login(ClientConfig::default(), &token).await?);
//!
//! let orchestrator = Orchestrator::new(
//!     Arc::clone(&client),
//!     client,
//!     OrchestratorConfig::default(),
//!     Console::stdout(true),
//! );
//!
//! let mut input = std::io::stdin().lock();
//! let summary = orchestrator.run(ListMode::CompletedCourses, &mut input).await?;
//! println!("Dispatched {} downloads", summary.dispatched);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;

pub use config::OrchestratorConfig;
pub use console::{waiting_indicator, Console};

use std::io::BufRead;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::catalog::Catalog;
use crate::app::content::ContentDownloader;
use crate::app::models::{CatalogItem, ListMode};
use crate::app::selection::{resolve, Selection};
use crate::constants::ui;
use crate::errors::{AppError, OrchestrationError, Result};

/// How a single cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing to select; the session ends
    EmptyListing,
    /// Input closed or no ids entered; the session ends
    NoSelection,
    /// Downloads were dispatched for `count` ids
    Dispatched { count: usize },
}

/// Totals for a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Cycles started, including the final one
    pub cycles: usize,
    /// Downloads dispatched across all cycles
    pub dispatched: usize,
    /// Outcome of the final cycle
    pub ended_by: CycleOutcome,
}

/// Runs selection cycles against a catalog and a downloader
pub struct Orchestrator<C, D> {
    catalog: Arc<C>,
    downloader: Arc<D>,
    config: OrchestratorConfig,
    console: Console,
}

impl<C, D> Orchestrator<C, D>
where
    C: Catalog + 'static,
    D: ContentDownloader,
{
    pub fn new(
        catalog: Arc<C>,
        downloader: Arc<D>,
        config: OrchestratorConfig,
        console: Console,
    ) -> Self {
        Self {
            catalog,
            downloader,
            config,
            console,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Runs cycles until the listing is empty or no ids are entered
    ///
    /// # Errors
    ///
    /// Returns the first catalog, selection, download or terminal error.
    /// Downloads dispatched before the error are not rolled back.
    pub async fn run<R: BufRead>(&self, mode: ListMode, input: &mut R) -> Result<SessionSummary> {
        let mut cycles = 0;
        let mut dispatched = 0;

        loop {
            cycles += 1;
            match self.run_cycle(mode, input).await? {
                CycleOutcome::Dispatched { count } => dispatched += count,
                ended_by => {
                    info!(
                        "Session ended after {} cycles with {} downloads ({:?})",
                        cycles, dispatched, ended_by
                    );
                    return Ok(SessionSummary {
                        cycles,
                        dispatched,
                        ended_by,
                    });
                }
            }
        }
    }

    /// Runs one list, prompt and dispatch cycle
    pub async fn run_cycle<R: BufRead>(&self, mode: ListMode, input: &mut R) -> Result<CycleOutcome> {
        let items = self.fetch_listing(mode).await?;
        if items.is_empty() {
            info!("Listing {} is empty", mode);
            return Ok(CycleOutcome::EmptyListing);
        }

        let Some(selection) = self.read_selection(input)? else {
            debug!("Input closed");
            return Ok(CycleOutcome::NoSelection);
        };

        if selection.is_empty() {
            return Ok(CycleOutcome::NoSelection);
        }

        let flags = self.config.effective_flags();
        let kind = mode.kind();
        let mut count = 0;
        for id in selection.ids() {
            let item = resolve(&items, id)?;
            info!("Downloading {} {}: {}", kind, item.id, item.name);
            self.downloader
                .download(kind, &item.link, &self.config.destination, flags)
                .await?;
            count += 1;
        }

        Ok(CycleOutcome::Dispatched { count })
    }

    /// Fetches and prints the listing in a background task
    ///
    /// The waiting indicator is cleared once the task has finished, whether
    /// it succeeded or not.
    async fn fetch_listing(&self, mode: ListMode) -> Result<Vec<CatalogItem>> {
        let spinner = waiting_indicator(self.config.spinner_interval, self.config.show_spinner);

        let catalog = Arc::clone(&self.catalog);
        let console = self.console.clone();
        let printer = spinner.clone();
        let task = tokio::spawn(async move {
            let items = catalog.list(mode).await?;
            printer
                .suspend(|| console.listing(mode, &items))
                .map_err(OrchestrationError::Terminal)?;
            Ok::<_, AppError>(items)
        });

        let joined = task.await;
        spinner.finish_and_clear();

        joined.map_err(|e| OrchestrationError::ListingTaskFailed {
            reason: e.to_string(),
        })?
    }

    /// Prompts once; `None` when the input is closed
    fn read_selection<R: BufRead>(&self, input: &mut R) -> Result<Option<Selection>> {
        self.console
            .prompt(ui::SELECTION_PROMPT)
            .map_err(OrchestrationError::Terminal)?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(OrchestrationError::Terminal)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(Selection::parse(&line)?))
    }
}
