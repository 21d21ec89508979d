//! Orchestrator configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::app::models::DownloadFlags;
use crate::constants::ui;

/// Settings fixed for a whole selection session
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Root folder downloads are written under
    pub destination: PathBuf,
    /// Individual content selectors from the command line
    pub flags: DownloadFlags,
    /// `--all`: overrides `flags` with every content type
    pub all: bool,
    /// Redraw interval of the waiting indicator
    pub spinner_interval: Duration,
    /// Draw the waiting indicator
    pub show_spinner: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("."),
            flags: DownloadFlags::default(),
            all: false,
            spinner_interval: ui::SPINNER_INTERVAL,
            show_spinner: true,
        }
    }
}

impl OrchestratorConfig {
    /// Flags every dispatched download receives
    pub fn effective_flags(&self) -> DownloadFlags {
        self.flags.effective(self.all)
    }
}
