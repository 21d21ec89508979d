//! Command handler for DataCamp Fetcher CLI
//!
//! Coordinates login, list mode validation and the interactive orchestrator
//! session. Rejected tokens and unknown list modes are reported as status
//! lines and end the run normally.

use std::io::{self, BufRead};
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::{Console, ListMode, Orchestrator, PlatformClient, SessionSummary};
use crate::auth::Token;
use crate::cli::SessionArgs;
use crate::config::AppConfig;
use crate::errors::{AuthError, Result};

/// Message shown when the platform does not accept the token
pub const LOGIN_FAILED: &str = "Login failed! Please check your token and try again.";

/// How a session run ended without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The token was malformed or rejected by the platform
    LoginRejected,
    /// `--list` was not one of the recognized codes
    InvalidListMode,
    /// The orchestrator ran until the listing was empty or input ended
    Finished(SessionSummary),
}

/// Handle one interactive download session on the terminal
///
/// Logs in, then repeatedly lists the selected mode, prompts on standard
/// input and downloads the chosen items until the listing is empty or no
/// selection is entered.
pub async fn handle_session(args: SessionArgs, config: &AppConfig) -> Result<()> {
    let console = Console::stdout(config.ui.colored_output && atty::is(atty::Stream::Stdout));
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let end = run_session(
        args,
        config,
        console,
        &mut input,
        atty::is(atty::Stream::Stderr),
    )
    .await?;

    if let SessionEnd::Finished(summary) = end {
        info!(
            "Finished after {} cycles, {} downloads",
            summary.cycles, summary.dispatched
        );
    }
    Ok(())
}

/// Run a session against any console and input
///
/// `interactive` is whether stderr is a terminal, which gates the spinner.
///
/// # Errors
///
/// Returns transport errors during login and every error the orchestrator
/// propagates. A rejected token or unknown list mode is not an error.
pub async fn run_session<R: BufRead>(
    args: SessionArgs,
    config: &AppConfig,
    console: Console,
    input: &mut R,
    interactive: bool,
) -> Result<SessionEnd> {
    let token = match Token::new(&args.token) {
        Ok(token) => token,
        Err(e) => {
            warn!("{}", e);
            console.failure(LOGIN_FAILED)?;
            return Ok(SessionEnd::LoginRejected);
        }
    };

    let client = match PlatformClient::login(config.client_config(), &token).await {
        Ok(client) => Arc::new(client),
        Err(AuthError::LoginFailed) => {
            warn!("Token {} was rejected", token.masked());
            console.failure(LOGIN_FAILED)?;
            return Ok(SessionEnd::LoginRejected);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Signed in as {}", client.session().display_name());

    console.separator()?;

    let mode = match args.list.parse::<ListMode>() {
        Ok(mode) => mode,
        Err(e) => {
            console.failure(&e.to_string())?;
            return Ok(SessionEnd::InvalidListMode);
        }
    };

    let orchestrator_config =
        config.orchestrator_config(args.destination()?, args.flags(), args.all, interactive);
    if orchestrator_config.effective_flags().is_empty() {
        warn!("No content selected; pass --video, --exercise, --dataset or --all");
    }

    let orchestrator = Orchestrator::new(
        Arc::clone(&client),
        client,
        orchestrator_config,
        console,
    );

    let summary = orchestrator.run(mode, input).await?;
    Ok(SessionEnd::Finished(summary))
}
