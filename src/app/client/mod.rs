//! HTTP client implementation for DataCamp interaction
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration, cookie jar and endpoint layout
//! - `auth`: token check and the resulting [`Session`]
//! - `http`: shared GET helpers
//! - `download`: file writes with atomic temp + rename

use std::path::Path;

use url::Url;

use crate::auth::Token;
use crate::errors::{AuthResult, DownloadResult};

pub mod auth;
pub mod config;
pub mod download;
pub mod http;

pub use auth::Session;
pub use config::{ApiConfig, ClientConfig, Endpoints};

use auth::AuthHandler;
use download::DownloadHandler;
use http::HttpHandler;

/// Authenticated client for the DataCamp services
///
/// Owns the session created at login; catalog and download operations reach
/// it through `&self` instead of any process-wide state.
#[derive(Debug)]
pub struct PlatformClient {
    http_handler: HttpHandler,
    endpoints: Endpoints,
    session: Session,
}

impl PlatformClient {
    /// Creates a client and authenticates the token with DataCamp
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if:
    /// - A configured base URL is invalid
    /// - HTTP client creation fails
    /// - The platform cannot be reached
    /// - The token is rejected
    pub async fn login(config: ClientConfig, token: &Token) -> AuthResult<Self> {
        let endpoints = config.api.endpoints()?;
        let client = config.build_http_client(token, &endpoints)?;

        tracing::info!("Authenticating with token {}", token.masked());
        let session = AuthHandler::authenticate(&client, &endpoints).await?;

        tracing::info!("Successfully authenticated with DataCamp");

        Ok(Self {
            http_handler: HttpHandler::new(client),
            endpoints,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn http(&self) -> &HttpHandler {
        &self.http_handler
    }

    /// Downloads a file to the specified path with atomic operations
    pub async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64> {
        DownloadHandler::new(&self.http_handler)
            .download_file(url, destination)
            .await
    }
}
