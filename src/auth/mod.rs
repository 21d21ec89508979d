//! Authentication management for DataCamp tokens
//!
//! This module validates the user-supplied token and exposes the login entry
//! point that turns it into an authenticated [`PlatformClient`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use datacamp_fetcher::app::ClientConfig;
//! use datacamp_fetcher::auth::{login, Token};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = Token::new("my-dct-token")?;
//! let client = login(ClientConfig::default(), &token).await?;
//! println!("Signed in as {}", client.session().display_name());
//! # Ok(())
//! # }
//! ```
//!
//! [`PlatformClient`]: crate::app::PlatformClient

pub mod token;

pub use token::Token;

use crate::app::{ClientConfig, PlatformClient};
use crate::errors::AuthResult;

/// Validate `token` against the platform and open a session
///
/// # Errors
///
/// Returns `AuthError::LoginFailed` if the platform rejects the token, or
/// `AuthError::Http` if the platform cannot be reached
pub async fn login(config: ClientConfig, token: &Token) -> AuthResult<PlatformClient> {
    PlatformClient::login(config, token).await
}
