//! DataCamp authentication logic
//!
//! The token travels as the `_dct` session cookie. Login succeeds when the
//! signed-in endpoint answers with the user's profile.

use reqwest::Client;

use crate::app::client::config::Endpoints;
use crate::app::models::UserProfile;
use crate::errors::{AuthError, AuthResult};

/// Authenticated session, created once at login and passed by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: UserProfile,
}

impl Session {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    /// Profile slug, used to locate the completed-items page
    pub fn slug(&self) -> &str {
        &self.user.slug
    }

    pub fn display_name(&self) -> String {
        self.user.display_name()
    }
}

/// Handles DataCamp authentication operations
pub struct AuthHandler;

impl AuthHandler {
    /// Checks the session cookie against the signed-in endpoint
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if:
    /// - The endpoint cannot be reached
    /// - The endpoint rejects the token
    /// - The response is not a user profile
    pub async fn authenticate(client: &Client, endpoints: &Endpoints) -> AuthResult<Session> {
        let url = endpoints
            .signed_in()
            .map_err(|_| AuthError::InvalidBaseUrl {
                url: endpoints.site.to_string(),
            })?;

        tracing::info!("Checking token against {}", url);

        let response = client.get(url).send().await.map_err(AuthError::Http)?;
        let status = response.status();
        tracing::info!("Login response status: {}", status);

        if !status.is_success() {
            tracing::warn!("DataCamp login failed: HTTP {}", status);
            return Err(AuthError::LoginFailed);
        }

        let body = response.text().await.map_err(AuthError::Http)?;
        let user = Self::parse_profile(&body)?;

        tracing::info!("Signed in as {} (id {})", user.slug, user.id);
        Ok(Session::new(user))
    }

    /// Extracts the user profile from the signed-in response body
    fn parse_profile(body: &str) -> AuthResult<UserProfile> {
        serde_json::from_str::<UserProfile>(body).map_err(|e| {
            let preview = body.chars().take(120).collect::<String>();
            tracing::warn!("Unexpected login response ({}): {}", e, preview);
            AuthError::LoginFailed
        })
    }
}
