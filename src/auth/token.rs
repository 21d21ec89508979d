//! Authentication token handling
//!
//! The DataCamp token is the value of the `_dct` session cookie. It is
//! validated on construction and never printed in full.

use crate::constants::auth;
use crate::errors::{AuthError, AuthResult};

/// Validated DataCamp authentication token
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Validate and wrap a raw token
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is empty or contains
    /// whitespace or cookie delimiters
    pub fn new(raw: &str) -> AuthResult<Self> {
        let token = raw.trim();

        if token.is_empty() {
            return Err(AuthError::InvalidToken {
                reason: "Token cannot be empty".to_string(),
            });
        }

        if token
            .chars()
            .any(|c| c.is_whitespace() || c == ';' || c == ',' || c.is_control())
        {
            return Err(AuthError::InvalidToken {
                reason: "Token must not contain whitespace, ';' or ','".to_string(),
            });
        }

        Ok(Self(token.to_string()))
    }

    /// Raw token value, for building the session cookie only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Loggable form showing only a short prefix
    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(auth::TOKEN_VISIBLE_PREFIX).collect();
        format!("{}...", prefix)
    }

    /// Session cookie string for this token
    pub fn cookie(&self) -> String {
        format!("{}={}", auth::TOKEN_COOKIE, self.0)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&self.masked()).finish()
    }
}
