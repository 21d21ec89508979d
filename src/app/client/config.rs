//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of HTTP clients
//! for DataCamp interaction, including the session cookie jar and the
//! endpoint layout of the site, campus API and projector services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::Token;
use crate::constants::{auth, http, platform};
use crate::errors::{AuthError, AuthResult};

/// Base URLs of the DataCamp services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Main site (profiles, track catalog, login check)
    pub site_base_url: String,
    /// Campus API (courses, chapters, exercises)
    pub campus_api_base_url: String,
    /// Projector service (videos)
    pub projector_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            site_base_url: platform::SITE_BASE_URL.to_string(),
            campus_api_base_url: platform::CAMPUS_API_BASE_URL.to_string(),
            projector_base_url: platform::PROJECTOR_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Every base URL pointing at the same local server, for tests and mirrors
    pub fn with_root(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            site_base_url: root.to_string(),
            campus_api_base_url: format!("{}/api", root),
            projector_base_url: format!("{}/projector", root),
        }
    }

    /// Parse the configured base URLs
    pub fn endpoints(&self) -> AuthResult<Endpoints> {
        Ok(Endpoints {
            site: parse_base(&self.site_base_url)?,
            campus_api: parse_base(&self.campus_api_base_url)?,
            projector: parse_base(&self.projector_base_url)?,
        })
    }
}

fn parse_base(raw: &str) -> AuthResult<Url> {
    Url::parse(raw).map_err(|_| AuthError::InvalidBaseUrl {
        url: raw.to_string(),
    })
}

/// Parsed base URLs with builders for every endpoint the client uses
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub site: Url,
    pub campus_api: Url,
    pub projector: Url,
}

impl Endpoints {
    pub fn signed_in(&self) -> Result<Url, url::ParseError> {
        join(&self.site, auth::SIGNED_IN_PATH)
    }

    pub fn profile(&self, slug: &str) -> Result<Url, url::ParseError> {
        join(&self.site, &format!("profile/{}", slug))
    }

    pub fn track_catalog(&self) -> Result<Url, url::ParseError> {
        join(&self.site, "tracks")
    }

    pub fn course_page(&self, slug: &str) -> Result<Url, url::ParseError> {
        join(&self.site, &format!("courses/{}", slug))
    }

    pub fn course_index(&self) -> Result<Url, url::ParseError> {
        join(&self.campus_api, "courses")
    }

    pub fn course_details(&self, slug: &str) -> Result<Url, url::ParseError> {
        join(&self.campus_api, &format!("courses/{}", slug))
    }

    pub fn chapter_exercises(
        &self,
        course_id: u64,
        chapter_id: u64,
    ) -> Result<Url, url::ParseError> {
        join(
            &self.campus_api,
            &format!("courses/{}/chapters/{}/exercises", course_id, chapter_id),
        )
    }

    pub fn video(&self, projector_key: &str) -> Result<Url, url::ParseError> {
        join(&self.projector, &format!("api/videos/{}", projector_key))
    }

    /// Resolve a possibly relative link found on a site page
    pub fn resolve_site_link(&self, href: &str) -> Result<Url, url::ParseError> {
        self.site.join(href)
    }
}

/// Append `path` to `base`, keeping any path already on the base
fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Service base URLs
    pub api: ApiConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            user_agent: http::USER_AGENT.to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the session cookie installed for every service
    pub fn build_http_client(&self, token: &Token, endpoints: &Endpoints) -> AuthResult<Client> {
        let jar = Jar::default();
        let cookie = token.cookie();
        for base in [&endpoints.site, &endpoints.campus_api, &endpoints.projector] {
            jar.add_cookie_str(&cookie, base);
        }

        Client::builder()
            .cookie_provider(Arc::new(jar)) // Session auth rides on the _dct cookie
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(AuthError::Http)
    }
}
