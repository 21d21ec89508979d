//! Core HTTP operations
//!
//! Thin GET helpers shared by the catalog and download paths. Requests are
//! issued once: there is no retry, backoff or rate limiting.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::UnexpectedStatus;

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a response and rejects non-success statuses
    ///
    /// # Errors
    ///
    /// Returns the caller's error type built from the transport error or the
    /// unexpected status
    pub async fn get_response<E>(&self, url: &Url) -> Result<Response, E>
    where
        E: From<reqwest::Error> + From<UnexpectedStatus>,
    {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!("GET {} returned HTTP {}", url, status);
            return Err(UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        tracing::debug!("Successfully fetched response: {}", url);
        Ok(response)
    }

    /// Fetches the body of a page as text
    pub async fn get_page<E>(&self, url: &Url) -> Result<String, E>
    where
        E: From<reqwest::Error> + From<UnexpectedStatus>,
    {
        let response = self.get_response::<E>(url).await?;
        Ok(response.text().await?)
    }

    /// Fetches and decodes a JSON document
    pub async fn get_json<T, E>(&self, url: &Url) -> Result<T, E>
    where
        T: DeserializeOwned,
        E: From<reqwest::Error> + From<UnexpectedStatus> + From<serde_json::Error>,
    {
        let body = self.get_page::<E>(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
