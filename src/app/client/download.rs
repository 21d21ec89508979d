//! File download operations with atomic writes and streaming
//!
//! This module handles file download operations including atomic writes,
//! content streaming, and proper error handling for interrupted downloads.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::client::http::HttpHandler;
use crate::constants::files;
use crate::errors::{DownloadError, DownloadResult};

/// File download operations handler
pub struct DownloadHandler<'a> {
    http_handler: &'a HttpHandler,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler with the given HTTP handler
    pub fn new(http_handler: &'a HttpHandler) -> Self {
        Self { http_handler }
    }

    /// Downloads a file to the specified path with atomic operations
    ///
    /// The body is streamed into a temporary sibling file which is renamed
    /// over `destination` once complete. Existing files are replaced.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The HTTP request fails or returns a non-success status
    /// - File I/O operations fail
    pub async fn download_file(&self, url: &Url, destination: &Path) -> DownloadResult<u64> {
        ensure_parent(destination).await?;
        let temp_path = temp_path_for(destination);

        match self.stream_to(url, &temp_path).await {
            Ok(bytes) => {
                commit(&temp_path, destination).await?;
                tracing::info!(
                    "Downloaded {} ({} bytes)",
                    destination.display(),
                    bytes
                );
                Ok(bytes)
            }
            Err(e) => {
                // Clean up temp file on failure
                if temp_path.exists() {
                    let _ = tokio::fs::remove_file(&temp_path).await;
                }
                Err(e)
            }
        }
    }

    /// Streams the response body into `temp_path`
    async fn stream_to(&self, url: &Url, temp_path: &Path) -> DownloadResult<u64> {
        let mut response = self.http_handler.get_response::<DownloadError>(url).await?;
        let mut file = File::create(temp_path).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

/// Writes text content to `destination` with the same temp + rename pattern
pub async fn write_text_file(destination: &Path, content: &str) -> DownloadResult<()> {
    ensure_parent(destination).await?;
    let temp_path = temp_path_for(destination);

    let mut file = File::create(&temp_path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    drop(file);

    commit(&temp_path, destination).await?;
    tracing::info!("Wrote {}", destination.display());
    Ok(())
}

async fn ensure_parent(destination: &Path) -> DownloadResult<()> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

async fn commit(temp_path: &Path, destination: &Path) -> DownloadResult<()> {
    tokio::fs::rename(temp_path, destination)
        .await
        .map_err(|_e| DownloadError::AtomicOperationFailed {
            temp_path: temp_path.to_path_buf(),
            final_path: destination.to_path_buf(),
        })
}

/// Temporary path next to `destination`: the file name plus the temp suffix
fn temp_path_for(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(files::TEMP_FILE_SUFFIX);
    destination.with_file_name(name)
}
