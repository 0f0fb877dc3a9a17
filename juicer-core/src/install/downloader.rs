//! Archive download into a temporary location.
//!
//! The [`Fetcher`] trait is the seam between installers and the network.
//! [`HttpFetcher`] streams the response body with reqwest into a fresh
//! temporary directory that is deleted once the returned
//! [`DownloadedArchive`] is dropped.

use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use super::error::{InstallError, Result};

// ============================================================================
// URL Security Validation
// ============================================================================

/// Allowed domains for downloading tool distributions.
const ALLOWED_DOMAINS: &[&str] = &["dl.google.com"];

/// File name used when the URL path has no usable last segment.
const FALLBACK_FILE_NAME: &str = "download.zip";

fn invalid_url(url: &str, reason: impl Into<String>) -> InstallError {
    InstallError::InvalidUrl {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Validates that a URL is safe for downloading.
///
/// Checks:
/// - URL scheme must be HTTPS
/// - Host must be in the allowed domain list (subdomains included)
fn validate_url<S: AsRef<str>>(url_str: &str, allowed_domains: &[S]) -> Result<Url> {
    let url = Url::parse(url_str).map_err(|e| invalid_url(url_str, e.to_string()))?;

    if url.scheme() != "https" {
        return Err(invalid_url(url_str, "URL must use HTTPS"));
    }

    let host = url
        .host_str()
        .ok_or_else(|| invalid_url(url_str, "URL must have a host"))?;

    let is_allowed = allowed_domains.iter().map(AsRef::as_ref).any(|domain: &str| {
        host == domain || host.ends_with(&format!(".{}", domain))
    });

    if !is_allowed {
        let allowed: Vec<&str> = allowed_domains.iter().map(AsRef::as_ref).collect();
        return Err(invalid_url(
            url_str,
            format!("domain {} not allowed, allowed: {:?}", host, allowed),
        ));
    }

    Ok(url)
}

fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

// ============================================================================
// Download Progress
// ============================================================================

/// Progress information during a download.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Bytes downloaded so far.
    pub bytes_downloaded: u64,
    /// Total bytes expected (if known from Content-Length header).
    pub total_bytes: Option<u64>,
    /// Progress percentage (0.0 to 100.0), or None if total is unknown.
    pub percent: Option<f32>,
}

impl DownloadProgress {
    fn new(bytes_downloaded: u64, total_bytes: Option<u64>) -> Self {
        let percent = total_bytes.map(|total| {
            if total > 0 {
                (bytes_downloaded as f32 / total as f32) * 100.0
            } else {
                0.0
            }
        });

        Self {
            bytes_downloaded,
            total_bytes,
            percent,
        }
    }
}

/// Callback receiving download progress updates; may borrow local state.
pub type ProgressCallback<'a> = dyn Fn(DownloadProgress) + Send + Sync + 'a;

/// Progress callback that ignores every update.
pub fn no_progress(_: DownloadProgress) {}

// ============================================================================
// Downloaded Archive
// ============================================================================

/// A downloaded file living in its own temporary directory.
///
/// Dropping the value removes the directory and the file.
#[derive(Debug)]
pub struct DownloadedArchive {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl DownloadedArchive {
    /// Wraps `file_name` inside `temp_dir`; the file does not need to exist yet.
    pub fn new(temp_dir: TempDir, file_name: &str) -> Self {
        Self {
            path: temp_dir.path().join(file_name),
            _temp_dir: temp_dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// Fetcher
// ============================================================================

/// Downloads a URL to a local temporary file.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn download(&self, url: &str, progress: &ProgressCallback<'_>) -> Result<DownloadedArchive>;
}

/// Streaming HTTP fetcher restricted to HTTPS and an allow-list of domains.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    /// `None` disables URL validation.
    allowed_domains: Option<Vec<String>>,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            allowed_domains: Some(ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect()),
        }
    }

    /// Fetcher that also accepts the host of `download_url`, for mirrors.
    ///
    /// HTTPS is still required.
    pub fn for_url(download_url: &str) -> Self {
        let mut fetcher = Self::new();
        let host = Url::parse(download_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));

        if let (Some(host), Some(domains)) = (host, fetcher.allowed_domains.as_mut()) {
            if !domains.contains(&host) {
                debug!("Allowing downloads from configured host {}", host);
                domains.push(host);
            }
        }

        fetcher
    }

    /// Fetcher without URL validation or proxies, for local test servers.
    #[cfg(test)]
    pub(crate) fn unrestricted() -> Self {
        Self {
            client: reqwest::Client::builder()
                .no_proxy()
                .build()
                .expect("Failed to build test HTTP client"),
            allowed_domains: None,
        }
    }

    fn parse_url(&self, url: &str) -> Result<Url> {
        match &self.allowed_domains {
            Some(domains) => validate_url(url, domains),
            None => Url::parse(url).map_err(|e| invalid_url(url, e.to_string())),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn download(&self, url: &str, progress: &ProgressCallback<'_>) -> Result<DownloadedArchive> {
        let parsed = self.parse_url(url)?;
        info!("Downloading {}", url);

        let network_error = |source| InstallError::Network {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();
        debug!("Content-Length: {:?}", total_bytes);

        let temp_dir = tempfile::Builder::new()
            .prefix("juicer-")
            .tempdir()
            .map_err(|e| InstallError::io(std::env::temp_dir(), e))?;
        let archive = DownloadedArchive::new(temp_dir, &file_name_for(&parsed));
        let dest = archive.path().to_path_buf();

        let mut file = File::create(&dest)
            .await
            .map_err(|e| InstallError::io(&dest, e))?;

        let mut stream = response.bytes_stream();
        let mut bytes_downloaded: u64 = 0;

        progress(DownloadProgress::new(0, total_bytes));

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(network_error)?;

            file.write_all(&chunk)
                .await
                .map_err(|e| InstallError::io(&dest, e))?;

            bytes_downloaded += chunk.len() as u64;
            progress(DownloadProgress::new(bytes_downloaded, total_bytes));
        }

        file.flush().await.map_err(|e| InstallError::io(&dest, e))?;

        info!(
            "Download complete: {} bytes written to {}",
            bytes_downloaded,
            dest.display()
        );

        Ok(archive)
    }
}
