//! Installer for the Google Closure Compiler.
//!
//! Installation downloads the Closure Compiler distribution, picks the jar and
//! the README out of it and stores them as
//!
//! ```text
//! <root>/closure_compiler/bin/closure-compiler-<version>.jar
//! <root>/closure_compiler/<version>/README.md
//! ```
//!
//! The download URL always serves the newest release. Requesting an explicit
//! version only changes where the files are stored, not what is downloaded.

use async_trait::async_trait;
use std::fs;
use tracing::{debug, info};

use super::archive::{find_artifact_entry, find_docs_entry, ArchiveReader};
use super::downloader::{Fetcher, HttpFetcher, ProgressCallback};
use super::error::{InstallError, Result};
use super::installable::{remove_dir_if_no_files, Installable};
use super::paths::InstallLayout;
use super::version::VersionResolver;
use crate::config::Settings;

/// Distribution archive; always the latest release.
pub const DOWNLOAD_URL: &str = "https://dl.google.com/closure-compiler/compiler-latest.zip";

/// Release listing for humans.
pub const WEBSITE: &str = "https://github.com/google/closure-compiler/wiki/Releases";

const TOOL_DIR: &str = "closure_compiler";
const ARTIFACT_STEM: &str = "closure-compiler";
const ARTIFACT_PREFIX: &str = "closure-compiler-";
const DOCS_ENTRY: &str = "README.md";

/// Installs and uninstalls Closure Compiler versions under one install root.
pub struct ClosureCompilerInstaller<F = HttpFetcher> {
    layout: InstallLayout,
    download_url: String,
    resolver: VersionResolver,
    fetcher: F,
}

impl ClosureCompilerInstaller<HttpFetcher> {
    /// Creates an installer downloading over HTTPS from the configured URL's host.
    pub fn new(settings: &Settings) -> Self {
        Self::with_fetcher(settings, HttpFetcher::for_url(&settings.download_url))
    }
}

impl<F: Fetcher> ClosureCompilerInstaller<F> {
    /// Creates an installer using `fetcher` for the download step.
    pub fn with_fetcher(settings: &Settings, fetcher: F) -> Self {
        let layout = InstallLayout::new(settings.install_root.clone(), TOOL_DIR, ARTIFACT_STEM);

        debug!(
            "Closure Compiler installer initialized. Tool dir: {}",
            layout.tool_dir().display()
        );

        Self {
            layout,
            download_url: settings.download_url.clone(),
            resolver: VersionResolver::new(),
            fetcher,
        }
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }
}

#[async_trait]
impl<F: Fetcher> Installable for ClosureCompilerInstaller<F> {
    fn display_name(&self) -> &'static str {
        "Closure Compiler"
    }

    fn website(&self) -> &'static str {
        WEBSITE
    }

    fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    async fn install(&self, version: Option<&str>, progress: &ProgressCallback<'_>) -> Result<String> {
        let version = self.resolve_version(version);
        info!(
            "Installing {} {} in {}",
            self.display_name(),
            version,
            self.layout.tool_dir().display()
        );

        let download = self.fetcher.download(&self.download_url, progress).await?;

        let readme_path = self.layout.readme_path(&version);
        let artifact_path = self.layout.artifact_path(&version);

        ArchiveReader::with(download.path(), |reader| {
            let names = reader.entry_names()?;
            let docs_entry = find_docs_entry(&names, DOCS_ENTRY)?;
            let artifact_entry = find_artifact_entry(&names, ARTIFACT_PREFIX)?;
            debug!("Selected entries: {} and {}", docs_entry, artifact_entry);

            reader.extract_entry(docs_entry, &readme_path)?;
            reader.extract_entry(artifact_entry, &artifact_path)?;
            Ok(())
        })?;

        info!(
            "{} {} installed successfully",
            self.display_name(),
            version
        );
        Ok(version)
    }

    async fn uninstall(&self, version: Option<&str>) -> Result<String> {
        let version = self.resolve_version(version);
        let artifact_path = self.layout.artifact_path(&version);

        if !artifact_path.is_file() {
            return Err(InstallError::FileNotFound {
                tool: self.layout.tool_name().to_string(),
                version,
                path: artifact_path,
            });
        }

        info!("Uninstalling {} {}", self.display_name(), version);

        fs::remove_file(&artifact_path).map_err(|e| InstallError::io(&artifact_path, e))?;
        debug!("Removed {}", artifact_path.display());

        let docs_dir = self.layout.docs_dir(&version);
        if !self.layout.owns_docs_dir(&version) {
            debug!("Keeping {}, not a per-version directory", docs_dir.display());
        } else if docs_dir.is_dir() {
            fs::remove_dir_all(&docs_dir).map_err(|e| InstallError::io(&docs_dir, e))?;
            debug!("Removed {}", docs_dir.display());
        }

        remove_dir_if_no_files(&self.layout.tool_dir())?;

        info!(
            "{} {} uninstalled successfully",
            self.display_name(),
            version
        );
        Ok(version)
    }
}
