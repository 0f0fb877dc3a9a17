//! Tool installation: download, extract and remove versioned tool files.
//!
//! # Architecture
//!
//! - `error`: `InstallError`, shared by every step
//! - `paths`: install-root resolution and the per-tool layout
//! - `version`: requested-version resolution with a memoized "latest"
//! - `downloader`: `Fetcher` trait and the streaming `HttpFetcher`
//! - `archive`: zip entry listing, selection and single-entry extraction
//! - `installable`: the `Installable` capability trait and directory cleanup
//! - `closure_compiler`: the Closure Compiler installer
//!
//! # Example
//!
//! ```ignore
//! use juicer_core::install::{ClosureCompilerInstaller, Installable};
//! use juicer_core::Settings;
//!
//! let installer = ClosureCompilerInstaller::new(&Settings::from_env());
//!
//! let version = installer.install(Some("20200101"), &|progress| {
//!     if let Some(percent) = progress.percent {
//!         println!("Progress: {:.1}%", percent);
//!     }
//! }).await?;
//!
//! installer.uninstall(Some(&version)).await?;
//! ```

pub mod archive;
pub mod closure_compiler;
pub mod downloader;
pub mod error;
pub mod installable;
pub mod paths;
pub mod version;

// Re-export commonly used types
pub use archive::{find_artifact_entry, find_docs_entry, ArchiveReader};
pub use closure_compiler::{ClosureCompilerInstaller, DOWNLOAD_URL, WEBSITE};
pub use downloader::{
    no_progress, DownloadProgress, DownloadedArchive, Fetcher, HttpFetcher, ProgressCallback,
};
pub use error::InstallError;
pub use installable::{contains_files, remove_dir_if_no_files, Installable, InstalledVersion};
pub use paths::{default_install_root, install_root_from, InstallLayout, HOME_ENV_VAR};
pub use version::{latest_version_stub, VersionResolver, LATEST_VERSION};
