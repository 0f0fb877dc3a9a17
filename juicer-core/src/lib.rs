//! Juicer Core Library
//!
//! This crate provides the installer behind the `juicer` command:
//!
//! - Install-root resolution (`JUICER_HOME` or `~/.juicer`)
//! - Streaming archive download
//! - Zip entry selection and extraction into a versioned layout
//! - Uninstall with empty-directory cleanup
//! - The Google Closure Compiler installer

pub mod config;
pub mod install;

// Re-exports for convenience
pub use config::Settings;
pub use install::{ClosureCompilerInstaller, InstallError, Installable, InstalledVersion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
