//! Installer settings.
//!
//! Resolved from the environment (`JUICER_HOME`) with fixed defaults for
//! everything else.

use serde::Serialize;
use std::path::PathBuf;

use crate::install::closure_compiler::DOWNLOAD_URL;
use crate::install::paths;

// =============================================================================
// Installer Settings
// =============================================================================

/// Settings shared by every installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Directory that owns all installed tool directories.
    pub install_root: PathBuf,

    /// Where the Closure Compiler distribution is downloaded from.
    pub download_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Settings {
    /// Settings for this process, honoring `JUICER_HOME`.
    pub fn from_env() -> Self {
        Self::with_install_root(paths::default_install_root())
    }

    /// Settings with an explicit install root and default everything else.
    pub fn with_install_root(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            download_url: DOWNLOAD_URL.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
