//! Install-root resolution and the per-tool directory layout.
//!
//! Everything lives under the install root:
//!
//! - `$JUICER_HOME` when set and non-empty
//! - otherwise `~/.juicer/`
//! - otherwise `{temp}/.juicer/` when no home directory can be determined
//!
//! Inside the root each tool owns one directory:
//!
//! ```text
//! <root>/<tool_dir>/bin/<artifact_stem>-<version>.jar
//! <root>/<tool_dir>/<version>/README.md
//! ```

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Environment variable naming the install root.
pub const HOME_ENV_VAR: &str = "JUICER_HOME";

/// Directory name used under the user's home when `JUICER_HOME` is unset.
const DEFAULT_HOME_DIR: &str = ".juicer";

const BIN_DIR: &str = "bin";
const DOCS_FILE: &str = "README.md";
const ARTIFACT_EXTENSION: &str = "jar";

// ============================================================================
// Install Root
// ============================================================================

/// Returns the install root for this process, honoring `JUICER_HOME`.
pub fn default_install_root() -> PathBuf {
    install_root_from(std::env::var_os(HOME_ENV_VAR))
}

/// Resolves the install root from an explicit `JUICER_HOME` value.
///
/// An empty value is treated like an unset one.
pub fn install_root_from(env_value: Option<OsString>) -> PathBuf {
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(DEFAULT_HOME_DIR),
    }
}

// ============================================================================
// Tool Layout
// ============================================================================

/// Fixed on-disk layout of one tool under an install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
    tool_dir: &'static str,
    artifact_stem: &'static str,
}

impl InstallLayout {
    /// `tool_dir` names the directory under the root (`closure_compiler`),
    /// `artifact_stem` prefixes the versioned jar (`closure-compiler`).
    pub fn new(root: impl Into<PathBuf>, tool_dir: &'static str, artifact_stem: &'static str) -> Self {
        Self {
            root: root.into(),
            tool_dir,
            artifact_stem,
        }
    }

    pub fn tool_name(&self) -> &'static str {
        self.tool_dir
    }

    /// `<root>/<tool_dir>/`
    pub fn tool_dir(&self) -> PathBuf {
        self.root.join(self.tool_dir)
    }

    /// `<root>/<tool_dir>/bin/`
    pub fn bin_dir(&self) -> PathBuf {
        self.tool_dir().join(BIN_DIR)
    }

    /// `<root>/<tool_dir>/<version>/`
    pub fn docs_dir(&self, version: &str) -> PathBuf {
        self.tool_dir().join(version)
    }

    /// Whether `docs_dir(version)` belongs to `version` alone.
    ///
    /// False for versions that would resolve to the tool dir itself, to
    /// `bin/`, or to anything outside a single child of the tool dir.
    pub fn owns_docs_dir(&self, version: &str) -> bool {
        let mut components = Path::new(version).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name != BIN_DIR,
            _ => false,
        }
    }

    /// `<root>/<tool_dir>/<version>/README.md`
    pub fn readme_path(&self, version: &str) -> PathBuf {
        self.docs_dir(version).join(DOCS_FILE)
    }

    /// File name of the runnable artifact for `version`.
    pub fn artifact_file_name(&self, version: &str) -> String {
        format!("{}-{}.{}", self.artifact_stem, version, ARTIFACT_EXTENSION)
    }

    /// `<root>/<tool_dir>/bin/<artifact_stem>-<version>.jar`
    pub fn artifact_path(&self, version: &str) -> PathBuf {
        self.bin_dir().join(self.artifact_file_name(version))
    }

    /// Inverse of [`artifact_file_name`](Self::artifact_file_name).
    pub fn version_from_artifact(&self, file_name: &str) -> Option<String> {
        let version = file_name
            .strip_prefix(self.artifact_stem)?
            .strip_prefix('-')?
            .strip_suffix(ARTIFACT_EXTENSION)?
            .strip_suffix('.')?;

        if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        }
    }
}
