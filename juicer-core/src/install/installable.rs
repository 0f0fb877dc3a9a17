//! Capability trait shared by tool installers.
//!
//! Installers expose their [`InstallLayout`] and [`VersionResolver`]; the
//! version resolution, installed-state queries and empty-directory cleanup
//! are provided on top of those two values.

use async_trait::async_trait;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::downloader::ProgressCallback;
use super::error::{InstallError, Result};
use super::paths::InstallLayout;
use super::version::VersionResolver;

/// One installed version as found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledVersion {
    pub version: String,
    pub artifact: PathBuf,
    /// Documentation directory, if it is still present.
    pub docs: Option<PathBuf>,
}

#[async_trait]
pub trait Installable: Send + Sync {
    /// Human-readable tool name.
    fn display_name(&self) -> &'static str;

    /// Release listing for humans; never fetched.
    fn website(&self) -> &'static str;

    fn layout(&self) -> &InstallLayout;

    fn resolver(&self) -> &VersionResolver;

    /// Downloads and places the tool, returning the resolved version.
    async fn install(&self, version: Option<&str>, progress: &ProgressCallback<'_>) -> Result<String>;

    /// Removes an installed version, returning the resolved version.
    async fn uninstall(&self, version: Option<&str>) -> Result<String>;

    fn resolve_version(&self, version: Option<&str>) -> String {
        self.resolver().resolve(version)
    }

    /// Whether the runnable artifact for `version` exists.
    fn is_installed(&self, version: Option<&str>) -> bool {
        let version = self.resolve_version(version);
        self.layout().artifact_path(&version).is_file()
    }

    /// Installed versions found in the tool's `bin` directory, sorted.
    fn installed_versions(&self) -> Result<Vec<InstalledVersion>> {
        let layout = self.layout();
        let bin_dir = layout.bin_dir();

        let entries = match fs::read_dir(&bin_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(InstallError::io(bin_dir, e)),
        };

        let mut installed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| InstallError::io(&bin_dir, e))?;
            let artifact = entry.path();
            if !artifact.is_file() {
                continue;
            }

            let Some(version) = entry
                .file_name()
                .to_str()
                .and_then(|name| layout.version_from_artifact(name))
            else {
                continue;
            };

            let docs_dir = layout.docs_dir(&version);
            installed.push(InstalledVersion {
                docs: (layout.owns_docs_dir(&version) && docs_dir.is_dir()).then_some(docs_dir),
                version,
                artifact,
            });
        }

        installed.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(installed)
    }
}

/// Returns true if any regular file exists anywhere below `dir`.
pub fn contains_files(dir: &Path) -> Result<bool> {
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let entries = fs::read_dir(&current).map_err(|e| InstallError::io(&current, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| InstallError::io(&current, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| InstallError::io(entry.path(), e))?;

            if file_type.is_dir() {
                stack.push(entry.path());
            } else {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Removes `dir` and everything below it if it holds no regular file.
///
/// Returns whether the directory was removed. A missing `dir` is left alone.
pub fn remove_dir_if_no_files(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }

    if contains_files(dir)? {
        debug!("{} still has files, keeping it", dir.display());
        return Ok(false);
    }

    fs::remove_dir_all(dir).map_err(|e| InstallError::io(dir, e))?;
    info!("Removed empty directory {}", dir.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_contains_files_nested() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tool");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::create_dir_all(root.join("d")).unwrap();

        assert!(!contains_files(&root).unwrap());

        fs::write(root.join("a/b/c/file.txt"), b"x").unwrap();
        assert!(contains_files(&root).unwrap());
    }

    #[test]
    fn test_remove_dir_if_no_files_removes_empty_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tool");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::create_dir_all(root.join("20200101/empty")).unwrap();

        assert!(remove_dir_if_no_files(&root).unwrap());
        assert!(!root.exists());
        assert!(temp_dir.path().exists());
    }

    #[test]
    fn test_remove_dir_if_no_files_keeps_populated_tree() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tool");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/other.jar"), b"jar").unwrap();

        assert!(!remove_dir_if_no_files(&root).unwrap());
        assert!(root.join("bin/other.jar").exists());
    }

    #[test]
    fn test_remove_dir_if_no_files_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!remove_dir_if_no_files(&temp_dir.path().join("nope")).unwrap());
    }
}
