//! Zip archive access for downloaded distributions.
//!
//! Unlike a full unpack, installers pull out individual named entries, so the
//! reader exposes entry enumeration and single-entry extraction. The
//! underlying file handle is closed when the [`ArchiveReader`] is dropped.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{InstallError, Result};

/// An open zip archive.
pub struct ArchiveReader {
    path: PathBuf,
    archive: zip::ZipArchive<File>,
}

impl std::fmt::Debug for ArchiveReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveReader")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ArchiveReader {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::ArchiveOpen`] if the file is missing, unreadable
    /// or not a valid zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let archive_open = |source| InstallError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| archive_open(zip::result::ZipError::Io(e)))?;
        let archive = zip::ZipArchive::new(file).map_err(archive_open)?;

        debug!("Opened {} ({} entries)", path.display(), archive.len());

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Opens the archive, runs `f` on it and closes it on every exit path.
    pub fn with<T>(path: &Path, f: impl FnOnce(&mut ArchiveReader) -> Result<T>) -> Result<T> {
        let mut reader = Self::open(path)?;
        f(&mut reader)
    }

    /// Names of all entries in archive order, directories included.
    pub fn entry_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let entry = self.archive.by_index(i).map_err(|e| InstallError::ArchiveOpen {
                path: self.path.clone(),
                source: e,
            })?;
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    /// Writes the entry called `name` to `dest`, creating parent directories.
    ///
    /// Returns the number of bytes written.
    pub fn extract_entry(&mut self, name: &str, dest: &Path) -> Result<u64> {
        let mut entry = self.archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => {
                InstallError::extraction(name, "entry not found in archive")
            }
            other => InstallError::extraction(name, other.to_string()),
        })?;

        if entry.is_dir() {
            return Err(InstallError::extraction(name, "entry is a directory"));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                InstallError::extraction(name, format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut outfile = File::create(dest).map_err(|e| {
            InstallError::extraction(name, format!("failed to create {}: {}", dest.display(), e))
        })?;

        let written = io::copy(&mut entry, &mut outfile).map_err(|e| {
            InstallError::extraction(name, format!("failed to write {}: {}", dest.display(), e))
        })?;

        info!("Extracted {} to {} ({} bytes)", name, dest.display(), written);
        Ok(written)
    }
}

// ============================================================================
// Entry Selection
// ============================================================================

fn is_file_entry(name: &str) -> bool {
    !name.ends_with('/')
}

fn last_component(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Picks the runnable artifact among `names`.
///
/// A candidate is a file entry whose path contains `prefix` and ends in
/// `.jar`. Exactly one candidate must exist; none or several is an error.
pub fn find_artifact_entry<'a>(names: &'a [String], prefix: &str) -> Result<&'a str> {
    let candidates: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| is_file_entry(name) && name.contains(prefix) && name.ends_with(".jar"))
        .collect();

    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(InstallError::extraction(
            format!("{}*.jar", prefix),
            "no matching entry in archive",
        )),
        many => Err(InstallError::extraction(
            format!("{}*.jar", prefix),
            format!("ambiguous match, candidates: {}", many.join(", ")),
        )),
    }
}

/// Picks the documentation entry called `file_name`.
///
/// An entry with exactly that name wins; otherwise the first entry in archive
/// order whose last path component is `file_name`.
pub fn find_docs_entry<'a>(names: &'a [String], file_name: &str) -> Result<&'a str> {
    names
        .iter()
        .find(|name| name.as_str() == file_name)
        .or_else(|| {
            names
                .iter()
                .find(|name| is_file_entry(name) && last_component(name) == file_name)
        })
        .map(String::as_str)
        .ok_or_else(|| InstallError::extraction(file_name, "entry not found in archive"))
}
