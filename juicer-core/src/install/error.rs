//! Error type shared by the fetch, extract and uninstall steps.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort an install or uninstall.
///
/// None of these are retried or recovered internally; the operation stops at
/// the first failure and whatever was already written stays on disk.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Network error while downloading {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid download URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to extract {entry}: {reason}")]
    Extraction { entry: String, reason: String },

    #[error("{tool} {version} is not installed ({} not found)", path.display())]
    FileNotFound {
        tool: String,
        version: String,
        path: PathBuf,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn extraction(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_subject() {
        let err = InstallError::HttpStatus {
            url: "https://dl.google.com/x.zip".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Download of https://dl.google.com/x.zip failed with status 404"
        );

        let err = InstallError::FileNotFound {
            tool: "closure_compiler".into(),
            version: "20200101".into(),
            path: PathBuf::from("/tmp/x.jar"),
        };
        assert!(err.to_string().contains("closure_compiler 20200101 is not installed"));
        assert!(err.to_string().contains("/tmp/x.jar"));
    }

    #[test]
    fn test_extraction_helper() {
        let err = InstallError::extraction("README.md", "entry not found in archive");
        assert!(matches!(err, InstallError::Extraction { ref entry, .. } if entry == "README.md"));
    }
}
