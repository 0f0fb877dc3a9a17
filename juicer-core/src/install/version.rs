//! Version resolution for install and uninstall requests.

use std::sync::OnceLock;
use tracing::debug;

/// Sentinel returned while no real release discovery exists.
pub const LATEST_VERSION: &str = "latest";

/// Placeholder for "most recent release" discovery.
///
/// Always returns [`LATEST_VERSION`]; the remote release index is not queried.
pub fn latest_version_stub() -> String {
    LATEST_VERSION.to_string()
}

/// Turns an optional requested version into a concrete version token.
///
/// The latest token is computed at most once per resolver and reused for the
/// rest of its lifetime. Nothing is persisted.
#[derive(Debug)]
pub struct VersionResolver {
    latest: OnceLock<String>,
    discover: fn() -> String,
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionResolver {
    pub fn new() -> Self {
        Self::with_discovery(latest_version_stub)
    }

    /// Uses `discover` instead of the stub to compute the latest version.
    pub fn with_discovery(discover: fn() -> String) -> Self {
        Self {
            latest: OnceLock::new(),
            discover,
        }
    }

    /// Returns `requested` verbatim, or the memoized latest version.
    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested {
            Some(version) => version.to_string(),
            None => self.latest().to_string(),
        }
    }

    /// The latest version token, computed on first use.
    pub fn latest(&self) -> &str {
        self.latest.get_or_init(|| {
            let version = (self.discover)();
            debug!("Resolved latest version: {}", version);
            version
        })
    }

    /// True when `version` is the placeholder rather than a real release id.
    pub fn is_sentinel(version: &str) -> bool {
        version == LATEST_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_explicit_version_is_returned_verbatim() {
        let resolver = VersionResolver::new();
        for version in ["20200101", "v20230502", "", "not a version", "latest"] {
            assert_eq!(resolver.resolve(Some(version)), version);
        }
    }

    #[test]
    fn test_missing_version_resolves_to_sentinel() {
        let resolver = VersionResolver::new();
        let version = resolver.resolve(None);
        assert_eq!(version, LATEST_VERSION);
        assert!(VersionResolver::is_sentinel(&version));
        assert!(!VersionResolver::is_sentinel("20200101"));
    }

    #[test]
    fn test_latest_is_memoized() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn counting_discovery() -> String {
            let n = CALLS.fetch_add(1, Ordering::SeqCst);
            format!("v{}", n)
        }

        let resolver = VersionResolver::with_discovery(counting_discovery);
        let first = resolver.resolve(None);
        let second = resolver.resolve(None);

        assert_eq!(first, second);
        assert_eq!(first, "v0");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_explicit_version_does_not_trigger_discovery() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn counting_discovery() -> String {
            CALLS.fetch_add(1, Ordering::SeqCst);
            "unused".to_string()
        }

        let resolver = VersionResolver::with_discovery(counting_discovery);
        resolver.resolve(Some("20200101"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }
}
