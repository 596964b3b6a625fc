//! Error types for loading blacklists and selecting upstreams.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Error type for blacklist loading and upstream selection.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not a valid access control document
    #[error("failed to decode config {}: {source}", path.display())]
    ConfigDecode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Transport failure while fetching a source
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Source answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Source did not answer in time
    #[error("{url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Every configured upstream address was empty
    #[error("no upstream resolvers configured")]
    NoUpstreams,

    /// Async runtime could not be started
    #[error("failed to start runtime: {source}")]
    Runtime { source: std::io::Error },
}

/// Result type for blacklist and upstream operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpStatus {
            url: "http://lists.local/ads.txt".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "http://lists.local/ads.txt returned HTTP 404");

        let err = Error::Timeout {
            url: "http://lists.local/slow.txt".to_string(),
            timeout: Duration::from_secs(2),
        };
        assert_eq!(err.to_string(), "http://lists.local/slow.txt timed out after 2s");

        assert_eq!(Error::NoUpstreams.to_string(), "no upstream resolvers configured");
    }

    #[test]
    fn test_config_error_display_is_single_line() {
        let source = serde_json::from_str::<Vec<String>>("[1").unwrap_err();
        let err = Error::ConfigDecode {
            path: PathBuf::from("/etc/sinkhole.json"),
            source,
        };

        let msg = err.to_string();
        assert!(msg.starts_with("failed to decode config /etc/sinkhole.json: "));
        assert!(!msg.contains('\n'));
        assert!(!msg.contains("ConfigDecode"));
    }
}
