//! Access control lists for the blacklist cache.
//!
//! Describes where blocked domains come from (remote sources plus a static
//! blacklist) and which domains must never be blocked from those sources.
//! [`Loader`] turns a configuration into a populated, sorted
//! [`SortedStringSet`](crate::cache::SortedStringSet).

mod fetch;
mod loader;

pub use fetch::{HttpFetcher, SourceFetcher};
pub use loader::{DEFAULT_FETCH_TIMEOUT, LoadReport, Loader};

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Source used when no configuration file is given.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/gurparit/go-aggregate/master/blacklist.txt";

/// Blacklist sources and overrides.
///
/// Every key is optional in the configuration document; a missing key is
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessControlLists {
    /// URLs of newline-separated domain lists.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Domains blocked as given, without FQDN normalization.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Domains dropped from fetched sources.
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl AccessControlLists {
    /// Read the configuration at `path`, or fall back to the default single
    /// source when no path is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Decode a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| Error::ConfigDecode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for AccessControlLists {
    fn default() -> Self {
        Self {
            sources: vec![DEFAULT_SOURCE.to_string()],
            blacklist: Vec::new(),
            whitelist: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn resolve_without_path_uses_default_source() {
        let lists = AccessControlLists::resolve(None).unwrap();

        assert_eq!(lists.sources, vec![DEFAULT_SOURCE]);
        assert!(lists.blacklist.is_empty());
        assert!(lists.whitelist.is_empty());
    }

    #[test]
    fn from_file_reads_all_lists() {
        let file = write_config(
            r#"{
                "sources": ["http://lists.local/ads.txt", "http://lists.local/trackers.txt"],
                "blacklist": ["evil.example."],
                "whitelist": ["good.example"]
            }"#,
        );

        let lists = AccessControlLists::resolve(Some(file.path())).unwrap();

        assert_eq!(lists.sources.len(), 2);
        assert_eq!(lists.blacklist, vec!["evil.example."]);
        assert_eq!(lists.whitelist, vec!["good.example"]);
    }

    #[test]
    fn missing_keys_are_empty() {
        let file = write_config(r#"{ "blacklist": ["only.static."] }"#);

        let lists = AccessControlLists::from_file(file.path()).unwrap();

        assert!(lists.sources.is_empty());
        assert_eq!(lists.blacklist, vec!["only.static."]);
        assert!(lists.whitelist.is_empty());
    }

    #[test]
    fn malformed_file_is_decode_error() {
        let file = write_config("{ \"sources\": [1, 2");

        let err = AccessControlLists::from_file(file.path()).unwrap_err();

        assert!(matches!(err, Error::ConfigDecode { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = AccessControlLists::from_file(&path).unwrap_err();

        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
