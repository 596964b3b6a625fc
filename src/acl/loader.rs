//! Concurrent population of the blacklist cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use rustc_hash::FxHashSet;
use tracing::{error, info, warn};

use super::{AccessControlLists, SourceFetcher};
use crate::cache::SortedStringSet;
use crate::error::{Error, Result};

/// Per-source deadline applied when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries in the cache after sorting, duplicates included.
    pub domains: usize,
    pub sources: usize,
    pub failed_sources: usize,
    pub elapsed: Duration,
}

/// Populates a [`SortedStringSet`] from [`AccessControlLists`].
///
/// Every source is fetched in its own task. A failing source is logged and
/// contributes nothing; it never aborts the others.
pub struct Loader {
    fetcher: Arc<dyn SourceFetcher>,
    timeout: Duration,
}

impl Loader {
    pub fn new(fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self {
            fetcher,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the deadline for each individual source.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch every source, add the static blacklist and sort the cache once
    /// everything is in.
    pub async fn load(
        &self,
        lists: &AccessControlLists,
        cache: &Arc<SortedStringSet>,
    ) -> LoadReport {
        let start = Instant::now();
        let whitelist: Arc<FxHashSet<String>> =
            Arc::new(lists.whitelist.iter().cloned().collect());

        let tasks: Vec<_> = lists
            .sources
            .iter()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                let whitelist = Arc::clone(&whitelist);
                let cache = Arc::clone(cache);
                let source = source.clone();
                let timeout = self.timeout;
                tokio::spawn(async move {
                    info!(source = %source, "fetching blacklist");
                    let fetched =
                        fetch_source(fetcher.as_ref(), &source, &whitelist, &cache, timeout).await;
                    match fetched {
                        Ok(added) => {
                            info!(source = %source, added, "blacklist done");
                            true
                        }
                        Err(e) => {
                            warn!(source = %source, "blacklist skipped: {}", e);
                            false
                        }
                    }
                })
            })
            .collect();

        // Runs while the fetch tasks are in flight.
        cache.append(lists.blacklist.iter().cloned());

        let mut failed_sources = 0;
        for result in join_all(tasks).await {
            match result {
                Ok(true) => {}
                Ok(false) => failed_sources += 1,
                Err(e) => {
                    error!("blacklist task failed: {}", e);
                    failed_sources += 1;
                }
            }
        }

        cache.sort();

        let report = LoadReport {
            domains: cache.len(),
            sources: lists.sources.len(),
            failed_sources,
            elapsed: start.elapsed(),
        };
        info!(
            failed_sources = report.failed_sources,
            "blacklisted {} domains in {:.2?}", report.domains, report.elapsed
        );
        report
    }
}

async fn fetch_source(
    fetcher: &dyn SourceFetcher,
    url: &str,
    whitelist: &FxHashSet<String>,
    cache: &SortedStringSet,
    timeout: Duration,
) -> Result<usize> {
    let body = tokio::time::timeout(timeout, fetcher.fetch(url))
        .await
        .map_err(|_| Error::Timeout {
            url: url.to_string(),
            timeout,
        })??;

    let domains: Vec<String> = blocked_domains(&body, whitelist).collect();
    let added = domains.len();
    cache.append(domains);

    Ok(added)
}

/// Turn a source body into FQDNs, dropping whitelisted names, blank lines
/// and `#` comments.
///
/// Lines are trimmed first; the whitelist is matched against the trimmed
/// name, before the trailing dot is added.
fn blocked_domains<'a>(
    body: &'a str,
    whitelist: &'a FxHashSet<String>,
) -> impl Iterator<Item = String> + 'a {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(move |domain| !whitelist.contains(*domain))
        .map(|domain| format!("{domain}."))
}
