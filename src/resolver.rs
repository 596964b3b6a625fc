//! Per-query blocking and upstream decision.
//!
//! Transports parse the query name and call [`Resolver::process_query`];
//! the resolver answers with either a block or the upstream to forward to.

use std::sync::Arc;

use crate::cache::SortedStringSet;
use crate::pool::UpstreamPool;

/// Action to take for a DNS query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    /// Name is blacklisted; answer locally.
    Blocked { domain: String },
    /// Forward the query to `upstream`.
    Forward { domain: String, upstream: String },
}

/// Combines the loaded blacklist with the upstream pool.
///
/// Shared between query-handling tasks behind an `Arc`.
pub struct Resolver {
    blacklist: Arc<SortedStringSet>,
    upstreams: UpstreamPool,
}

impl Resolver {
    /// Create a resolver over an already sorted blacklist.
    pub fn new(blacklist: Arc<SortedStringSet>, upstreams: UpstreamPool) -> Self {
        Self {
            blacklist,
            upstreams,
        }
    }

    /// Decide what to do with a query for `domain`.
    ///
    /// The name is matched exactly, so fetched entries only match names
    /// given with their trailing dot.
    pub fn process_query(&self, domain: &str) -> QueryAction {
        if self.blacklist.contains(domain) {
            return QueryAction::Blocked {
                domain: domain.to_string(),
            };
        }

        QueryAction::Forward {
            domain: domain.to_string(),
            upstream: self.upstreams.next(),
        }
    }

    /// Returns the number of entries in the blacklist.
    pub fn blocked_count(&self) -> usize {
        self.blacklist.len()
    }

    pub fn upstreams(&self) -> &UpstreamPool {
        &self.upstreams
    }
}
