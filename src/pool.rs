//! Round-robin selection of upstream resolvers.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::{Error, Result};

/// Cloudflare primary resolver.
pub const DEFAULT_PRIMARY: &str = "1.1.1.1";
/// Cloudflare secondary resolver.
pub const DEFAULT_SECONDARY: &str = "1.0.0.1";

/// Fixed pool of upstream resolver addresses handed out in rotation.
///
/// The index advances before each read, so the first call to
/// [`UpstreamPool::next`] returns the second configured address.
pub struct UpstreamPool {
    upstreams: Vec<String>,
    index: Mutex<usize>,
}

impl UpstreamPool {
    /// Create a pool from the non-empty entries of `addresses`.
    ///
    /// Fails with [`Error::NoUpstreams`] if nothing is left.
    pub fn new<I>(addresses: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let upstreams: Vec<String> = addresses
            .into_iter()
            .map(Into::into)
            .filter(|addr: &String| !addr.is_empty())
            .collect();

        if upstreams.is_empty() {
            return Err(Error::NoUpstreams);
        }

        Ok(Self {
            upstreams,
            index: Mutex::new(0),
        })
    }

    /// Create a pool from a primary and secondary address, either of which
    /// may be empty to leave it out.
    pub fn from_pair(primary: &str, secondary: &str) -> Result<Self> {
        info!(dns1 = primary, dns2 = secondary, "configuring upstreams");
        Self::new([primary, secondary])
    }

    /// Pick the next upstream in rotation.
    pub fn next(&self) -> String {
        let mut index = self.index.lock().unwrap_or_else(PoisonError::into_inner);

        *index += 1;
        if *index == self.upstreams.len() {
            *index = 0;
        }

        self.upstreams[*index].clone()
    }

    /// Returns the configured addresses in construction order.
    pub fn addresses(&self) -> &[String] {
        &self.upstreams
    }
}

impl Default for UpstreamPool {
    fn default() -> Self {
        Self {
            upstreams: vec![DEFAULT_PRIMARY.to_string(), DEFAULT_SECONDARY.to_string()],
            index: Mutex::new(0),
        }
    }
}
