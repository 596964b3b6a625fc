//! Sinkhole - blacklist cache and upstream selection for a DNS filtering proxy.
//!
//! The library loads blocked domains into a sorted cache and hands out
//! upstream resolvers in rotation; transports call into [`resolver::Resolver`].

pub mod acl;
pub mod cache;
pub mod error;
pub mod pool;
pub mod resolver;

pub use error::{Error, Result};
