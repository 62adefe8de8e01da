//! Name resolution backends for DNSBL lookups.
//!
//! A DNSBL query only needs one thing from DNS: the A record a reversed-IP
//! name resolves to, or the knowledge that there is none. [`Resolve`] is that
//! contract; [`ResolveError::NotFound`] is the standard "not listed" signal and
//! every other failure is [`ResolveError::Lookup`].
//!
//! # Backends
//!
//! - [`SystemResolver`] - the platform resolver (always available)
//! - `HickoryResolver` - direct DNS via hickory (feature `hickory`, default)

#![doc(html_root_url = "https://docs.rs/dnsbl-resolver/0.3.0")]

mod error;
mod system;

#[cfg(feature = "hickory")]
mod hickory;

use async_trait::async_trait;
use std::net::Ipv4Addr;

pub use error::{ResolveError, ResolveResult};
pub use system::SystemResolver;

#[cfg(feature = "hickory")]
pub use hickory::HickoryResolver;

/// Resolves a query name to its first IPv4 address.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Look up the A record for `name`
    async fn resolve_ipv4(&self, name: &str) -> ResolveResult<Ipv4Addr>;

    /// Backend label for logs
    fn backend(&self) -> &'static str {
        "custom"
    }
}
