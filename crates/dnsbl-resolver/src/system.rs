//! Platform resolver.

use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use tracing::trace;

use crate::error::{ResolveError, ResolveResult};
use crate::Resolve;

/// Resolver backed by the operating system (`getaddrinfo`).
///
/// Timeouts and search domains are whatever the platform configures.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a resolver using the platform configuration
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolve for SystemResolver {
    async fn resolve_ipv4(&self, name: &str) -> ResolveResult<Ipv4Addr> {
        // Use port 0 for lookup
        let addr_str = format!("{name}:0");
        let addrs = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| classify(name, &e))?;

        let found = addrs
            .map(|a| a.ip())
            .find_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            });

        trace!(name, ?found, "system lookup");
        found.ok_or_else(|| ResolveError::not_found(name))
    }

    fn backend(&self) -> &'static str {
        "system"
    }
}

/// `getaddrinfo` reports NXDOMAIN only through its message text.
fn classify(name: &str, err: &io::Error) -> ResolveError {
    const NOT_FOUND_MARKERS: [&str; 4] = [
        "not known",
        "No address associated",
        "nodename nor servname",
        "No such host",
    ];

    let message = err.to_string();
    if err.kind() == io::ErrorKind::NotFound
        || NOT_FOUND_MARKERS.iter().any(|m| message.contains(m))
    {
        ResolveError::not_found(name)
    } else {
        ResolveError::lookup(name, message)
    }
}
