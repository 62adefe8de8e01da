//! DNS resolution via hickory.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{Resolver, TokioResolver};
use std::net::{IpAddr, Ipv4Addr};
use tracing::trace;

use crate::error::{ResolveError, ResolveResult};
use crate::Resolve;

/// Resolver that speaks DNS directly instead of going through `getaddrinfo`.
///
/// Unlike [`SystemResolver`](crate::SystemResolver), NXDOMAIN is reported
/// precisely rather than inferred from an error message.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: TokioResolver,
}

impl HickoryResolver {
    /// Create a resolver from `/etc/resolv.conf` (or the platform equivalent)
    pub fn from_system_conf() -> Result<Self, hickory_resolver::ResolveError> {
        let resolver = TokioResolver::builder_tokio()?.build();
        Ok(Self { resolver })
    }

    /// Create a resolver with explicit nameservers and options
    #[must_use]
    pub fn from_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        let resolver = Resolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();
        Self { resolver }
    }
}

impl Default for HickoryResolver {
    /// System configuration, falling back to hickory's built-in upstreams
    fn default() -> Self {
        Self::from_system_conf()
            .unwrap_or_else(|_| Self::from_config(ResolverConfig::default(), ResolverOpts::default()))
    }
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn resolve_ipv4(&self, name: &str) -> ResolveResult<Ipv4Addr> {
        let lookup = self.resolver.lookup_ip(name).await.map_err(|e| {
            if e.is_nx_domain() || e.is_no_records_found() {
                ResolveError::not_found(name)
            } else {
                ResolveError::lookup(name, e)
            }
        })?;

        let found = lookup.iter().find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        });

        trace!(name, ?found, "hickory lookup");
        found.ok_or_else(|| ResolveError::not_found(name))
    }

    fn backend(&self) -> &'static str {
        "hickory"
    }
}
