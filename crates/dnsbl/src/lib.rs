//! Check IPv4 addresses against DNS-based blackhole lists.
//!
//! A DNSBL lists an address by publishing an A record for the reversed
//! address under its zone: `1.2.3.4` is checked against `zen.spamhaus.org` by
//! resolving `4.3.2.1.zen.spamhaus.org`. No answer means not listed; an answer
//! the service's [`Detector`] accepts means listed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dnsbl::{default_chain, catalog, CheckerChain, DnsblChecker};
//!
//! #[tokio::main]
//! async fn main() -> dnsbl::Result<()> {
//!     // Every built-in service, stop at the first listing
//!     let result = default_chain().check_one("127.0.0.2").await?;
//!     println!("listed: {} by {}", result.is_listed(), result.checker());
//!
//!     // A hand-picked chain, every result
//!     let mut chain = CheckerChain::new();
//!     chain.add_checker(catalog::SPAMHAUS_ZEN)?.add_checker(catalog::BARRACUDA)?;
//!     for result in chain.check_all("127.0.0.2").await? {
//!         println!("{}: {}", result.checker(), result.is_listed());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Lookup failures are treated as "not listed" and only surface as `warn`
//! level `tracing` events. Checks are issued one at a time; nothing is cached
//! or retried.
//!
//! # Features
//!
//! - `default` - Enables `hickory`
//! - `hickory` - Allow `resolver = "hickory"` in [`DnsblConfig`]

#![doc(html_root_url = "https://docs.rs/dnsbl/0.3.0")]

pub mod catalog;
mod chain;
pub mod config;
mod service;

// Re-export core types
pub use dnsbl_core::*;

// Re-export resolvers
pub use dnsbl_resolver as resolver;
pub use dnsbl_resolver::{Resolve, ResolveError, SystemResolver};

pub use chain::{default_chain, CheckerChain};
pub use config::{DnsblConfig, ResolverKind, ServiceConfig};
pub use service::ServiceDefinition;
