//! Core types and traits for DNSBL checking.
//!
//! This crate provides the foundational pieces shared by the DNSBL crates:
//!
//! - **Types**: [`CheckResult`], [`CheckerRef`] and the [`Detector`] predicates
//! - **Traits**: the [`DnsblChecker`] capability
//! - **Encoding**: reversed-octet query name construction
//! - **Errors**: [`DnsblError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use dnsbl_core::encoding::build_query_name;
//!
//! assert_eq!(
//!     build_query_name("1.2.3.4", "zen.spamhaus.org"),
//!     "4.3.2.1.zen.spamhaus.org"
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/dnsbl-core/0.3.0")]

mod checker;
pub mod encoding;
mod error;
pub mod types;

pub use checker::DnsblChecker;
pub use error::{DnsblError, Result};
pub use types::*;
