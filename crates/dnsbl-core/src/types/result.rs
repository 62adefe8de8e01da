//! Check result types.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// What kind of checker produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckerKind {
    /// A single DNSBL service lookup
    Service,
    /// An aggregate over several checkers
    Chain,
}

/// Identifies the checker a result came from.
///
/// Held by value so a result never keeps its checker alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckerRef {
    /// Checker name (service name or chain name)
    pub name: String,
    /// Checker kind
    pub kind: CheckerKind,
}

impl CheckerRef {
    /// Reference to a single service
    pub fn service(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CheckerKind::Service,
        }
    }

    /// Reference to a chain
    pub fn chain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CheckerKind::Chain,
        }
    }
}

impl fmt::Display for CheckerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Outcome of checking one address.
///
/// Only constructible through [`CheckResult::ok`] and [`CheckResult::ng`], so
/// `return_ip_address` is present exactly when the address is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    is_listed: bool,
    check_target_ip_address: String,
    check_target_domain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_ip_address: Option<Ipv4Addr>,
    checker: CheckerRef,
}

impl CheckResult {
    /// Not listed.
    ///
    /// `check_target_domain_name` is empty for aggregate results that do not
    /// correspond to a specific service lookup.
    pub fn ok(
        ip_address: impl Into<String>,
        check_target_domain_name: impl Into<String>,
        checker: CheckerRef,
    ) -> Self {
        Self {
            is_listed: false,
            check_target_ip_address: ip_address.into(),
            check_target_domain_name: check_target_domain_name.into(),
            return_ip_address: None,
            checker,
        }
    }

    /// Listed; `return_ip_address` is the answer the detector matched.
    pub fn ng(
        ip_address: impl Into<String>,
        check_target_domain_name: impl Into<String>,
        return_ip_address: Ipv4Addr,
        checker: CheckerRef,
    ) -> Self {
        Self {
            is_listed: true,
            check_target_ip_address: ip_address.into(),
            check_target_domain_name: check_target_domain_name.into(),
            return_ip_address: Some(return_ip_address),
            checker,
        }
    }

    /// Whether the address is blacklisted
    pub const fn is_listed(&self) -> bool {
        self.is_listed
    }

    /// The address that was checked, as supplied by the caller
    pub fn check_target_ip_address(&self) -> &str {
        &self.check_target_ip_address
    }

    /// The DNSBL query name that was resolved (empty for aggregate results)
    pub fn check_target_domain_name(&self) -> &str {
        &self.check_target_domain_name
    }

    /// The address the query resolved to, when listed
    pub const fn return_ip_address(&self) -> Option<Ipv4Addr> {
        self.return_ip_address
    }

    /// The checker that produced this result
    pub const fn checker(&self) -> &CheckerRef {
        &self.checker
    }
}
