//! The checker capability shared by single services and chains.

use async_trait::async_trait;

use crate::{CheckResult, Result};

/// Anything that can check an address against one or more DNSBLs.
///
/// Single services and chains both implement this, so chains can nest.
#[async_trait]
pub trait DnsblChecker: Send + Sync {
    /// Checker name, used in logs and result origins
    fn name(&self) -> &str {
        ""
    }

    /// Check whether `ip_address` is on the blacklist.
    async fn check_ip_address(&self, ip_address: &str) -> Result<CheckResult>;

    /// Shortcut for `check_ip_address(..).is_listed()`
    async fn is_listed(&self, ip_address: &str) -> Result<bool> {
        Ok(self.check_ip_address(ip_address).await?.is_listed())
    }
}
