//! Composite checkers.
//!
//! A [`CheckerChain`] queries its members in insertion order, either stopping
//! at the first listing ([`CheckerChain::check_one`]) or collecting every
//! member's result ([`CheckerChain::check_all`]). Chains are checkers too, so
//! they nest.

use async_trait::async_trait;
use dnsbl_core::{CheckResult, CheckerRef, DnsblChecker, DnsblError, Result};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

use crate::catalog;

const DEFAULT_CHAIN_NAME: &str = "checker-chain";

static DEFAULT_CHAIN: OnceLock<CheckerChain> = OnceLock::new();

/// The process-wide read-only chain over the built-in catalog.
///
/// Built on first use; every caller sees the same instance.
pub fn default_chain() -> &'static CheckerChain {
    DEFAULT_CHAIN.get_or_init(|| {
        let chain = CheckerChain::read_only(
            "default",
            catalog::all()
                .into_iter()
                .map(|svc| Arc::new(svc) as Arc<dyn DnsblChecker>),
        );
        info!(
            services = chain.len(),
            "default DNSBL chain initialized; confirm the usage policy of each service"
        );
        chain
    })
}

/// Ordered collection of checkers.
///
/// Whether a chain accepts mutation is fixed at construction.
#[derive(Clone)]
pub struct CheckerChain {
    name: String,
    checkers: Vec<Arc<dyn DnsblChecker>>,
    read_only: bool,
}

impl Default for CheckerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerChain {
    /// Empty, mutable chain
    #[must_use]
    pub fn new() -> Self {
        Self::named(DEFAULT_CHAIN_NAME)
    }

    /// Empty, mutable chain with a name for logs and result origins
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checkers: Vec::new(),
            read_only: false,
        }
    }

    /// Mutable chain pre-populated with `checkers`
    pub fn with_checkers(checkers: impl IntoIterator<Item = Arc<dyn DnsblChecker>>) -> Self {
        Self {
            checkers: checkers.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Sealed chain; [`add_checker`](Self::add_checker) and friends always fail
    pub fn read_only(
        name: impl Into<String>,
        checkers: impl IntoIterator<Item = Arc<dyn DnsblChecker>>,
    ) -> Self {
        Self {
            name: name.into(),
            checkers: checkers.into_iter().collect(),
            read_only: true,
        }
    }

    /// Whether mutation is rejected
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Number of direct members
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// True when the chain has no members
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Direct members, in query order
    pub fn checkers(&self) -> &[Arc<dyn DnsblChecker>] {
        &self.checkers
    }

    /// Append a checker
    pub fn add_checker(&mut self, checker: impl DnsblChecker + 'static) -> Result<&mut Self> {
        self.add_shared(Arc::new(checker))
    }

    /// Append a checker that is also held elsewhere
    pub fn add_shared(&mut self, checker: Arc<dyn DnsblChecker>) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.checkers.push(checker);
        Ok(self)
    }

    /// Append several checkers
    pub fn add_checkers(
        &mut self,
        checkers: impl IntoIterator<Item = Arc<dyn DnsblChecker>>,
    ) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.checkers.extend(checkers);
        Ok(self)
    }

    /// Remove every member
    pub fn clear_checkers(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.checkers.clear();
        Ok(())
    }

    /// Query members in order and return the first listing.
    ///
    /// Members after the first listing are not queried. When nothing lists the
    /// address the result is an aggregate `ok` with an empty domain name.
    pub async fn check_one(&self, ip_address: &str) -> Result<CheckResult> {
        self.require_checkers()?;

        for checker in &self.checkers {
            let result = checker.check_ip_address(ip_address).await?;
            if result.is_listed() {
                debug!(
                    chain = %self.name,
                    checker = %result.checker(),
                    ip = ip_address,
                    "listed"
                );
                return Ok(result);
            }
        }

        Ok(CheckResult::ok(ip_address, "", self.checker_ref()))
    }

    /// Alias for [`check_one`](Self::check_one)
    pub async fn check_any(&self, ip_address: &str) -> Result<CheckResult> {
        self.check_one(ip_address).await
    }

    /// Query every member and return their results in member order.
    pub async fn check_all(&self, ip_address: &str) -> Result<Vec<CheckResult>> {
        self.require_checkers()?;

        let mut results = Vec::with_capacity(self.checkers.len());
        for checker in &self.checkers {
            results.push(checker.check_ip_address(ip_address).await?);
        }

        debug!(
            chain = %self.name,
            ip = ip_address,
            listed = results.iter().filter(|r| r.is_listed()).count(),
            checked = results.len(),
            "checked all"
        );
        Ok(results)
    }

    fn require_checkers(&self) -> Result<()> {
        if self.checkers.is_empty() {
            return Err(DnsblError::NoCheckers);
        }
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.read_only {
            return Err(DnsblError::ReadOnly {
                chain: self.name.clone(),
            });
        }
        Ok(())
    }

    fn checker_ref(&self) -> CheckerRef {
        CheckerRef::chain(self.name.as_str())
    }
}

#[async_trait]
impl DnsblChecker for CheckerChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check_ip_address(&self, ip_address: &str) -> Result<CheckResult> {
        self.check_one(ip_address).await
    }
}

impl fmt::Debug for CheckerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerChain")
            .field("name", &self.name)
            .field(
                "checkers",
                &self.checkers.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("read_only", &self.read_only)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed-outcome checker that counts how often it is queried.
    struct CountingChecker {
        name: &'static str,
        listed: bool,
        calls: AtomicUsize,
    }

    impl CountingChecker {
        fn new(name: &'static str, listed: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                listed,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DnsblChecker for CountingChecker {
        fn name(&self) -> &str {
            self.name
        }

        async fn check_ip_address(&self, ip_address: &str) -> Result<CheckResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let domain = format!("{ip_address}.{}", self.name);
            let origin = CheckerRef::service(self.name);
            Ok(if self.listed {
                CheckResult::ng(ip_address, domain, Ipv4Addr::new(127, 0, 0, 2), origin)
            } else {
                CheckResult::ok(ip_address, domain, origin)
            })
        }
    }

    fn chain_of(members: &[Arc<CountingChecker>]) -> CheckerChain {
        CheckerChain::with_checkers(
            members
                .iter()
                .map(|m| Arc::clone(m) as Arc<dyn DnsblChecker>),
        )
    }

    #[tokio::test]
    async fn test_check_one_short_circuits() {
        let a = CountingChecker::new("a", false);
        let b = CountingChecker::new("b", true);
        let c = CountingChecker::new("c", false);
        let chain = chain_of(&[a.clone(), b.clone(), c.clone()]);

        let result = chain.check_one("1.2.3.4").await.unwrap();
        assert!(result.is_listed());
        assert_eq!(result.checker().name, "b");
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 0));
    }

    #[tokio::test]
    async fn test_check_one_none_listed() {
        let chain = chain_of(&[
            CountingChecker::new("a", false),
            CountingChecker::new("b", false),
        ]);

        let result = chain.check_one("1.2.3.4").await.unwrap();
        assert!(!result.is_listed());
        assert_eq!(result.check_target_domain_name(), "");
        assert_eq!(result.checker(), &CheckerRef::chain(DEFAULT_CHAIN_NAME));
    }

    #[tokio::test]
    async fn test_check_all_queries_everyone() {
        let a = CountingChecker::new("a", false);
        let b = CountingChecker::new("b", true);
        let c = CountingChecker::new("c", false);
        let chain = chain_of(&[a.clone(), b.clone(), c.clone()]);

        let results = chain.check_all("1.2.3.4").await.unwrap();
        let listed: Vec<_> = results.iter().map(CheckResult::is_listed).collect();
        assert_eq!(listed, [false, true, false]);

        let origins: Vec<_> = results.iter().map(|r| r.checker().name.as_str()).collect();
        assert_eq!(origins, ["a", "b", "c"]);
        assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let chain = CheckerChain::new();
        assert!(chain.check_one("1.2.3.4").await.unwrap_err().is_no_checkers());
        assert!(chain.check_all("1.2.3.4").await.unwrap_err().is_no_checkers());
    }

    #[tokio::test]
    async fn test_nested_empty_chain_fails_parent() {
        let mut parent = CheckerChain::named("parent");
        parent
            .add_checker(CheckerChain::named("child"))
            .unwrap();
        assert!(parent.check_one("1.2.3.4").await.unwrap_err().is_no_checkers());
    }

    #[tokio::test]
    async fn test_nested_chains() {
        let inner_hit = CountingChecker::new("inner-hit", true);
        let inner = chain_of(&[CountingChecker::new("inner-miss", false), inner_hit.clone()]);

        let mut outer = CheckerChain::named("outer");
        outer
            .add_shared(CountingChecker::new("outer-miss", false))
            .unwrap()
            .add_checker(inner)
            .unwrap();

        let result = outer.check_one("1.2.3.4").await.unwrap();
        assert!(result.is_listed());
        assert_eq!(result.checker().name, "inner-hit");
        assert_eq!(inner_hit.calls(), 1);

        // check_all on the outer chain reports the inner chain's aggregate
        let results = outer.check_all("1.2.3.4").await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_listed());
    }

    #[test]
    fn test_mutation() {
        let mut chain = CheckerChain::new();
        chain
            .add_shared(CountingChecker::new("a", false))
            .unwrap()
            .add_checkers([CountingChecker::new("b", false) as Arc<dyn DnsblChecker>])
            .unwrap();
        assert_eq!(chain.len(), 2);

        chain.clear_checkers().unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_read_only_rejects_mutation() {
        let mut chain = CheckerChain::read_only(
            "sealed",
            [CountingChecker::new("a", false) as Arc<dyn DnsblChecker>],
        );

        let err = chain
            .add_shared(CountingChecker::new("b", false))
            .unwrap_err();
        assert!(err.is_read_only());
        assert_eq!(err.to_string(), "sealed is read-only");

        assert!(chain.add_checkers(Vec::new()).unwrap_err().is_read_only());
        assert!(chain.clear_checkers().unwrap_err().is_read_only());

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.checkers()[0].name(), "a");
    }

    #[tokio::test]
    async fn test_repeated_checks_are_equal() {
        let chain = chain_of(&[
            CountingChecker::new("a", false),
            CountingChecker::new("b", true),
        ]);

        assert_eq!(
            chain.check_one("1.2.3.4").await.unwrap(),
            chain.check_one("1.2.3.4").await.unwrap()
        );
        assert_eq!(
            chain.check_all("1.2.3.4").await.unwrap(),
            chain.check_all("1.2.3.4").await.unwrap()
        );
    }

    #[test]
    fn test_default_chain() {
        let chain = default_chain();
        assert!(chain.is_read_only());
        assert_eq!(chain.len(), catalog::ALL.len());
        assert_eq!(chain.name(), "default");
        assert!(std::ptr::eq(chain, default_chain()));

        // Clones keep the seal
        let mut copy = chain.clone();
        assert!(copy.clear_checkers().unwrap_err().is_read_only());
        assert_eq!(copy.len(), chain.len());
    }

    #[test]
    fn test_default_chain_init_is_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| default_chain() as *const CheckerChain as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
