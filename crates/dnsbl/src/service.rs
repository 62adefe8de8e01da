//! Single DNSBL service checks.

use async_trait::async_trait;
use dnsbl_core::encoding::build_query_name;
use dnsbl_core::{CheckResult, CheckerRef, Detector, DnsblChecker, Result};
use dnsbl_resolver::{Resolve, SystemResolver};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

static SYSTEM_RESOLVER: SystemResolver = SystemResolver::new();

/// One DNSBL service: where to query and how to read the answer.
///
/// A definition is itself a checker. Without an injected resolver it uses the
/// platform resolver.
#[derive(Clone)]
pub struct ServiceDefinition {
    service_name: Cow<'static, str>,
    service_domain_suffix: Cow<'static, str>,
    detector: Detector,
    service_web_page_url: Cow<'static, str>,
    resolver: Option<Arc<dyn Resolve>>,
}

impl ServiceDefinition {
    /// Compile-time definition for the built-in catalog
    pub(crate) const fn builtin(
        service_name: &'static str,
        service_domain_suffix: &'static str,
        detector: Detector,
        service_web_page_url: &'static str,
    ) -> Self {
        Self {
            service_name: Cow::Borrowed(service_name),
            service_domain_suffix: Cow::Borrowed(service_domain_suffix),
            detector,
            service_web_page_url: Cow::Borrowed(service_web_page_url),
            resolver: None,
        }
    }

    /// Define a service
    pub fn new(
        service_name: impl Into<Cow<'static, str>>,
        service_domain_suffix: impl Into<Cow<'static, str>>,
        detector: Detector,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_domain_suffix: service_domain_suffix.into(),
            detector,
            service_web_page_url: Cow::Borrowed(""),
            resolver: None,
        }
    }

    /// Set the informational web page URL
    #[must_use]
    pub fn with_web_page_url(mut self, url: impl Into<Cow<'static, str>>) -> Self {
        self.service_web_page_url = url.into();
        self
    }

    /// Resolve through `resolver` instead of the platform resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Service name
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Zone the reversed address is queried under
    pub fn service_domain_suffix(&self) -> &str {
        &self.service_domain_suffix
    }

    /// Answer predicate
    pub const fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Informational URL (may be empty)
    pub fn service_web_page_url(&self) -> &str {
        &self.service_web_page_url
    }

    /// Query name for `ip_address` under this service
    pub fn check_target_domain_name(&self, ip_address: &str) -> String {
        build_query_name(ip_address, &self.service_domain_suffix)
    }

    fn resolver(&self) -> &dyn Resolve {
        self.resolver.as_deref().unwrap_or(&SYSTEM_RESOLVER)
    }

    fn checker_ref(&self) -> CheckerRef {
        CheckerRef::service(self.service_name.as_ref())
    }
}

#[async_trait]
impl DnsblChecker for ServiceDefinition {
    fn name(&self) -> &str {
        &self.service_name
    }

    /// Never fails: any resolution failure is reported as not listed.
    async fn check_ip_address(&self, ip_address: &str) -> Result<CheckResult> {
        let domain = self.check_target_domain_name(ip_address);
        let resolver = self.resolver();
        debug!(
            service = %self.service_name,
            query = %domain,
            backend = resolver.backend(),
            "DNSBL query"
        );

        let result = match resolver.resolve_ipv4(&domain).await {
            Ok(answer) if self.detector.matches(answer) => {
                debug!(service = %self.service_name, ip = ip_address, %answer, "listed");
                CheckResult::ng(ip_address, domain, answer, self.checker_ref())
            }
            Ok(answer) => {
                debug!(service = %self.service_name, %answer, "answer not matched by detector");
                CheckResult::ok(ip_address, domain, self.checker_ref())
            }
            Err(e) if e.is_not_found() => CheckResult::ok(ip_address, domain, self.checker_ref()),
            Err(e) => {
                // Indistinguishable from "not listed" to the caller
                warn!(service = %self.service_name, error = %e, "DNSBL lookup failed");
                CheckResult::ok(ip_address, domain, self.checker_ref())
            }
        };

        Ok(result)
    }
}

impl fmt::Debug for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDefinition")
            .field("service_name", &self.service_name)
            .field("service_domain_suffix", &self.service_domain_suffix)
            .field("detector", &self.detector)
            .field("service_web_page_url", &self.service_web_page_url)
            .field("resolver", &self.resolver().backend())
            .finish()
    }
}
