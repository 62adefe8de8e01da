//! Checker configuration.
//!
//! ```toml
//! resolver = "hickory"
//! include_builtin = false
//!
//! [[services]]
//! name = "Example BL"
//! domain_suffix = "bl.example.org"
//! detector = { subnet = { network = "127.0.0.0", prefix_len = 24 } }
//! ```

use dnsbl_core::{Detector, DnsblChecker, DnsblError, Result};
use dnsbl_resolver::{Resolve, SystemResolver};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::{catalog, CheckerChain, ServiceDefinition};

/// Which resolver backend the configured services share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    /// Platform resolver (`getaddrinfo`)
    #[default]
    System,
    /// Direct DNS via hickory (requires the `hickory` feature)
    Hickory,
}

/// One additional DNSBL service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Display name
    pub name: String,

    /// Zone the reversed address is queried under
    pub domain_suffix: String,

    /// Answer predicate (default: exactly `127.0.0.2`).
    #[serde(default = "default_detector")]
    pub detector: Detector,

    /// Informational URL
    #[serde(default)]
    pub web_page_url: Option<String>,
}

/// Configuration for building a [`CheckerChain`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsblConfig {
    /// Chain name used in logs and aggregate results
    #[serde(default = "default_name")]
    pub name: String,

    /// Resolver backend (default: system).
    #[serde(default)]
    pub resolver: ResolverKind,

    /// Query the built-in catalog before the configured services.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Build a sealed chain.
    #[serde(default)]
    pub read_only: bool,

    /// Additional services, queried in order after the catalog.
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl Default for DnsblConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            resolver: ResolverKind::default(),
            include_builtin: default_include_builtin(),
            read_only: false,
            services: Vec::new(),
        }
    }
}

impl DnsblConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            debug!(path = %path.display(), "no DNSBL config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| DnsblError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject services that could never be queried.
    pub fn validate(&self) -> Result<()> {
        for svc in &self.services {
            if svc.name.trim().is_empty() {
                return Err(DnsblError::Config(format!(
                    "service with suffix '{}' has no name",
                    svc.domain_suffix
                )));
            }
            if svc.domain_suffix.trim_matches('.').is_empty() {
                return Err(DnsblError::Config(format!(
                    "service '{}' has an empty domain suffix",
                    svc.name
                )));
            }
        }
        Ok(())
    }

    /// Construct the configured resolver backend.
    pub fn build_resolver(&self) -> Result<Arc<dyn Resolve>> {
        match self.resolver {
            ResolverKind::System => Ok(Arc::new(SystemResolver::new())),
            #[cfg(feature = "hickory")]
            ResolverKind::Hickory => dnsbl_resolver::HickoryResolver::from_system_conf()
                .map(|r| Arc::new(r) as Arc<dyn Resolve>)
                .map_err(|e| DnsblError::Resolver(e.to_string())),
            #[cfg(not(feature = "hickory"))]
            ResolverKind::Hickory => Err(DnsblError::Config(
                "resolver \"hickory\" requires the `hickory` feature".to_string(),
            )),
        }
    }

    /// Build a chain using the configured resolver.
    pub fn build_chain(&self) -> Result<CheckerChain> {
        let resolver = self.build_resolver()?;
        self.build_chain_with(resolver)
    }

    /// Build a chain whose services all resolve through `resolver`.
    pub fn build_chain_with(&self, resolver: Arc<dyn Resolve>) -> Result<CheckerChain> {
        self.validate()?;

        let builtin = if self.include_builtin {
            catalog::all()
        } else {
            Vec::new()
        };

        let configured = self.services.iter().map(|svc| {
            let definition = ServiceDefinition::new(
                svc.name.clone(),
                svc.domain_suffix.trim_end_matches('.').to_string(),
                svc.detector.clone(),
            );
            match &svc.web_page_url {
                Some(url) => definition.with_web_page_url(url.clone()),
                None => definition,
            }
        });

        let checkers = builtin
            .into_iter()
            .chain(configured)
            .map(|svc| Arc::new(svc.with_resolver(Arc::clone(&resolver))) as Arc<dyn DnsblChecker>);

        let chain = if self.read_only {
            CheckerChain::read_only(self.name.clone(), checkers)
        } else {
            let mut chain = CheckerChain::named(self.name.clone());
            chain.add_checkers(checkers)?;
            chain
        };

        debug!(
            chain = %self.name,
            services = chain.len(),
            backend = resolver.backend(),
            read_only = self.read_only,
            "built DNSBL chain"
        );
        Ok(chain)
    }
}

// Default value functions for serde.
fn default_name() -> String {
    String::from("dnsbl")
}

const fn default_include_builtin() -> bool {
    true
}

const fn default_detector() -> Detector {
    Detector::LOOPBACK_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::Ipv4Addr;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = DnsblConfig::default();
        assert_eq!(config.name, "dnsbl");
        assert_eq!(config.resolver, ResolverKind::System);
        assert!(config.include_builtin);
        assert!(!config.read_only);
        assert!(config.services.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let config = DnsblConfig::from_toml_str(
            r#"
            name = "mail-gate"
            resolver = "hickory"
            include_builtin = false
            read_only = true

            [[services]]
            name = "Example BL"
            domain_suffix = "bl.example.org"
            detector = { subnet = { network = "127.0.0.0", prefix_len = 24 } }
            web_page_url = "https://bl.example.org/"

            [[services]]
            name = "Other BL"
            domain_suffix = "dnsbl.example.net"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "mail-gate");
        assert_eq!(config.resolver, ResolverKind::Hickory);
        assert!(!config.include_builtin);
        assert!(config.read_only);
        assert_eq!(config.services.len(), 2);
        assert!(config.services[0]
            .detector
            .matches(Ipv4Addr::new(127, 0, 0, 9)));

        // Omitted detector falls back to 127.0.0.2
        let other = &config.services[1].detector;
        assert!(other.matches(Ipv4Addr::new(127, 0, 0, 2)));
        assert!(!other.matches(Ipv4Addr::new(127, 0, 0, 9)));
        assert!(config.services[1].web_page_url.is_none());
    }

    #[test]
    fn test_invalid_configs() {
        let err = DnsblConfig::from_toml_str("resolver = \"carrier-pigeon\"").unwrap_err();
        assert!(matches!(err, DnsblError::Config(_)));

        let err = DnsblConfig::from_toml_str(
            r#"
            [[services]]
            name = "Broken"
            domain_suffix = "."
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty domain suffix"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = DnsblConfig::load(Path::new("/nonexistent/dnsbl.toml")).unwrap();
        assert!(config.include_builtin);
    }

    #[test]
    fn test_load_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "include_builtin = false").unwrap();
        writeln!(tmp, "[[services]]").unwrap();
        writeln!(tmp, "name = \"Example BL\"").unwrap();
        writeln!(tmp, "domain_suffix = \"bl.example.org.\"").unwrap();
        tmp.flush().unwrap();

        let config = DnsblConfig::load(tmp.path()).unwrap();
        let chain = config.build_chain().unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.checkers()[0].name(), "Example BL");
    }

    #[test]
    fn test_build_chain_order_and_seal() {
        let config = DnsblConfig {
            read_only: true,
            services: vec![ServiceConfig {
                name: "Example BL".to_string(),
                domain_suffix: "bl.example.org".to_string(),
                detector: Detector::LOOPBACK_2,
                web_page_url: None,
            }],
            ..DnsblConfig::default()
        };

        let mut chain = config.build_chain().unwrap();
        assert!(chain.is_read_only());
        assert_eq!(chain.len(), catalog::ALL.len() + 1);
        assert_eq!(chain.checkers()[0].name(), "SPAMHAUS ZEN");
        assert_eq!(chain.checkers()[catalog::ALL.len()].name(), "Example BL");
        assert!(chain.clear_checkers().unwrap_err().is_read_only());
    }

    #[test]
    fn test_config_serialization() {
        let config = DnsblConfig {
            services: vec![ServiceConfig {
                name: "Example BL".to_string(),
                domain_suffix: "bl.example.org".to_string(),
                detector: Detector::LOOPBACK_RANGE,
                web_page_url: None,
            }],
            ..DnsblConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DnsblConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, config.name);
        assert!(parsed.services[0]
            .detector
            .matches(Ipv4Addr::new(127, 0, 0, 5)));
    }
}
