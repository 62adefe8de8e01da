//! Detectors decide whether a resolved DNSBL answer means "listed".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Caller-supplied detection predicate
pub type DetectorFn = Arc<dyn Fn(Ipv4Addr) -> bool + Send + Sync>;

/// Predicate over the address a DNSBL query resolved to.
///
/// Providers encode listing reasons in the returned `127.0.0.X` address, so a
/// service either looks for one sentinel value or accepts a whole range.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    /// Listed only when the answer equals this address
    Exact(Ipv4Addr),

    /// Listed when the answer falls inside `network/prefix_len`
    Subnet {
        /// Network address
        network: Ipv4Addr,
        /// Prefix length in bits (0-32)
        prefix_len: u8,
    },

    /// Arbitrary predicate; not representable in configuration
    #[serde(skip)]
    Custom(DetectorFn),
}

impl Detector {
    /// The conventional "listed" sentinel used by most DNSBLs.
    pub const LOOPBACK_2: Self = Self::Exact(Ipv4Addr::new(127, 0, 0, 2));

    /// Any answer in `127.0.0.0/24`.
    pub const LOOPBACK_RANGE: Self = Self::Subnet {
        network: Ipv4Addr::new(127, 0, 0, 0),
        prefix_len: 24,
    };

    /// Match exactly one answer address
    #[must_use]
    pub const fn exact(addr: Ipv4Addr) -> Self {
        Self::Exact(addr)
    }

    /// Match any answer inside a network
    #[must_use]
    pub const fn subnet(network: Ipv4Addr, prefix_len: u8) -> Self {
        Self::Subnet {
            network,
            prefix_len,
        }
    }

    /// Wrap an arbitrary predicate
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(Ipv4Addr) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Apply the detector to a resolved address
    #[must_use]
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        match self {
            Self::Exact(expected) => addr == *expected,
            Self::Subnet {
                network,
                prefix_len,
            } => {
                let mask = subnet_mask(*prefix_len);
                u32::from(addr) & mask == u32::from(*network) & mask
            }
            Self::Custom(predicate) => predicate(addr),
        }
    }
}

fn subnet_mask(prefix_len: u8) -> u32 {
    let host_bits = 32 - u32::from(prefix_len.min(32));
    u32::MAX.checked_shl(host_bits).unwrap_or(0)
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(addr) => f.debug_tuple("Exact").field(addr).finish(),
            Self::Subnet {
                network,
                prefix_len,
            } => write!(f, "Subnet({network}/{prefix_len})"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
