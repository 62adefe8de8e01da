use thiserror::Error;

/// Result type alias for DNSBL operations
pub type Result<T> = std::result::Result<T, DnsblError>;

/// Errors that can occur when checking an address against DNSBL services.
///
/// Resolution failures are deliberately absent: a failed lookup is reported
/// as "not listed", never as an error.
#[derive(Error, Debug)]
pub enum DnsblError {
    /// A chain was asked to check an address while holding no members
    #[error("no checkers configured")]
    NoCheckers,

    /// Mutation attempted on a read-only chain
    #[error("{chain} is read-only")]
    ReadOnly {
        /// Name of the chain that rejected the mutation
        chain: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A resolver backend could not be constructed
    #[error("resolver error: {0}")]
    Resolver(String),

    /// I/O error (config file access)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DnsblError {
    /// Returns true if the error is due to an unsupported mutation
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly { .. })
    }

    /// Returns true if the error means no checkers were available
    #[must_use]
    pub const fn is_no_checkers(&self) -> bool {
        matches!(self, Self::NoCheckers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DnsblError::NoCheckers.to_string(), "no checkers configured");

        let err = DnsblError::ReadOnly {
            chain: "default".to_string(),
        };
        assert_eq!(err.to_string(), "default is read-only");
        assert!(err.is_read_only());
        assert!(!err.is_no_checkers());
    }
}
