use thiserror::Error;

/// Result type alias for resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Errors from a name lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// NXDOMAIN, or the name exists without any A record
    #[error("{name}: name not found")]
    NotFound {
        /// Queried name
        name: String,
    },

    /// Any other failure (timeout, network, SERVFAIL, malformed name)
    #[error("{name}: lookup failed: {reason}")]
    Lookup {
        /// Queried name
        name: String,
        /// Backend error message
        reason: String,
    },
}

impl ResolveError {
    /// Returns true for the standard "not listed" signal
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn lookup(name: &str, reason: impl ToString) -> Self {
        Self::Lookup {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
