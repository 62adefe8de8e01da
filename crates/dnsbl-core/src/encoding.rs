//! DNSBL query-name encoding.
//!
//! Standard DNSBL pattern: reverse the IP octets and query under the service zone.
//! Example: checking 1.2.3.4 against `zen.spamhaus.org` queries
//! `4.3.2.1.zen.spamhaus.org`.
//!
//! The input is not validated. A malformed address produces a malformed
//! query name, which simply fails to resolve and is reported as not listed.
//! IPv6 nibble-reversed names are not supported.

/// Reverse the dot-separated components of an address.
///
/// Converts `1.2.3.4` into `4.3.2.1`.
#[must_use]
pub fn reverse_ip_address(ip_address: &str) -> String {
    ip_address.rsplit('.').collect::<Vec<_>>().join(".")
}

/// Build the full DNSBL query name for an IP under a service domain suffix.
///
/// Example: `build_query_name("1.2.3.4", "zen.spamhaus.org")` -> `"4.3.2.1.zen.spamhaus.org"`
#[must_use]
pub fn build_query_name(ip_address: &str, domain_suffix: &str) -> String {
    let reversed = reverse_ip_address(ip_address);
    format!("{reversed}.{domain_suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_ip_address() {
        assert_eq!(reverse_ip_address("1.2.3.4"), "4.3.2.1");
        assert_eq!(reverse_ip_address("192.168.1.100"), "100.1.168.192");
    }

    #[test]
    fn test_reverse_is_involution() {
        for ip in ["1.2.3.4", "203.0.113.42", "127.0.0.2", "255.255.255.0"] {
            assert_eq!(reverse_ip_address(&reverse_ip_address(ip)), ip);
        }
    }

    #[test]
    fn test_build_query_name() {
        assert_eq!(
            build_query_name("1.2.3.4", "zen.spamhaus.org"),
            "4.3.2.1.zen.spamhaus.org"
        );
        assert_eq!(
            build_query_name("127.0.0.2", "b.barracudacentral.org"),
            "2.0.0.127.b.barracudacentral.org"
        );
    }

    #[test]
    fn test_malformed_input_is_passed_through() {
        // No validation; garbage in, garbage out.
        assert_eq!(reverse_ip_address("check.target.ip"), "ip.target.check");
        assert_eq!(reverse_ip_address("1.2.3"), "3.2.1");
        assert_eq!(reverse_ip_address("localhost"), "localhost");
        assert_eq!(build_query_name("", "bl.spamcop.net"), ".bl.spamcop.net");
    }
}
