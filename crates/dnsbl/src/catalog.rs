//! Built-in public DNSBL services.
//!
//! Each of these providers publishes its own usage policy; several forbid
//! high-volume or commercial use without a subscription. Confirm the terms of
//! every service before querying it.

use dnsbl_core::Detector;

use crate::ServiceDefinition;

/// Spamhaus ZEN; any `127.0.0.x` answer is a listing (the last octet encodes the list)
pub const SPAMHAUS_ZEN: ServiceDefinition = ServiceDefinition::builtin(
    "SPAMHAUS ZEN",
    "zen.spamhaus.org",
    Detector::LOOPBACK_RANGE,
    "https://www.spamhaus.org/zen/",
);

/// Barracuda Reputation Block List
pub const BARRACUDA: ServiceDefinition = ServiceDefinition::builtin(
    "Barracuda Reputation Block List",
    "b.barracudacentral.org",
    Detector::LOOPBACK_2,
    "http://barracudacentral.org/rbl",
);

/// SpamCop Blocking List
pub const SPAMCOP: ServiceDefinition = ServiceDefinition::builtin(
    "SpamCop Blocking List",
    "bl.spamcop.net",
    Detector::LOOPBACK_2,
    "https://www.spamcop.net/bl.shtml",
);

/// LashBack Unsubscribe Blacklist
pub const LASHBACK: ServiceDefinition = ServiceDefinition::builtin(
    "LashBack UBL",
    "ubl.unsubscore.com",
    Detector::LOOPBACK_2,
    "https://blacklist.lashback.com/",
);

/// Passive Spam Block List
pub const PSBL: ServiceDefinition = ServiceDefinition::builtin(
    "Passive Spam Block List",
    "psbl.surriel.com",
    Detector::LOOPBACK_2,
    "https://psbl.org/",
);

/// Every built-in service, in query order
pub const ALL: [ServiceDefinition; 5] = [SPAMHAUS_ZEN, BARRACUDA, SPAMCOP, LASHBACK, PSBL];

/// Owned copies of [`ALL`]
pub fn all() -> Vec<ServiceDefinition> {
    ALL.to_vec()
}

/// Look up a built-in service by its query zone
pub fn by_domain_suffix(suffix: &str) -> Option<ServiceDefinition> {
    let suffix = suffix.trim_end_matches('.');
    ALL.into_iter()
        .find(|svc| svc.service_domain_suffix().eq_ignore_ascii_case(suffix))
}
