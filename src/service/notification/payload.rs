//! Helpers for the YAML-like `key: value` payload carried in the free-form
//! text of a notification.
//!
//! The game encodes times either as an LDAP/Win32 timestamp (100ns intervals
//! since 1601-01-01) or as a tick count used as a duration.

use chrono::{DateTime, TimeZone, Utc};

/// Seconds between the LDAP epoch (1601) and the Unix epoch (1970).
const LDAP_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// Find `key: value` in the payload and parse the value as an integer.
pub fn field_i64(text: &str, key: &str) -> Option<i64> {
    for line in text.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(key) {
            let rest = rest.trim_start();
            if let Some(value) = rest.strip_prefix(':') {
                // Skip a YAML anchor token like `&id001` if present.
                let value = value
                    .split_whitespace()
                    .find(|token| !token.starts_with('&'))
                    .unwrap_or("");
                return value.parse().ok();
            }
        }
    }
    None
}

/// Convert an LDAP timestamp into a UTC datetime.
pub fn ldap_datetime(value: i64) -> Option<DateTime<Utc>> {
    let secs = value / 10_000_000 - LDAP_EPOCH_OFFSET_SECS;
    Utc.timestamp_opt(secs, 0).single()
}

/// Convert an LDAP tick count into a duration.
pub fn ldap_duration(value: i64) -> chrono::Duration {
    chrono::Duration::seconds(value / 10_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_i64_finds_keys() {
        let text = "solarsystemID: 30002537\nstructureID: &id001 1021121988766\ntimeLeft: 1727805401093\n";
        assert_eq!(field_i64(text, "solarsystemID"), Some(30002537));
        assert_eq!(field_i64(text, "timeLeft"), Some(1727805401093));
        // Anchored values carry a YAML anchor token before the number.
        assert_eq!(field_i64(text, "structureID"), Some(1021121988766));
        assert_eq!(field_i64(text, "missing"), None);
    }

    #[test]
    fn test_field_i64_indented() {
        let text = "  vulnerableTime: 9000000000\n";
        assert_eq!(field_i64(text, "vulnerableTime"), Some(9000000000));
    }

    #[test]
    fn test_ldap_datetime() {
        // 2016-07-20 17:50:54 UTC
        let dt = ldap_datetime(131142378540000000).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2016-07-20 17:50:54");
    }

    #[test]
    fn test_ldap_duration() {
        // 9000000000 ticks = 900 seconds = 15 minutes
        assert_eq!(ldap_duration(9_000_000_000), chrono::Duration::minutes(15));
    }
}
