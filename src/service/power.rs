//! Power mode inference for upwell structures.
//!
//! The upstream API never reports power mode directly, so it is inferred
//! from the fuel expiry and last-online timestamps on every read. The result
//! is best effort and an administrator can correct it by updating the
//! last-online timestamp.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    FullPower,
    LowPower,
    Abandoned,
    /// Unfueled and never seen online, so the abandoned state is uncertain.
    AbandonedUnknown,
}

impl PowerMode {
    /// Infer the power mode from current structure state.
    ///
    /// `recency_window` is how long after the last known online time an
    /// unfueled structure still counts as low power.
    pub fn infer(
        fuel_expires_at: Option<DateTime<Utc>>,
        last_online_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        recency_window: Duration,
    ) -> Self {
        if matches!(fuel_expires_at, Some(expires) if expires > now) {
            return Self::FullPower;
        }

        match last_online_at {
            Some(last_online) if now - last_online <= recency_window => Self::LowPower,
            Some(_) => Self::Abandoned,
            None => Self::AbandonedUnknown,
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::FullPower => "Full Power",
            Self::LowPower => "Low Power",
            Self::Abandoned => "Abandoned",
            Self::AbandonedUnknown => "Abandoned?",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::days(7);

    #[test]
    fn test_fueled_structure_is_full_power() {
        let now = Utc::now();
        let mode = PowerMode::infer(Some(now + Duration::hours(1)), None, now, WINDOW);
        assert_eq!(mode, PowerMode::FullPower);
    }

    #[test]
    fn test_recently_online_unfueled_structure_is_low_power() {
        let now = Utc::now();
        let mode = PowerMode::infer(
            Some(now - Duration::hours(1)),
            Some(now - Duration::hours(2)),
            now,
            WINDOW,
        );
        assert_eq!(mode, PowerMode::LowPower);
    }

    #[test]
    fn test_long_offline_structure_is_abandoned() {
        let now = Utc::now();
        let mode = PowerMode::infer(
            Some(now - Duration::days(30)),
            Some(now - Duration::days(30)),
            now,
            WINDOW,
        );
        assert_eq!(mode, PowerMode::Abandoned);
    }

    #[test]
    fn test_unknown_last_online_is_abandoned_unknown() {
        let now = Utc::now();
        let mode = PowerMode::infer(Some(now - Duration::days(30)), None, now, WINDOW);
        assert_eq!(mode, PowerMode::AbandonedUnknown);
        assert_eq!(mode.to_string(), "Abandoned?");
    }

    #[test]
    fn test_no_fuel_data_with_recent_online_is_low_power() {
        let now = Utc::now();
        let mode = PowerMode::infer(None, Some(now - Duration::days(1)), now, WINDOW);
        assert_eq!(mode, PowerMode::LowPower);
    }
}
