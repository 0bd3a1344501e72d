use chrono::Duration;

pub mod structures {
    use super::*;

    /// Window across which owner structure syncs are staggered.
    pub const SCHEDULE_INTERVAL: Duration = Duration::minutes(30);

    /// Runs every 30 minutes at the top of the minute.
    pub const CRON_EXPRESSION: &str = "0 */30 * * * *";
}

pub mod notifications {
    use super::*;

    /// Window across which notification fetches are staggered. Kept short
    /// so rotation through credentials subdivides the upstream cache.
    pub const SCHEDULE_INTERVAL: Duration = Duration::minutes(5);

    /// Runs every 5 minutes.
    pub const CRON_EXPRESSION: &str = "0 */5 * * * *";
}

pub mod assets {
    use super::*;

    /// Window across which asset syncs are staggered.
    pub const SCHEDULE_INTERVAL: Duration = Duration::minutes(30);

    /// Runs every 3 hours.
    pub const CRON_EXPRESSION: &str = "0 0 */3 * * *";
}

pub mod forwarding {
    /// Runs every minute so unsent notifications retry promptly.
    pub const CRON_EXPRESSION: &str = "0 * * * * *";
}

pub mod fuel_alerts {
    /// Runs every 15 minutes.
    pub const CRON_EXPRESSION: &str = "0 */15 * * * *";
}

pub mod service_status {
    /// Runs every minute so health transitions notify quickly.
    pub const CRON_EXPRESSION: &str = "0 * * * * *";
}
