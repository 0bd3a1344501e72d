//! Process configuration loaded from the environment.

use std::time::Duration;

use crate::error::config::ConfigError;

/// Connection and credential settings required at startup.
pub struct Config {
    pub database_url: String,
    /// Base URL of the ESI API, overridable for tests.
    pub esi_base_url: String,
    /// Contact email sent in the ESI user agent header.
    pub contact_email: String,
    /// Address the health probe and status routes bind to.
    pub bind_address: String,
    /// Optional webhook URL for administrator notices.
    pub admin_webhook_url: Option<String>,
    /// Optional base URL of the external timer-tracking component.
    pub timers_url: Option<String>,
    pub settings: AppSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            esi_base_url: optional("ESI_BASE_URL")
                .unwrap_or_else(|| "https://esi.evetech.net/latest".to_string()),
            contact_email: require("CONTACT_EMAIL")?,
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            admin_webhook_url: optional("ADMIN_WEBHOOK_URL"),
            timers_url: optional("TIMERS_URL"),
            settings: AppSettings::from_env()?,
        })
    }
}

/// Runtime behavior settings with defaults matching documented operation.
///
/// All grace periods and retry budgets are tunable via environment variables
/// so operators can adapt them without a rebuild.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Max staleness of the last successful structure sync before an owner
    /// is reported as down.
    pub structure_sync_grace: Duration,
    /// Max staleness of the last successful notification sync before an
    /// owner is reported as down.
    pub notification_sync_grace: Duration,
    /// Max staleness of the last successful forwarding pass before an owner
    /// is reported as down.
    pub forwarding_sync_grace: Duration,
    /// Max retries for sending one notification to Discord.
    pub notification_max_retries: u32,
    /// Fixed wait between Discord send retries.
    pub notification_wait: Duration,
    /// Max retries for a transient ESI failure within one sync cycle.
    pub esi_max_retries: u32,
    /// Fixed wait between ESI retries.
    pub esi_retry_wait: Duration,
    /// Request timeout applied to every outbound HTTP call.
    pub request_timeout: Duration,
    /// Hard wall-clock budget for a single background job invocation.
    pub job_time_limit: Duration,
    /// Notifications older than this are no longer forwarded automatically.
    pub hours_until_stale: i64,
    /// Window after the last known online time within which an unfueled
    /// structure counts as low power rather than abandoned. The upstream
    /// API never reports this directly, so the inference is best effort.
    pub abandoned_recency_days: i64,
    /// Whether qualifying notifications create timers.
    pub add_timers: bool,
    /// Whether timers created from notifications are corp restricted.
    pub timers_are_corp_restricted: bool,
    /// Whether customs offices are fetched during structure sync.
    pub feature_customs_offices: bool,
    /// Whether starbases are fetched during structure sync.
    pub feature_starbases: bool,
    /// Whether refueled notifications are generated from fuel deltas.
    pub feature_refueled_notifications: bool,
    /// Max concurrent background jobs.
    pub max_concurrent_jobs: usize,
}

impl AppSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            structure_sync_grace: Duration::from_secs(
                60 * parse_or("STRUCTURE_SYNC_GRACE_MINUTES", 120)?,
            ),
            notification_sync_grace: Duration::from_secs(
                60 * parse_or("NOTIFICATION_SYNC_GRACE_MINUTES", 15)?,
            ),
            forwarding_sync_grace: Duration::from_secs(
                60 * parse_or("FORWARDING_SYNC_GRACE_MINUTES", 5)?,
            ),
            notification_max_retries: parse_or("NOTIFICATION_MAX_RETRIES", 3)? as u32,
            notification_wait: Duration::from_secs(parse_or("NOTIFICATION_WAIT_SEC", 5)?),
            esi_max_retries: parse_or("ESI_MAX_RETRIES", 3)? as u32,
            esi_retry_wait: Duration::from_secs(parse_or("ESI_RETRY_WAIT_SEC", 5)?),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SEC", 30)?),
            job_time_limit: Duration::from_secs(60 * parse_or("JOB_TIME_LIMIT_MINUTES", 10)?),
            hours_until_stale: parse_or("HOURS_UNTIL_STALE_NOTIFICATION", 24)? as i64,
            abandoned_recency_days: parse_or("ABANDONED_RECENCY_DAYS", 7)? as i64,
            add_timers: parse_bool_or("ADD_TIMERS", true)?,
            timers_are_corp_restricted: parse_bool_or("TIMERS_ARE_CORP_RESTRICTED", false)?,
            feature_customs_offices: parse_bool_or("FEATURE_CUSTOMS_OFFICES", false)?,
            feature_starbases: parse_bool_or("FEATURE_STARBASES", false)?,
            feature_refueled_notifications: parse_bool_or("FEATURE_REFUELED_NOTIFICATIONS", true)?,
            max_concurrent_jobs: parse_or("MAX_CONCURRENT_JOBS", 10)? as usize,
        })
    }
}

impl Default for AppSettings {
    /// Built-in defaults, used by tests that never touch the environment.
    fn default() -> Self {
        Self {
            structure_sync_grace: Duration::from_secs(120 * 60),
            notification_sync_grace: Duration::from_secs(15 * 60),
            forwarding_sync_grace: Duration::from_secs(5 * 60),
            notification_max_retries: 3,
            notification_wait: Duration::from_secs(5),
            esi_max_retries: 3,
            esi_retry_wait: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            job_time_limit: Duration::from_secs(10 * 60),
            hours_until_stale: 24,
            abandoned_recency_days: 7,
            add_timers: true,
            timers_are_corp_restricted: false,
            feature_customs_offices: false,
            feature_starbases: false,
            feature_refueled_notifications: true,
            max_concurrent_jobs: 10,
        }
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVariable(key.to_string(), value)),
        Err(_) => Ok(default),
    }
}

fn parse_bool_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(value) => match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidVariable(key.to_string(), value)),
        },
        Err(_) => Ok(default),
    }
}
