use std::time::Duration;

use structwatch::{config::AppSettings, esi::EsiClient, model::app::AppState};
use structwatch_test_utils::{constant::TEST_USER_AGENT, TestSetup};

/// Default settings with retry waits shortened so failure tests run fast.
pub fn fast_settings() -> AppSettings {
    let mut settings = AppSettings::default();
    settings.notification_max_retries = 1;
    settings.notification_wait = Duration::from_millis(10);
    settings.esi_max_retries = 1;
    settings.esi_retry_wait = Duration::from_millis(10);
    settings
}

/// Build an `AppState` pointed at the setup's mock ESI server.
pub fn app_state(setup: &TestSetup) -> AppState {
    let esi_client = EsiClient::new(&setup.esi_url(), TEST_USER_AGENT, Duration::from_secs(5))
        .expect("Failed to build test ESI client");

    AppState {
        db: setup.db.clone(),
        esi_client,
        settings: fast_settings(),
    }
}
