//! Shared constants for test setup.

/// User agent used by test ESI clients. Not a real contact address.
pub static TEST_USER_AGENT: &str = "structwatch-tests/0.1 (tests@example.com)";

/// Placeholder access token stored on test credentials.
pub static TEST_TOKEN: &str = "test-token";
