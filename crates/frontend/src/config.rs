//! Frontend configuration

/// Demo configuration
pub struct DemoConfig;

impl DemoConfig {
    /// Base URL of the secured API
    pub const API_BASE_URL: &'static str = "http://localhost:8000";

    /// Session storage key for the hosted-provider session
    pub const SESSION_KEY: &'static str = "ward_session";

    /// Expiry-countdown refresh interval in milliseconds
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1_000;
}
