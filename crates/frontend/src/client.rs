//! Client configuration and initialization

use crate::auth::SessionTokenSource;
use crate::config::DemoConfig;
use once_cell::sync::Lazy;
use std::sync::Mutex;
pub use ward_http::ClientError;
use ward_http::ApiClient;

/// Global client instance
static API_CLIENT: Lazy<Mutex<Option<ApiClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the API client, initializing it on first use.
///
/// The client carries the session-backed token source, so every call
/// it dispatches picks up the current token.
pub fn api_client() -> Result<ApiClient, ClientError> {
    let mut client_lock = API_CLIENT.lock().expect("Failed to acquire client lock");

    if client_lock.is_none() {
        log::debug!("initializing API client for {}", DemoConfig::API_BASE_URL);
        let client = ApiClient::builder()
            .base_url(DemoConfig::API_BASE_URL)
            .token_source(SessionTokenSource)
            .build()?;
        *client_lock = Some(client);
    }

    Ok(client_lock
        .as_ref()
        .expect("API client should be initialized")
        .clone())
}
