//! Ward API client
//!
//! Wraps every outbound call so it attaches a fresh bearer token from
//! the injected [`TokenSource`] and records a normalized result per
//! endpoint.

pub mod error;

use async_trait::async_trait;
use error::ClientError;
use reqwest::{header, Client, ClientBuilder, Method};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The identity collaborator: yields the current short-lived token.
///
/// Implementations may hit the network, return a cached value, or
/// refresh transparently. An absent token is a legal answer and is
/// passed through to the wire as the literal text `null`.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// Per-endpoint call bookkeeping. Later completions for the same
/// endpoint overwrite earlier ones; no history is retained.
#[derive(Debug, Default)]
struct CallState {
    results: HashMap<String, Value>,
    in_flight: HashMap<String, bool>,
}

/// Ward API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
    state: Arc<Mutex<CallState>>,
}

impl ApiClient {
    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `endpoint` with a fresh token and record the outcome.
    ///
    /// Success stores the parsed response body under the endpoint key;
    /// any failure stores `{"error": <message>}` in the same slot.
    /// The stored value is also returned for callers that await the
    /// call directly. The in-flight flag is cleared on every exit
    /// path.
    pub async fn call(&self, endpoint: &str, method: Method, payload: Option<Value>) -> Value {
        match self.try_call(endpoint, method, payload).await {
            Ok(body) => body,
            Err(err) => json!({ "error": error_message(&err) }),
        }
    }

    /// Like [`Self::call`], but hands the typed error back so callers
    /// can react to the failure class (an expired session, say). The
    /// result store and in-flight flag are updated the same way on
    /// every path.
    pub async fn try_call(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.set_in_flight(endpoint, true);

        let outcome = self.dispatch(endpoint, method, payload).await;
        let stored = match &outcome {
            Ok(body) => body.clone(),
            Err(err) => {
                warn!(endpoint, error = %err, "API call failed");
                json!({ "error": error_message(err) })
            }
        };

        let mut state = self.lock_state();
        state.results.insert(endpoint.to_string(), stored);
        state.in_flight.insert(endpoint.to_string(), false);
        drop(state);

        outcome
    }

    /// Stored result for one endpoint, if any call has completed.
    pub fn result_for(&self, endpoint: &str) -> Option<Value> {
        self.lock_state().results.get(endpoint).cloned()
    }

    /// Snapshot of all recorded results, keyed by endpoint.
    pub fn results(&self) -> HashMap<String, Value> {
        self.lock_state().results.clone()
    }

    /// Whether a call to `endpoint` is currently between dispatch and
    /// resolution.
    pub fn is_in_flight(&self, endpoint: &str) -> bool {
        self.lock_state()
            .in_flight
            .get(endpoint)
            .copied()
            .unwrap_or(false)
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<Value>,
    ) -> Result<Value, ClientError> {
        // A fresh token per call; the source decides about caching.
        let token = self.token_source.token().await;
        let bearer = token.as_deref().unwrap_or("null");

        debug!(endpoint, %method, "dispatching API call");

        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"));

        if method == Method::POST {
            if let Some(body) = payload {
                request = request.json(&body);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // Do not parse the body as the success payload.
            return Err(ClientError::from_status(status));
        }

        Ok(response.json().await?)
    }

    fn set_in_flight(&self, endpoint: &str, value: bool) {
        self.lock_state()
            .in_flight
            .insert(endpoint.to_string(), value);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CallState> {
        // Lock is held only for map mutation, never across an await.
        self.state.lock().expect("call state lock poisoned")
    }
}

/// The failure's description, with a fixed fallback if it has none.
fn error_message(err: &ClientError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    token_source: Option<Arc<dyn TokenSource>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the identity collaborator supplying bearer tokens
    pub fn token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let token_source = self
            .token_source
            .ok_or_else(|| ClientError::Configuration("token_source is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("ward-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            token_source,
            state: Arc::new(Mutex::new(CallState::default())),
        })
    }
}
