//! Ward HTTP module providing the token inspector and the authenticated
//! API client used by the demo frontend.
//!
//! The identity provider is modeled as an injected [`TokenSource`]; this
//! crate never issues or verifies tokens itself.

#[macro_use]
extern crate tracing;

pub mod client;
pub mod token;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiClient, ApiClientBuilder, TokenSource};
// Re-exported so frontends need no direct reqwest dependency.
pub use reqwest::Method;
pub use token::{Claims, ExpiryFacts};
pub use types::UserDataRequest;
