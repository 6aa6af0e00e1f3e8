pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;

pub use app::App;
pub use auth::SessionContext;
pub use config::DemoConfig;
