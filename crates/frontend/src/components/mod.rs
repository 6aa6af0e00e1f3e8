//! UI components

pub mod api_panel;
pub mod sign_in;
pub mod token_panel;
pub mod user_info;

pub use api_panel::ApiPanel;
pub use sign_in::SignInPrompt;
pub use token_panel::TokenPanel;
pub use user_info::UserInfoCard;
