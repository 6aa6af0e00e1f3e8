//! Session context and the identity-collaborator implementation
//!
//! The hosted identity provider establishes the session out of band;
//! this module only reads it back from sessionStorage and hands the
//! current token to the API client on demand.

use crate::config::DemoConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use ward_http::TokenSource;
use web_sys::Storage;
use yew::prelude::*;

/// Session established by the hosted identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub expires_at: Option<i64>, // Unix timestamp
}

/// Session context data
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContextData {
    pub session: Option<Session>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Session context actions
pub enum SessionAction {
    Login(Session),
    Logout,
    SetLoading(bool),
    Expire,
}

/// Session context
pub type SessionContext = UseReducerHandle<SessionContextData>;

impl Default for SessionContextData {
    fn default() -> Self {
        Self {
            session: None,
            is_loading: true, // Start with loading to check sessionStorage
            error: None,
        }
    }
}

impl Reducible for SessionContextData {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Login(session) => {
                if let Some(storage) = session_storage() {
                    if let Ok(serialized) = serde_json::to_string(&session) {
                        let _ = storage.set_item(DemoConfig::SESSION_KEY, &serialized);
                    }
                }

                Rc::new(Self {
                    session: Some(session),
                    is_loading: false,
                    error: None,
                })
            }
            SessionAction::Logout => {
                if let Some(storage) = session_storage() {
                    let _ = storage.remove_item(DemoConfig::SESSION_KEY);
                }

                Rc::new(Self {
                    session: None,
                    is_loading: false,
                    error: None,
                })
            }
            SessionAction::SetLoading(is_loading) => Rc::new(Self {
                is_loading,
                ..(*self).clone()
            }),
            // The server rejected the credential; keep the session so
            // the page stays up, but tell the user about it.
            SessionAction::Expire => Rc::new(Self {
                session: self.session.clone(),
                is_loading: false,
                error: Some("Your session has expired. Please sign in again.".to_string()),
            }),
        }
    }
}

/// Get sessionStorage
fn session_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

/// Read the stored session back, if the provider has established one.
pub(crate) fn stored_session() -> Option<Session> {
    let stored = session_storage()?.get_item(DemoConfig::SESSION_KEY).ok()??;
    serde_json::from_str(&stored).ok()
}

/// Identity collaborator backed by the live session.
///
/// Reads the token fresh on every call so a session refreshed by the
/// provider is picked up without restarting the client.
pub struct SessionTokenSource;

#[async_trait]
impl TokenSource for SessionTokenSource {
    async fn token(&self) -> Option<String> {
        stored_session().map(|session| session.token)
    }
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session_state = use_reducer(SessionContextData::default);

    // Load the stored session on mount; a token past its expiry is
    // treated as no session at all.
    {
        let session_state = session_state.clone();
        use_effect_with((), move |_| {
            if let Some(session) = stored_session() {
                let still_valid = session.expires_at.map_or(true, |expires_at| {
                    let now = js_sys::Date::now() as i64 / 1000;
                    now < expires_at
                });
                if still_valid {
                    session_state.dispatch(SessionAction::Login(session));
                    return;
                }
            }
            session_state.dispatch(SessionAction::SetLoading(false));
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session_state}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to get the current session
#[hook]
pub fn use_session_state() -> Option<Session> {
    let session = use_session();
    session.session.clone()
}
