//! API testing panel
//!
//! Buttons for the demo GET endpoints plus the update-data form. Every
//! call goes through the shared dispatcher; this component only mirrors
//! its per-endpoint results and in-flight flags into render state.

use crate::auth::{use_session, SessionAction};
use crate::client::{api_client, ClientError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use ward_http::{Method, UserDataRequest};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Default)]
struct PanelState {
    loading: HashMap<String, bool>,
    results: HashMap<String, Value>,
}

enum PanelAction {
    Begin(String),
    Finished(String, HashMap<String, Value>),
    Failed(String, String),
}

impl Reducible for PanelState {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PanelAction::Begin(endpoint) => {
                next.loading.insert(endpoint, true);
            }
            PanelAction::Finished(endpoint, results) => {
                next.loading.insert(endpoint, false);
                next.results = results;
            }
            PanelAction::Failed(endpoint, message) => {
                next.loading.insert(endpoint.clone(), false);
                next.results.insert(endpoint, json!({ "error": message }));
            }
        }
        Rc::new(next)
    }
}

#[function_component(ApiPanel)]
pub fn api_panel() -> Html {
    let state = use_reducer(PanelState::default);
    let session = use_session();
    let name = use_state(String::new);
    let message = use_state(String::new);

    let call_api = {
        let state = state.clone();
        let session = session.clone();
        move |endpoint: &'static str, method: Method, payload: Option<Value>| {
            let state = state.clone();
            let session = session.clone();
            state.dispatch(PanelAction::Begin(endpoint.to_string()));
            spawn_local(async move {
                match api_client() {
                    Ok(client) => {
                        if let Err(err) = client.try_call(endpoint, method, payload).await {
                            if err.is_auth_expired() {
                                session.dispatch(SessionAction::Expire);
                            }
                        }
                        state.dispatch(PanelAction::Finished(
                            endpoint.to_string(),
                            client.results(),
                        ));
                    }
                    Err(err) => {
                        state.dispatch(PanelAction::Failed(endpoint.to_string(), err.to_string()));
                    }
                }
            });
        }
    };

    let on_protected = {
        let call_api = call_api.clone();
        Callback::from(move |_| call_api("/protected", Method::GET, None))
    };
    let on_profile = {
        let call_api = call_api.clone();
        Callback::from(move |_| call_api("/user/profile", Method::GET, None))
    };
    let on_admin = {
        let call_api = call_api.clone();
        Callback::from(move |_| call_api("/admin/users", Method::GET, None))
    };

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_message_input = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            message.set(input.value());
        })
    };

    let on_update = {
        let state = state.clone();
        let session = session.clone();
        let name = name.clone();
        let message = message.clone();
        Callback::from(move |_| {
            let request = UserDataRequest {
                name: (*name).clone(),
                message: (*message).clone(),
            };
            // Missing input blocks the submission before any dispatch.
            if let Err(err) = request.validate() {
                let notice = match &err {
                    ClientError::InvalidRequest(msg) => msg.clone(),
                    other => other.to_string(),
                };
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&notice);
                }
                return;
            }

            let state = state.clone();
            let session = session.clone();
            let name = name.clone();
            let message = message.clone();
            state.dispatch(PanelAction::Begin("/user/data".to_string()));
            spawn_local(async move {
                match api_client() {
                    Ok(client) => {
                        let payload = serde_json::to_value(&request).unwrap_or(Value::Null);
                        let outcome =
                            client.try_call("/user/data", Method::POST, Some(payload)).await;
                        if let Err(err) = outcome {
                            if err.is_auth_expired() {
                                session.dispatch(SessionAction::Expire);
                            }
                        }
                        state.dispatch(PanelAction::Finished(
                            "/user/data".to_string(),
                            client.results(),
                        ));
                    }
                    Err(err) => {
                        state.dispatch(PanelAction::Failed(
                            "/user/data".to_string(),
                            err.to_string(),
                        ));
                    }
                }
                // The form resets once the round trip settles.
                name.set(String::new());
                message.set(String::new());
            });
        })
    };

    let busy = |endpoint: &str| state.loading.get(endpoint).copied().unwrap_or(false);
    let protected_busy = busy("/protected");
    let profile_busy = busy("/user/profile");
    let admin_busy = busy("/admin/users");
    let update_busy = busy("/user/data");

    let mut responses: Vec<(&String, &Value)> = state.results.iter().collect();
    responses.sort_by(|a, b| a.0.cmp(b.0));

    html! {
        <>
        <div class="bg-white rounded-lg shadow-lg p-6">
            <h3 class="text-xl font-semibold text-gray-900 mb-4">
                {"API Testing"}
            </h3>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4 mb-6">
                <button
                    onclick={on_protected}
                    disabled={protected_busy}
                    class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded-md disabled:opacity-50"
                >
                    {if protected_busy { "Loading..." } else { "Test Protected Route" }}
                </button>

                <button
                    onclick={on_profile}
                    disabled={profile_busy}
                    class="bg-green-500 hover:bg-green-600 text-white px-4 py-2 rounded-md disabled:opacity-50"
                >
                    {if profile_busy { "Loading..." } else { "Get User Profile" }}
                </button>

                <button
                    onclick={on_admin}
                    disabled={admin_busy}
                    class="bg-purple-500 hover:bg-purple-600 text-white px-4 py-2 rounded-md disabled:opacity-50"
                >
                    {if admin_busy { "Loading..." } else { "Admin Route (Demo)" }}
                </button>
            </div>

            <div class="border-t pt-6">
                <h4 class="text-lg font-medium text-gray-900 mb-4">{"Update User Data"}</h4>
                <div class="space-y-4">
                    <input
                        type="text"
                        placeholder="Your name"
                        value={(*name).clone()}
                        oninput={on_name_input}
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:ring-2 focus:ring-blue-500 focus:border-transparent"
                    />
                    <textarea
                        placeholder="Your message"
                        value={(*message).clone()}
                        oninput={on_message_input}
                        rows="3"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:ring-2 focus:ring-blue-500 focus:border-transparent"
                    />
                    <button
                        onclick={on_update}
                        disabled={update_busy}
                        class="bg-orange-500 hover:bg-orange-600 text-white px-4 py-2 rounded-md disabled:opacity-50"
                    >
                        {if update_busy { "Updating..." } else { "Update Data" }}
                    </button>
                </div>
            </div>
        </div>

        if !responses.is_empty() {
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h3 class="text-xl font-semibold text-gray-900 mb-4">
                    {"API Responses"}
                </h3>
                <div class="space-y-4">
                    {responses.into_iter().map(|(endpoint, response)| {
                        let pretty = serde_json::to_string_pretty(response)
                            .unwrap_or_else(|_| response.to_string());
                        html! {
                            <div key={endpoint.clone()} class="border rounded-md p-4">
                                <h4 class="font-medium text-gray-900 mb-2">{endpoint}</h4>
                                <pre class="bg-gray-100 p-3 rounded text-sm overflow-auto">{pretty}</pre>
                            </div>
                        }
                    }).collect::<Html>()}
                </div>
            </div>
        }
        </>
    }
}
