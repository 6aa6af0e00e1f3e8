//! Token inspection panel
//!
//! Reveals the raw bearer token for manual testing, together with its
//! decoded claims and derived expiry facts. The facts are recomputed on
//! a timer while a token is shown; the computation itself stays in the
//! core and is stateless.

use crate::auth::SessionTokenSource;
use crate::config::DemoConfig;
use gloo::timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use ward_http::{Claims, ExpiryFacts, TokenSource};
use yew::prelude::*;

#[function_component(TokenPanel)]
pub fn token_panel() -> Html {
    let token = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let update = use_force_update();

    let on_show = {
        let token = token.clone();
        let loading = loading.clone();
        Callback::from(move |_| {
            let token = token.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let current = SessionTokenSource.token().await;
                token.set(Some(
                    current.unwrap_or_else(|| "No token available".to_string()),
                ));
                loading.set(false);
            });
        })
    };

    let on_copy = {
        let token = token.clone();
        Callback::from(move |_| {
            if let Some(raw) = &*token {
                if let Some(window) = web_sys::window() {
                    let _ = window.navigator().clipboard().write_text(raw);
                    let _ = window.alert_with_message("Token copied to clipboard!");
                }
            }
        })
    };

    // Re-render every second while a token is visible so the
    // time-remaining display counts down.
    {
        let update = update.clone();
        use_effect_with((*token).clone(), move |current| {
            let interval = current.as_ref().map(|_| {
                Interval::new(DemoConfig::COUNTDOWN_INTERVAL_MS, move || {
                    update.force_update();
                })
            });
            move || drop(interval)
        });
    }

    let decoded = (*token).as_deref().and_then(Claims::decode);
    let facts = decoded.as_ref().map(ExpiryFacts::derive);

    html! {
        <div class="bg-white rounded-lg shadow-lg p-6">
            <h3 class="text-xl font-semibold text-gray-900 mb-4">
                {"Bearer Token (For Manual Testing)"}
            </h3>

            <button
                onclick={on_show}
                disabled={*loading}
                class="bg-gray-500 hover:bg-gray-600 text-white px-4 py-2 rounded-md disabled:opacity-50 mb-4"
            >
                {if *loading { "Getting Token..." } else { "Show Token" }}
            </button>

            if let Some(raw) = &*token {
                <div class="space-y-4">
                    <div class="bg-gray-100 p-4 rounded-md">
                        <div class="flex justify-between items-center mb-2">
                            <span class="font-medium text-gray-700">{"Your token:"}</span>
                            <button
                                onclick={on_copy}
                                class="bg-blue-500 hover:bg-blue-600 text-white px-2 py-1 rounded text-sm"
                            >
                                {"Copy"}
                            </button>
                        </div>
                        <code class="text-xs text-gray-800 break-all">{raw}</code>
                    </div>

                    {match (&decoded, &facts) {
                        (Some(claims), Some(facts)) => html! {
                            <>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                                <div>
                                    <p class="text-sm font-medium text-gray-500">{"Issued at"}</p>
                                    <p class="text-gray-900">{&facts.issued_at}</p>
                                </div>
                                <div>
                                    <p class="text-sm font-medium text-gray-500">{"Expires at"}</p>
                                    <p class="text-gray-900">{&facts.expires_at}</p>
                                </div>
                                <div>
                                    <p class="text-sm font-medium text-gray-500">{"Time remaining"}</p>
                                    <p class="text-gray-900">{&facts.time_remaining}</p>
                                </div>
                            </div>

                            <div>
                                <p class="font-medium text-gray-700 mb-2">{"Decoded claims:"}</p>
                                <table class="min-w-full text-sm">
                                    <tbody>
                                        {claims.iter().map(|(key, value)| html! {
                                            <tr key={key.clone()}>
                                                <td class="pr-4 py-1 font-mono text-gray-500">{key}</td>
                                                <td class="py-1 font-mono text-gray-900 break-all">{value.to_string()}</td>
                                            </tr>
                                        }).collect::<Html>()}
                                    </tbody>
                                </table>
                            </div>
                            </>
                        },
                        _ => html! {
                            <p class="text-sm text-gray-500">
                                {"Token could not be decoded; no claims to show."}
                            </p>
                        },
                    }}

                    <div class="bg-yellow-50 border border-yellow-200 rounded-md p-4">
                        <p class="font-medium text-yellow-800 mb-2">{"Manual testing with curl:"}</p>
                        <pre class="text-xs text-yellow-700 bg-yellow-100 p-2 rounded overflow-auto">
                            {format!("curl -H \"Authorization: Bearer {raw}\" \\\n     {}/protected", DemoConfig::API_BASE_URL)}
                        </pre>
                    </div>
                </div>
            }
        </div>
    }
}
