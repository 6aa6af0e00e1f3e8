//! Application shell

use crate::auth::{use_session, SessionProvider};
use crate::components::{ApiPanel, SignInPrompt, TokenPanel, UserInfoCard};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProvider>
            <div class="min-h-screen bg-gray-50 py-8">
                <div class="max-w-4xl mx-auto px-4 space-y-8">
                    <Home />
                </div>
            </div>
        </SessionProvider>
    }
}

#[function_component(Home)]
fn home() -> Html {
    let session_ctx = use_session();

    if session_ctx.is_loading {
        return html! {
            <p class="text-center text-gray-500 p-10">{"Loading session..."}</p>
        };
    }

    match &session_ctx.session {
        None => html! { <SignInPrompt /> },
        Some(session) => html! {
            <>
            if let Some(error) = &session_ctx.error {
                <div class="bg-red-50 border border-red-200 text-red-700 rounded-md p-4">
                    {error}
                </div>
            }

            <div class="text-center">
                <h2 class="text-3xl font-bold text-gray-900 mb-4">
                    {"Welcome to the Secured API Demo"}
                </h2>
                <p class="text-lg text-gray-600 max-w-2xl mx-auto">
                    {"This page calls a token-protected API with a short-lived \
                      bearer token obtained from the hosted identity provider."}
                </p>
            </div>

            <UserInfoCard session={session.clone()} />
            <ApiPanel />
            <TokenPanel />
            </>
        },
    }
}
