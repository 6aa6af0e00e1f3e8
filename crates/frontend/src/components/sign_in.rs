//! Sign-in prompt shown when no provider session is present

use yew::prelude::*;

#[function_component(SignInPrompt)]
pub fn sign_in_prompt() -> Html {
    html! {
        <div class="bg-white rounded-lg shadow-lg p-6 text-center">
            <h3 class="text-xl font-semibold text-gray-900 mb-4">
                {"Sign in required"}
            </h3>
            <p class="text-gray-600 mb-4">
                {"No session was found. Sign in through the hosted identity \
                  provider to obtain a token, then return to this page."}
            </p>
            <p class="text-sm text-gray-500">
                {"The provider stores the session for this demo; nothing is \
                  issued or verified here."}
            </p>
        </div>
    }
}
