//! Read-only card showing the signed-in user's identity

use crate::auth::Session;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UserInfoCardProps {
    pub session: Session,
}

#[function_component(UserInfoCard)]
pub fn user_info_card(props: &UserInfoCardProps) -> Html {
    html! {
        <div class="bg-white rounded-lg shadow-lg p-6">
            <h3 class="text-xl font-semibold text-gray-900 mb-4">
                {"User Information"}
            </h3>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div>
                    <p class="text-sm font-medium text-gray-500">{"Email"}</p>
                    <p class="text-lg text-gray-900">{&props.session.email}</p>
                </div>
                <div>
                    <p class="text-sm font-medium text-gray-500">{"User ID"}</p>
                    <p class="text-lg text-gray-900 font-mono">{&props.session.user_id}</p>
                </div>
            </div>
        </div>
    }
}
