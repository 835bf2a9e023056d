//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::HttpApi;
use crate::state::session::SessionStore;
use crate::util::auth::logout_and_redirect;

/// Products, Profile and Logout for a logged-in user; a Login link otherwise.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = StoredValue::new(expect_context::<HttpApi>());
    let navigate = StoredValue::new_local(use_navigate());
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let api = api.get_value();
        let navigate = navigate.get_value();
        leptos::task::spawn_local(async move {
            logout_and_redirect(session, &api, navigate).await;
            busy.set(false);
        });
    };

    let profile_href = move || session.identity().and_then(|identity| identity.id()).map(|id| format!("/profile/{id}"));

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"Catalog"</a>
            <div class="navbar__links">
                <Show
                    when=move || session.is_authenticated()
                    fallback=|| view! { <a class="navbar__link" href="/login">"Login"</a> }
                >
                    <a class="navbar__link" href="/products">"Products"</a>
                    {move || profile_href().map(|href| view! { <a class="navbar__link" href=href>"Profile"</a> })}
                    <button class="navbar__logout" disabled=move || busy.get() on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
