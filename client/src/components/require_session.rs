//! Layout route that gates every protected page.
//!
//! DESIGN
//! ======
//! The decision comes from `util::auth::guard_decision`. While the session is
//! still rehydrating nothing protected renders; once it is known the outlet
//! renders for an authenticated session and the navigation is replaced with
//! `/login` otherwise.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionStore;
use crate::util::auth::{GuardDecision, guard_decision, install_guard_redirect};

#[component]
pub fn RequireSession() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    install_guard_redirect(session, guard_decision, use_navigate());

    view! {
        <Show
            when=move || session.decide(guard_decision) == GuardDecision::Render
            fallback=move || {
                view! {
                    <p class="page__status">
                        {move || if session.is_ready() { "Redirecting to login..." } else { "Loading..." }}
                    </p>
                }
            }
        >
            <Outlet/>
        </Show>
    }
}
