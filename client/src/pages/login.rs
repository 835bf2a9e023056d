//! Login page: username + password against `POST /login`.
//!
//! DESIGN
//! ======
//! The page only collects input. `SessionStore::establish_session` performs
//! the call and the state change; the guest guard then replaces the route
//! with `/` as soon as the session becomes authenticated.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::field_error::FieldError;
use crate::net::api::HttpApi;
use crate::state::session::SessionStore;
use crate::util::auth::{GuardDecision, guest_decision, install_guard_redirect};
use crate::util::validation::{FieldErrors, validate_credentials};

pub(crate) fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Log in" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = StoredValue::new(expect_context::<HttpApi>());
    install_guard_redirect(session, guest_decision, use_navigate());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_credentials(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        info.set(String::new());
        busy.set(true);

        leptos::task::spawn_local(async move {
            let api = api.get_value();
            if let Err(e) = session.establish_session(&api, &credentials).await {
                info.set(e.user_message());
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <Show
                when=move || !matches!(session.decide(guest_decision), GuardDecision::Redirect(_))
                fallback=|| view! { <p class="page__status">"Redirecting..."</p> }
            >
                <div class="auth-card">
                    <h1>"Sign in to Catalog"</h1>
                    <form class="auth-form" on:submit=on_submit>
                        <Show when=move || !info.get().is_empty()>
                            <p class="form__error form__error--general">{move || info.get()}</p>
                        </Show>
                        <label class="form__label" for="username">"Username"</label>
                        <input
                            class="form__input"
                            id="username"
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="username"/>
                        <label class="form__label" for="password">"Password"</label>
                        <input
                            class="form__input"
                            id="password"
                            type="password"
                            placeholder="Enter your password"
                            autocomplete="off"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="password"/>
                        <button class="form__submit" type="submit" disabled=move || busy.get()>
                            {move || submit_label(busy.get())}
                        </button>
                    </form>
                    <a class="auth-card__link" href="/register">"Create new account?"</a>
                </div>
            </Show>
        </div>
    }
}
