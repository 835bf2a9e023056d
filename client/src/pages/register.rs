//! Registration page: `POST /register`, then on to `/login`.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::field_error::FieldError;
use crate::net::api::{AuthApi, HttpApi};
use crate::state::session::SessionStore;
use crate::util::auth::{GuardDecision, LOGIN_ROUTE, guest_decision, install_guard_redirect};
use crate::util::validation::{FieldErrors, validate_registration};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = StoredValue::new(expect_context::<HttpApi>());
    let navigate = use_navigate();
    install_guard_redirect(session, guest_decision, navigate.clone());
    let navigate = StoredValue::new_local(navigate);

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let registration =
            match validate_registration(&username.get_untracked(), &email.get_untracked(), &password.get_untracked()) {
                Ok(registration) => registration,
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
            match api.register(&registration).await {
                Ok(()) => navigate.with_value(|navigate| navigate(LOGIN_ROUTE, NavigateOptions::default())),
                Err(e) => info.set(e.user_message()),
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
                    <h1>"Register"</h1>
                    <Show when=move || !info.get().is_empty()>
                        <p class="form__error form__error--general">{move || info.get()}</p>
                    </Show>
                    <form class="auth-form" on:submit=on_submit>
                        <label class="form__label" for="username">"Username"</label>
                        <input
                            class="form__input"
                            id="username"
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="username"/>
                        <label class="form__label" for="email">"Email"</label>
                        <input
                            class="form__input"
                            id="email"
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="email"/>
                        <label class="form__label" for="password">"Password"</label>
                        <input
                            class="form__input"
                            id="password"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field="password"/>
                        <button class="form__submit" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Processing..." } else { "Register" }}
                        </button>
                    </form>
                    <a class="auth-card__link" href="/login">"Already have an account?"</a>
                </div>
            </Show>
        </div>
    }
}
