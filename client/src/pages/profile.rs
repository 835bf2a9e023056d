//! Profile page: view and edit a user's username, email and password.
//!
//! The password input starts empty and is only sent when filled in. Saving a
//! profile does not touch the session identity.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::field_error::FieldError;
use crate::net::api::HttpApi;
use crate::net::types::UserProfile;
use crate::util::validation::{FieldErrors, GENERAL_FIELD, validate_profile};

const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully";

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<HttpApi>());
    let params = use_params_map();
    let profile_id = move || params.read().get("id").unwrap_or_default();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    let busy = RwSignal::new(false);

    let fill = move |profile: UserProfile| {
        username.set(profile.username);
        email.set(profile.email);
        password.set(String::new());
    };

    Effect::new(move || {
        let id = profile_id();
        loading.set(true);
        leptos::task::spawn_local(async move {
            match api.get_value().fetch_profile(&id).await {
                Ok(profile) => fill(profile),
                Err(e) => {
                    leptos::logging::warn!("profile fetch failed: {e}");
                    errors.update(|errors| errors.insert(GENERAL_FIELD, e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        message.set(String::new());
        let update = match validate_profile(&username.get_untracked(), &email.get_untracked(), &password.get_untracked())
        {
            Ok(update) => update,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);
        let id = profile_id();

        leptos::task::spawn_local(async move {
            match api.get_value().update_profile(&id, &update).await {
                Ok(profile) => {
                    fill(profile);
                    message.set(PROFILE_SAVED_MESSAGE.to_owned());
                }
                Err(e) => errors.update(|errors| errors.insert(GENERAL_FIELD, e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="form-page">
            <h1>"Edit Profile"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading..."</p> }>
                <Show when=move || !message.get().is_empty()>
                    <p class="form__success">{move || message.get()}</p>
                </Show>
                <FieldError errors=errors field=GENERAL_FIELD/>
                <form class="profile-form" on:submit=on_submit>
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
                        placeholder="Leave blank to keep the current password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="password"/>
                    <button class="form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Update Profile" }}
                    </button>
                </form>
            </Show>
        </section>
    }
}
