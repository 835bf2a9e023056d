//! Inline validation message under a form input.

use leptos::prelude::*;

use crate::util::validation::FieldErrors;

#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|errors| errors.get(field).map(str::to_owned)).map(|message| {
            view! { <p class="form__error">{message}</p> }
        })
    }
}
