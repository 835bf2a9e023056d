//! Landing page for a logged-in user.

use leptos::prelude::*;

use crate::state::session::SessionStore;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let greeting = move || {
        let name = session.identity().and_then(|identity| identity.username().map(str::to_owned));
        match name {
            Some(name) => format!("Welcome, {name}!"),
            None => "Welcome!".to_owned(),
        }
    };

    view! {
        <section class="home-page">
            <h1>{greeting}</h1>
            <p>"Browse the catalog or add a product of your own."</p>
            <div class="home-page__actions">
                <a class="button" href="/products">"View products"</a>
                <a class="button button--secondary" href="/products/create">"Add product"</a>
            </div>
        </section>
    }
}
