//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates the single [`SessionStore`] and the [`HttpApi`] client and
//! provides both through context. Every route except `/login` and `/register`
//! is nested under [`RequireSession`], so the guard runs before any protected
//! page mounts.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::require_session::RequireSession;
use crate::config::ApiConfig;
use crate::net::api::HttpApi;
use crate::pages::{
    home::HomePage, login::LoginPage, product_detail::ProductDetailPage, product_form::CreateProductPage,
    product_form::UpdateProductPage, products::ProductsPage, profile::ProfilePage, register::RegisterPage,
};
use crate::state::session::SessionStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionStore::browser();
    provide_context(session);
    provide_context(HttpApi::new(ApiConfig::from_build_env()));

    // Effects only run in the browser, after hydration.
    Effect::new(move || {
        session.rehydrate();
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/catalog.css"/>
        <Title text="Catalog"/>

        <Router>
            <Navbar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <ParentRoute path=StaticSegment("") view=RequireSession>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("products") view=ProductsPage/>
                        <Route path=(StaticSegment("products"), StaticSegment("create")) view=CreateProductPage/>
                        <Route
                            path=(StaticSegment("products"), StaticSegment("update"), ParamSegment("id"))
                            view=UpdateProductPage
                        />
                        <Route path=(StaticSegment("products"), ParamSegment("id")) view=ProductDetailPage/>
                        <Route path=(StaticSegment("profile"), ParamSegment("id")) view=ProfilePage/>
                    </ParentRoute>
                </Routes>
            </main>
        </Router>
    }
}
