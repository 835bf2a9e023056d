//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host serves three things from one Axum router: a health probe, the
//! Leptos SSR shell for every client route, and the compiled WASM/CSS bundle
//! under `/pkg`. All catalog data comes from the remote service, called
//! directly by the browser.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ConfigError;

/// Routes that do not go through Leptos.
pub fn api_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Request tracing and response compression applied to the whole app.
pub fn with_layers(router: Router) -> Router {
    router.layer(CompressionLayer::new()).layer(TraceLayer::new_for_http())
}

/// API routes + Leptos SSR + static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section or `LEPTOS_*` variables).
pub fn leptos_app() -> Result<Router, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(with_layers(
        api_routes()
            .merge(leptos_router)
            .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
            .fallback_service(ServeDir::new(site_root_path)),
    ))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
