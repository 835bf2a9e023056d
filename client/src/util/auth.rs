//! Route-guard policy and shared redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and guest-only routes (login, register) apply the same
//! redirect behavior, so the decision lives here as pure functions of
//! `(ready, session)` and the components only wire it to the router.
//!
//! DESIGN
//! ======
//! The guard has no state of its own. Until the session store has rehydrated
//! the decision is `Pending`: nothing protected renders and nothing redirects.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::AuthApi;
use crate::state::session::{Session, SessionStore};

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

/// What a guarded route should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not yet known.
    Pending,
    /// Render the requested view.
    Render,
    /// Replace the current navigation with this path.
    Redirect(&'static str),
}

/// Protected routes render only for an authenticated session.
pub fn guard_decision(ready: bool, session: &Session) -> GuardDecision {
    match (ready, session.is_authenticated()) {
        (false, _) => GuardDecision::Pending,
        (true, true) => GuardDecision::Render,
        (true, false) => GuardDecision::Redirect(LOGIN_ROUTE),
    }
}

/// Guest routes (login, register) send an authenticated session home.
pub fn guest_decision(ready: bool, session: &Session) -> GuardDecision {
    match (ready, session.is_authenticated()) {
        (false, _) => GuardDecision::Pending,
        (true, true) => GuardDecision::Redirect(HOME_ROUTE),
        (true, false) => GuardDecision::Render,
    }
}

/// Options for guard redirects: the blocked navigation is replaced, not kept in history.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Re-evaluate `policy` whenever the session changes and follow any redirect.
pub fn install_guard_redirect<P, F>(store: SessionStore, policy: P, navigate: F)
where
    P: Fn(bool, &Session) -> GuardDecision + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = store.decide(&policy) {
            navigate(path, redirect_options());
        }
    });
}

/// Terminate the session and then navigate to the login route.
pub async fn logout_and_redirect<A, F>(store: SessionStore, api: &A, navigate: F)
where
    A: AuthApi + ?Sized,
    F: Fn(&str, NavigateOptions),
{
    store.terminate_session(api).await;
    navigate(LOGIN_ROUTE, NavigateOptions::default());
}
