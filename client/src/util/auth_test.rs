use super::*;
use crate::net::error::ApiError;
use crate::net::types::{Credentials, Registration};
use crate::state::session::{Identity, SESSION_STORAGE_KEY};
use crate::util::storage::{MemoryStorage, SessionStorage};
use std::cell::RefCell;
use std::sync::Arc;

fn authenticated() -> Session {
    Session::Authenticated(Identity::from_json(r#"{"id":"42","username":"alice"}"#).unwrap())
}

// =============================================================
// guard_decision
// =============================================================

#[test]
fn guard_waits_until_ready() {
    assert_eq!(guard_decision(false, &Session::Anonymous), GuardDecision::Pending);
    assert_eq!(guard_decision(false, &authenticated()), GuardDecision::Pending);
}

#[test]
fn guard_renders_only_when_authenticated() {
    assert_eq!(guard_decision(true, &authenticated()), GuardDecision::Render);
    assert_eq!(guard_decision(true, &Session::Anonymous), GuardDecision::Redirect(LOGIN_ROUTE));
}

#[test]
fn guard_never_renders_and_redirects_for_the_same_state() {
    for session in [Session::Anonymous, authenticated()] {
        let decision = guard_decision(true, &session);
        let renders = decision == GuardDecision::Render;
        let redirects = matches!(decision, GuardDecision::Redirect(_));
        assert!(renders != redirects);
        assert_eq!(renders, session.is_authenticated());
    }
}

// =============================================================
// guest_decision
// =============================================================

#[test]
fn guest_routes_send_authenticated_users_home() {
    assert_eq!(guest_decision(true, &authenticated()), GuardDecision::Redirect(HOME_ROUTE));
    assert_eq!(guest_decision(true, &Session::Anonymous), GuardDecision::Render);
    assert_eq!(guest_decision(false, &authenticated()), GuardDecision::Pending);
}

#[test]
fn redirect_options_replace_history() {
    assert!(redirect_options().replace);
}

// =============================================================
// logout_and_redirect
// =============================================================

struct TimeoutApi;

#[async_trait::async_trait(?Send)]
impl AuthApi for TimeoutApi {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, ApiError> {
        Err(ApiError::NetworkFailure("timed out".to_owned()))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Err(ApiError::NetworkFailure("timed out".to_owned()))
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        Err(ApiError::NetworkFailure("timed out".to_owned()))
    }
}

#[test]
fn logout_and_redirect_clears_session_then_navigates_to_login() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = SessionStore::new(Arc::new(storage.clone()));
    store.rehydrate();
    let visited = RefCell::new(Vec::new());

    futures::executor::block_on(logout_and_redirect(store, &TimeoutApi, |path: &str, _opts: NavigateOptions| {
        // Local state is already cleared when navigation happens.
        assert!(!store.current_untracked().is_authenticated());
        visited.borrow_mut().push(path.to_owned());
    }));

    assert_eq!(visited.into_inner(), vec![LOGIN_ROUTE.to_owned()]);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    assert_eq!(store.decide(guard_decision), GuardDecision::Redirect(LOGIN_ROUTE));
}

// =============================================================
// install_guard_redirect
// =============================================================

#[cfg(feature = "hydrate")]
mod guard_redirect {
    use super::*;
    use crate::net::api::interpret_login;
    use any_spawner::Executor;
    use std::rc::Rc;

    type Visits = Rc<RefCell<Vec<String>>>;

    struct AcceptingApi;

    #[async_trait::async_trait(?Send)]
    impl AuthApi for AcceptingApi {
        async fn login(&self, _credentials: &Credentials) -> Result<Identity, ApiError> {
            interpret_login(200, r#"{"user":{"id":"7","username":"bob"}}"#)
        }

        async fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }

        async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn recorder(visits: &Visits) -> impl Fn(&str, NavigateOptions) + Clone + 'static {
        let visits = Rc::clone(visits);
        move |path: &str, options: NavigateOptions| {
            assert!(options.replace);
            visits.borrow_mut().push(path.to_owned());
        }
    }

    async fn settle() {
        Executor::tick().await;
        Executor::tick().await;
    }

    fn visited(visits: &Visits) -> Vec<String> {
        visits.borrow().clone()
    }

    #[tokio::test]
    async fn protected_route_redirects_when_session_ends_while_mounted() {
        _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        tokio::task::LocalSet::new()
            .run_until(async {
                let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
                let store = SessionStore::new(Arc::new(storage));
                let visits = Visits::default();
                install_guard_redirect(store, guard_decision, recorder(&visits));

                settle().await;
                assert!(visited(&visits).is_empty(), "redirected before rehydrate");

                store.rehydrate();
                settle().await;
                assert!(visited(&visits).is_empty(), "redirected an authenticated session");

                store.terminate_session(&TimeoutApi).await;
                settle().await;
                assert_eq!(visited(&visits), vec![LOGIN_ROUTE.to_owned()]);
            })
            .await;
    }

    #[tokio::test]
    async fn guest_route_redirects_home_after_login() {
        _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        tokio::task::LocalSet::new()
            .run_until(async {
                let store = SessionStore::new(Arc::new(MemoryStorage::new()));
                let visits = Visits::default();
                install_guard_redirect(store, guest_decision, recorder(&visits));

                store.rehydrate();
                settle().await;
                assert!(visited(&visits).is_empty(), "redirected an anonymous guest");

                let credentials = Credentials { username: "bob".to_owned(), password: "secret1".to_owned() };
                store.establish_session(&AcceptingApi, &credentials).await.unwrap();
                settle().await;
                assert_eq!(visited(&visits), vec![HOME_ROUTE.to_owned()]);
            })
            .await;
    }
}
