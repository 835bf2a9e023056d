use super::*;
use crate::net::api::interpret_login;
use crate::net::types::Registration;
use crate::util::auth::{GuardDecision, LOGIN_ROUTE, guard_decision};
use crate::util::storage::MemoryStorage;
use futures::executor::block_on;
use std::sync::Mutex;

// =============================================================
// ScriptedApi
// =============================================================

/// Replays a fixed `/login` response through the real response interpreter.
struct ScriptedApi {
    login_status: u16,
    login_body: String,
    login_transport_error: Option<ApiError>,
    logout_result: Result<(), ApiError>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    fn login_responds(status: u16, body: &str) -> Self {
        Self {
            login_status: status,
            login_body: body.to_owned(),
            login_transport_error: None,
            logout_result: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            login_transport_error: Some(ApiError::NetworkFailure("connection refused".to_owned())),
            logout_result: Err(ApiError::NetworkFailure("timed out".to_owned())),
            ..Self::login_responds(0, "")
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, ApiError> {
        self.calls.lock().unwrap().push("login");
        if let Some(err) = &self.login_transport_error {
            return Err(err.clone());
        }
        interpret_login(self.login_status, &self.login_body)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push("logout");
        self.logout_result.clone()
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push("register");
        Ok(())
    }
}

// =============================================================
// Helpers
// =============================================================

fn store_over(storage: &MemoryStorage) -> SessionStore {
    SessionStore::new(Arc::new(storage.clone()))
}

fn bob() -> Credentials {
    Credentials { username: "bob".to_owned(), password: "secret1".to_owned() }
}

fn identity(json: &str) -> Identity {
    Identity::from_json(json).unwrap()
}

// =============================================================
// Identity
// =============================================================

#[test]
fn identity_id_accepts_string_and_number() {
    assert_eq!(identity(r#"{"id":"42"}"#).id().as_deref(), Some("42"));
    assert_eq!(identity(r#"{"id":7}"#).id().as_deref(), Some("7"));
    assert_eq!(identity(r#"{"id":""}"#).id(), None);
    assert_eq!(identity(r#"{"username":"alice"}"#).id(), None);
}

#[test]
fn identity_keeps_unknown_fields() {
    let record = identity(r#"{"id":"1","username":"alice","email":"a@b.co","role":"admin"}"#);
    assert_eq!(record.username(), Some("alice"));
    assert_eq!(record.get("role"), Some(&serde_json::json!("admin")));
    assert_eq!(Identity::from_json(&record.to_json()).unwrap(), record);
}

#[test]
fn identity_from_json_rejects_non_objects() {
    for raw in ["", "{", "not json", "null", "42", "true", "\"alice\"", "[1,2]"] {
        assert!(
            matches!(Identity::from_json(raw), Err(PersistedSessionError::Corrupt(_))),
            "expected corrupt for {raw:?}"
        );
    }
}

// =============================================================
// rehydrate
// =============================================================

#[test]
fn store_starts_anonymous_and_not_ready() {
    let store = store_over(&MemoryStorage::new());
    assert_eq!(store.current_untracked(), Session::Anonymous);
    assert!(!store.is_ready());
}

#[test]
fn rehydrate_without_slot_is_anonymous() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    assert_eq!(store.rehydrate(), Session::Anonymous);
    assert!(store.is_ready());
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
}

#[test]
fn rehydrate_restores_persisted_identity_and_guard_renders() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42","username":"alice"}"#);
    let store = store_over(&storage);

    let session = store.rehydrate();

    let record = session.identity().unwrap();
    assert_eq!(record.id().as_deref(), Some("42"));
    assert_eq!(record.username(), Some("alice"));
    assert_eq!(store.decide(guard_decision), GuardDecision::Render);
    // Storage is left as it was.
    assert_eq!(storage.read(SESSION_STORAGE_KEY).map(|raw| identity(&raw)), Some(record.clone()));
}

#[test]
fn rehydrate_discards_corrupt_values() {
    for raw in ["not json", "{\"id\":", "null", "[]", "17", "\"alice\""] {
        let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, raw);
        let store = store_over(&storage);

        assert_eq!(store.rehydrate(), Session::Anonymous, "value {raw:?}");
        assert_eq!(storage.read(SESSION_STORAGE_KEY), None, "slot not cleared for {raw:?}");
        assert!(store.is_ready());
    }
}

#[test]
fn rehydrate_runs_only_once() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.rehydrate();

    storage.write(SESSION_STORAGE_KEY, r#"{"id":"99"}"#);
    assert_eq!(store.rehydrate(), Session::Anonymous);
}

#[test]
fn restore_session_leaves_valid_slot_untouched() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"1"}"#);
    assert!(restore_session(&storage).is_authenticated());
    assert!(storage.read(SESSION_STORAGE_KEY).is_some());
}

// =============================================================
// establish_session
// =============================================================

#[test]
fn establish_session_persists_identity_from_response() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, r#"{"user":{"id":"7"}}"#);

    let returned = block_on(store.establish_session(&api, &bob())).unwrap();

    assert_eq!(returned.id().as_deref(), Some("7"));
    assert_eq!(store.identity(), Some(returned.clone()));
    let persisted = storage.read(SESSION_STORAGE_KEY).unwrap();
    assert_eq!(identity(&persisted), returned);
    assert_eq!(serde_json::from_str::<serde_json::Value>(&persisted).unwrap(), serde_json::json!({"id": "7"}));
    assert_eq!(store.decide(guard_decision), GuardDecision::Render);
}

#[test]
fn establish_session_rejected_keeps_anonymous() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(401, r#"{"message":"bad credentials"}"#);

    let err = block_on(store.establish_session(&api, &bob())).unwrap_err();

    assert_eq!(err, ApiError::AuthenticationFailed("bad credentials".to_owned()));
    assert_eq!(store.current_untracked(), Session::Anonymous);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    assert_eq!(store.decide(guard_decision), GuardDecision::Redirect(LOGIN_ROUTE));
}

#[test]
fn establish_session_network_failure_keeps_previous_session() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = store_over(&storage);
    let before = store.rehydrate();

    let err = block_on(store.establish_session(&ScriptedApi::unreachable(), &bob())).unwrap_err();

    assert!(matches!(err, ApiError::NetworkFailure(_)));
    assert_eq!(store.current_untracked(), before);
    assert_eq!(storage.read(SESSION_STORAGE_KEY).as_deref(), Some(r#"{"id":"42"}"#));
}

#[test]
fn establish_session_without_user_record_is_invalid_response() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, r#"{"message":"Logged in successfully"}"#);

    let err = block_on(store.establish_session(&api, &bob())).unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
    assert!(!store.current_untracked().is_authenticated());
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
}

#[test]
fn establish_session_replaces_previous_identity() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"1","username":"old"}"#);
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, r#"{"user":{"id":"2"}}"#);

    block_on(store.establish_session(&api, &bob())).unwrap();

    let current = store.identity().unwrap();
    assert_eq!(current.id().as_deref(), Some("2"));
    assert_eq!(current.username(), None);
    assert_eq!(identity(&storage.read(SESSION_STORAGE_KEY).unwrap()), current);
}

// =============================================================
// terminate_session
// =============================================================

#[test]
fn terminate_session_clears_memory_and_storage() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, "{}");

    block_on(store.terminate_session(&api));

    assert_eq!(api.calls(), vec!["logout"]);
    assert_eq!(store.current_untracked(), Session::Anonymous);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
    assert_eq!(store.decide(guard_decision), GuardDecision::Redirect(LOGIN_ROUTE));
}

#[test]
fn terminate_session_clears_even_when_logout_times_out() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = store_over(&storage);
    store.rehydrate();

    block_on(store.terminate_session(&ScriptedApi::unreachable()));

    assert_eq!(store.current_untracked(), Session::Anonymous);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
}

#[test]
fn terminate_then_login_round_trip() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, r#"{"user":{"id":"7","username":"bob"}}"#);

    block_on(store.establish_session(&api, &bob())).unwrap();
    block_on(store.terminate_session(&api));
    block_on(store.establish_session(&api, &bob())).unwrap();

    assert_eq!(api.calls(), vec!["login", "logout", "login"]);
    assert_eq!(store.identity().and_then(|i| i.username().map(str::to_owned)).as_deref(), Some("bob"));
    assert!(storage.read(SESSION_STORAGE_KEY).is_some());
}

/// `/logout` never answers.
struct HangingApi;

#[async_trait::async_trait(?Send)]
impl AuthApi for HangingApi {
    async fn login(&self, _credentials: &Credentials) -> Result<Identity, ApiError> {
        futures::future::pending().await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        futures::future::pending().await
    }

    async fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        futures::future::pending().await
    }
}

#[test]
fn terminate_session_gives_up_on_a_hanging_logout() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = store_over(&storage);
    store.rehydrate();

    block_on(store.terminate_session_within(&HangingApi, futures::future::ready(())));

    assert_eq!(store.current_untracked(), Session::Anonymous);
    assert_eq!(storage.read(SESSION_STORAGE_KEY), None);
}

#[test]
fn terminate_session_prefers_a_prompt_logout_over_the_timer() {
    let storage = MemoryStorage::with_slot(SESSION_STORAGE_KEY, r#"{"id":"42"}"#);
    let store = store_over(&storage);
    store.rehydrate();
    let api = ScriptedApi::login_responds(200, "{}");

    block_on(store.terminate_session_within(&api, futures::future::pending()));

    assert_eq!(api.calls(), vec!["logout"]);
    assert_eq!(store.current_untracked(), Session::Anonymous);
}
