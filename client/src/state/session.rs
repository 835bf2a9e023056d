//! Session store: who is logged in, persisted across reloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionStore`] is created in `App` and provided through Leptos
//! context. The route guard, navbar, and login/register pages read it; only
//! [`SessionStore::rehydrate`], [`SessionStore::establish_session`] and
//! [`SessionStore::terminate_session`] write it.
//!
//! DESIGN
//! ======
//! The session lives in a single `RwSignal<Session>`, so every transition is
//! one signal write and tracked readers (effects, views) re-run on change.
//! The durable copy lives in storage slot [`SESSION_STORAGE_KEY`] and is
//! written in the same call as the signal.
//!
//! A second signal, `ready`, records that rehydration has run. The
//! server-rendered pass cannot see browser storage, so the guard must not act
//! until the client has rehydrated.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use futures::future::{Either, select};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::net::api::AuthApi;
use crate::net::error::ApiError;
use crate::net::types::Credentials;
use crate::util::storage::{BrowserStorage, SessionStorage};

/// Storage slot holding the JSON-encoded identity.
pub const SESSION_STORAGE_KEY: &str = "userInfo";

/// Longest wait for `/logout` before local state is cleared regardless.
pub const LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistedSessionError {
    #[error("corrupt persisted session: {0}")]
    Corrupt(String),
}

/// The user record returned by the service, kept opaque apart from `id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Map<String, Value>);

impl Identity {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a persisted identity. Anything other than a JSON object is corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`PersistedSessionError::Corrupt`] for invalid JSON or a non-object value.
    pub fn from_json(raw: &str) -> Result<Self, PersistedSessionError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(other) => Err(PersistedSessionError::Corrupt(format!("expected object, got {}", kind_of(&other)))),
            Err(e) => Err(PersistedSessionError::Corrupt(e.to_string())),
        }
    }

    /// Serialized form written to storage.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// The `id` field as a string; numeric ids are stringified.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The client's belief about who is logged in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

/// Read the persisted session from `storage`, discarding a corrupt slot.
pub fn restore_session(storage: &dyn SessionStorage) -> Session {
    let Some(raw) = storage.read(SESSION_STORAGE_KEY) else {
        return Session::Anonymous;
    };
    match Identity::from_json(&raw) {
        Ok(identity) => Session::Authenticated(identity),
        Err(err) => {
            leptos::logging::warn!("{err}; clearing {SESSION_STORAGE_KEY}");
            storage.remove(SESSION_STORAGE_KEY);
            Session::Anonymous
        }
    }
}

/// Resolves after [`LOGOUT_TIMEOUT`] in the browser; never resolves elsewhere.
async fn logout_timer() {
    #[cfg(all(feature = "hydrate", target_arch = "wasm32"))]
    gloo_timers::future::sleep(LOGOUT_TIMEOUT).await;
    #[cfg(not(all(feature = "hydrate", target_arch = "wasm32")))]
    futures::future::pending::<()>().await;
}

/// Shared handle to the session. `Copy`, so closures and tasks capture it freely.
#[derive(Clone, Copy)]
pub struct SessionStore {
    session: RwSignal<Session>,
    ready: RwSignal<bool>,
    storage: StoredValue<Arc<dyn SessionStorage>>,
}

impl SessionStore {
    /// A store over `storage`, not yet rehydrated.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { session: RwSignal::new(Session::Anonymous), ready: RwSignal::new(false), storage: StoredValue::new(storage) }
    }

    /// A store backed by `localStorage`.
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    /// Current session (tracked).
    pub fn current(&self) -> Session {
        self.session.get()
    }

    /// Current session without subscribing.
    pub fn current_untracked(&self) -> Session {
        self.session.get_untracked()
    }

    /// Current identity, if authenticated (tracked).
    pub fn identity(&self) -> Option<Identity> {
        self.session.with(|s| s.identity().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    /// Whether rehydration has run (tracked).
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Evaluate a routing policy against the current state (tracked on both signals).
    pub fn decide<T>(&self, policy: impl Fn(bool, &Session) -> T) -> T {
        let ready = self.ready.get();
        self.session.with(|session| policy(ready, session))
    }

    /// Load the persisted session. Runs once; later calls return the current session.
    pub fn rehydrate(&self) -> Session {
        if self.ready.get_untracked() {
            return self.session.get_untracked();
        }
        let session = self.storage.with_value(|storage| restore_session(storage.as_ref()));
        self.session.set(session.clone());
        self.ready.set(true);
        session
    }

    /// Log in with `credentials`. On success the identity is stored in memory
    /// and in storage; on any error the session is left as it was.
    ///
    /// # Errors
    ///
    /// [`ApiError::AuthenticationFailed`] when the service rejects the
    /// credentials, [`ApiError::NetworkFailure`] when it is unreachable, and
    /// [`ApiError::InvalidResponse`] when a success body has no user record.
    pub async fn establish_session<A>(&self, api: &A, credentials: &Credentials) -> Result<Identity, ApiError>
    where
        A: AuthApi + ?Sized,
    {
        let identity = api.login(credentials).await?;
        self.storage.with_value(|storage| storage.write(SESSION_STORAGE_KEY, &identity.to_json()));
        self.session.set(Session::Authenticated(identity.clone()));
        self.ready.set(true);
        leptos::logging::log!("session established for {}", identity.id().unwrap_or_default());
        Ok(identity)
    }

    /// Log out. The service call is best-effort; local state is always cleared.
    /// Navigation to `/login` is left to the caller (see `util::auth::logout_and_redirect`).
    pub async fn terminate_session<A>(&self, api: &A)
    where
        A: AuthApi + ?Sized,
    {
        self.terminate_session_within(api, logout_timer()).await;
    }

    /// [`Self::terminate_session`], giving up on the service call once `timer` resolves.
    pub async fn terminate_session_within<A, T>(&self, api: &A, timer: T)
    where
        A: AuthApi + ?Sized,
        T: Future<Output = ()>,
    {
        let logout = std::pin::pin!(api.logout());
        let timer = std::pin::pin!(timer);
        let outcome = match select(logout, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ApiError::NetworkFailure("logout timed out".to_owned())),
        };
        if let Err(err) = outcome {
            leptos::logging::warn!("logout request failed, clearing local session anyway: {err}");
        }
        self.storage.with_value(|storage| storage.remove(SESSION_STORAGE_KEY));
        self.session.set(Session::Anonymous);
        self.ready.set(true);
    }
}
