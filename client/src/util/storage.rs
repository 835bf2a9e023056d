//! Durable key/value slots backing the persisted session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store never touches `web-sys` directly; it talks to a
//! [`SessionStorage`]. In the browser that is `localStorage`; during server
//! rendering the same type is inert. Tests use the in-memory `MemoryStorage`.
//!
//! TRADE-OFFS
//! ==========
//! Browser writes are best-effort (quota and privacy-mode failures are logged,
//! not propagated). The in-memory session stays authoritative for the running
//! page; only the next reload would miss the write.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// A string slot store keyed by name.
pub trait SessionStorage: Send + Sync {
    /// Current value of `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Replace the value of `key`.
    fn write(&self, key: &str, value: &str);
    /// Remove `key`; a missing key is not an error.
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Outside the browser every read misses and writes no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

/// Log a failed `localStorage` call. Returns whether the call succeeded.
#[cfg(any(feature = "hydrate", test))]
fn report_failure<E: std::fmt::Debug>(op: &str, key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            leptos::logging::warn!("localStorage {op} failed for {key}: {err:?}");
            false
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("localStorage unavailable; {key} not persisted");
                return;
            };
            report_failure("write", key, storage.set_item(key, value));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("localStorage unavailable; {key} not removed");
                return;
            };
            report_failure("remove", key, storage.remove_item(key));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local storage for tests. Clones share the same slots.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one slot.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.write(key, value);
        storage
    }
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(key);
        }
    }
}
