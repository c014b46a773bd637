use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// Durable (localStorage) keys.
pub(crate) const USER_KEY: &str = "user";
pub(crate) const USERS_KEY: &str = "users";

// Session (sessionStorage) keys.
pub(crate) const USER_SESSION_KEY: &str = "userSession";
pub(crate) const CURRENT_VIEW_KEY: &str = "currentView";
pub(crate) const SEARCH_TERM_KEY: &str = "countriesSearchTerm";
pub(crate) const REGION_FILTER_KEY: &str = "countriesRegionFilter";
pub(crate) const LANGUAGE_FILTER_KEY: &str = "countriesLanguageFilter";
pub(crate) const SHOW_FAVORITES_KEY: &str = "countriesShowFavorites";
pub(crate) const DARK_MODE_KEY: &str = "darkMode";
pub(crate) const THEME_KEY: &str = "theme";
pub(crate) const LAST_SEARCH_KEY: &str = "lastSearch";

pub(crate) fn favorites_key(username: &str) -> String {
    format!("favorites_{username}")
}

pub(crate) fn notes_key(username: &str) -> String {
    format!("notes_{username}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageScope {
    /// Cleared when the tab session ends.
    Session,
    /// Survives browser restarts.
    Durable,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0:?} storage is not available")]
    Unavailable(StorageScope),
    #[error("failed to write `{key}`")]
    Write { key: String },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed, string-valued store for one scope.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.sessionStorage` / `window.localStorage`.
///
/// The `web_sys::Storage` handle is looked up on every call; it is not
/// `Send`, and the lookup is cheap.
pub struct BrowserStore {
    scope: StorageScope,
}

impl BrowserStore {
    pub fn new(scope: StorageScope) -> Self {
        Self { scope }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.scope {
            StorageScope::Session => window.session_storage().ok().flatten(),
            StorageScope::Durable => window.local_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage().ok_or(StorageError::Unavailable(self.scope))?;
        storage.set_item(key, value).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = self.storage().ok_or(StorageError::Unavailable(self.scope))?;
        storage.remove_item(key).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Write {
            key: key.to_string(),
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Write {
            key: key.to_string(),
        })?;
        items.remove(key);
        Ok(())
    }
}

/// Both storage scopes behind one cloneable handle.
///
/// Every service that persists state receives one of these instead of
/// reaching for `web_sys::window()` itself.
#[derive(Clone)]
pub struct Persistence {
    session: Arc<dyn KeyValueStore>,
    durable: Arc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(session: Arc<dyn KeyValueStore>, durable: Arc<dyn KeyValueStore>) -> Self {
        Self { session, durable }
    }

    pub fn browser() -> Self {
        Self::new(
            Arc::new(BrowserStore::new(StorageScope::Session)),
            Arc::new(BrowserStore::new(StorageScope::Durable)),
        )
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()), Arc::new(MemoryStore::default()))
    }

    fn scope(&self, scope: StorageScope) -> &dyn KeyValueStore {
        match scope {
            StorageScope::Session => self.session.as_ref(),
            StorageScope::Durable => self.durable.as_ref(),
        }
    }

    pub fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        self.scope(scope).get(key)
    }

    pub fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<(), StorageError> {
        self.scope(scope).set(key, value)
    }

    pub fn remove(&self, scope: StorageScope, key: &str) -> Result<(), StorageError> {
        self.scope(scope).remove(key)
    }

    /// Missing keys and unparsable blobs both read as `None`.
    pub fn load_json<T: for<'de> Deserialize<'de>>(&self, scope: StorageScope, key: &str) -> Option<T> {
        let json = self.get(scope, key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("ignoring unreadable `{key}` in {scope:?} storage: {e}");
                None
            }
        }
    }

    /// Decodes a stored JSON array one record at a time.
    ///
    /// Unreadable records are skipped so the rest survive the next write.
    pub fn load_json_list<T: for<'de> Deserialize<'de>>(
        &self,
        scope: StorageScope,
        key: &str,
    ) -> Vec<T> {
        let Some(items) = self.load_json::<Vec<serde_json::Value>>(scope, key) else {
            return vec![];
        };
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("skipping unreadable record in `{key}`: {e}");
                    None
                }
            })
            .collect()
    }

    pub fn save_json<T: Serialize>(
        &self,
        scope: StorageScope,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(scope, key, &json)
    }

    /// Like `save_json`, but failures are logged instead of returned.
    ///
    /// The in-memory copy stays authoritative for the current page.
    pub fn write_json<T: Serialize>(&self, scope: StorageScope, key: &str, value: &T) {
        if let Err(e) = self.save_json(scope, key, value) {
            warn!("{e}");
        }
    }

    pub fn write(&self, scope: StorageScope, key: &str, value: &str) {
        if let Err(e) = self.set(scope, key, value) {
            warn!("{e}");
        }
    }

    pub fn forget(&self, scope: StorageScope, key: &str) {
        if let Err(e) = self.remove(scope, key) {
            warn!("{e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_scopes_are_independent() {
        let store = Persistence::in_memory();
        store.write(StorageScope::Session, "k", "session");
        store.write(StorageScope::Durable, "k", "durable");

        assert_eq!(store.get(StorageScope::Session, "k").as_deref(), Some("session"));
        assert_eq!(store.get(StorageScope::Durable, "k").as_deref(), Some("durable"));

        store.forget(StorageScope::Session, "k");
        assert!(store.get(StorageScope::Session, "k").is_none());
        assert_eq!(store.get(StorageScope::Durable, "k").as_deref(), Some("durable"));
    }

    #[test]
    fn test_json_helpers() {
        let store = Persistence::in_memory();
        let value = Sample {
            name: "France".to_string(),
            count: 3,
        };
        store.write_json(StorageScope::Durable, "sample", &value);

        let loaded: Sample = store
            .load_json(StorageScope::Durable, "sample")
            .expect("should load sample");
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_unreadable_json_loads_as_none() {
        let store = Persistence::in_memory();
        store.write(StorageScope::Durable, "sample", "{not json");
        assert!(store.load_json::<Sample>(StorageScope::Durable, "sample").is_none());
        assert!(store.load_json::<Sample>(StorageScope::Durable, "missing").is_none());
    }

    #[test]
    fn test_list_skips_unreadable_records() {
        let store = Persistence::in_memory();
        store.write(
            StorageScope::Durable,
            "samples",
            r#"[{"name":"a","count":1},{"name":"b"},{"name":"c","count":3}]"#,
        );
        let samples: Vec<Sample> = store.load_json_list(StorageScope::Durable, "samples");
        assert_eq!(
            samples.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );

        store.write(StorageScope::Durable, "samples", "{not json");
        assert!(store
            .load_json_list::<Sample>(StorageScope::Durable, "samples")
            .is_empty());
    }

    #[test]
    fn test_per_user_keys() {
        assert_eq!(favorites_key("alice"), "favorites_alice");
        assert_eq!(notes_key("alice"), "notes_alice");
    }
}
