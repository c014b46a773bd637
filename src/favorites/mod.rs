use crate::storage::{favorites_key, Persistence, StorageScope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-user `country name -> favorited` map.
///
/// Entries flip on toggle and are never pruned, so a `false` entry and a
/// missing one are equivalent; equality compares favorited names only.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct Favorites {
    entries: BTreeMap<String, bool>,
}

impl PartialEq for Favorites {
    fn eq(&self, other: &Self) -> bool {
        self.names().eq(other.names())
    }
}

impl Favorites {
    /// An unknown user, or a missing/unreadable blob, starts empty.
    pub fn load(store: &Persistence, username: &str) -> Self {
        store
            .load_json(StorageScope::Durable, &favorites_key(username))
            .unwrap_or_default()
    }

    pub fn save(&self, store: &Persistence, username: &str) {
        store.write_json(StorageScope::Durable, &favorites_key(username), self);
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(false)
    }

    /// Flips `name` in memory and returns its new state.
    pub fn flip(&mut self, name: &str) -> bool {
        let entry = self.entries.entry(name.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Flips `name` and persists the whole map for `username`.
    pub fn toggle(&mut self, store: &Persistence, username: &str, name: &str) -> bool {
        let now = self.flip(name);
        self.save(store, username);
        now
    }

    /// Favorited names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn count(&self) -> usize {
        self.names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
