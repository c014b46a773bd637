use crate::favorites::Favorites;
use crate::models::Country;
use crate::storage::{
    Persistence, StorageScope, LANGUAGE_FILTER_KEY, REGION_FILTER_KEY, SEARCH_TERM_KEY,
    SHOW_FAVORITES_KEY,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inputs of the countries list, restored from and written back to session storage.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub show_favorites_only: bool,
}

impl FilterState {
    pub fn load(store: &Persistence) -> Self {
        let non_empty = |key: &str| {
            store
                .get(StorageScope::Session, key)
                .filter(|v| !v.is_empty())
        };

        Self {
            search_term: store
                .get(StorageScope::Session, SEARCH_TERM_KEY)
                .unwrap_or_default(),
            region: non_empty(REGION_FILTER_KEY),
            language: non_empty(LANGUAGE_FILTER_KEY),
            show_favorites_only: store
                .load_json::<bool>(StorageScope::Session, SHOW_FAVORITES_KEY)
                .unwrap_or(false),
        }
    }

    /// "No filter" is stored as an empty string.
    pub fn save(&self, store: &Persistence) {
        store.write(StorageScope::Session, SEARCH_TERM_KEY, &self.search_term);
        store.write(
            StorageScope::Session,
            REGION_FILTER_KEY,
            self.region.as_deref().unwrap_or_default(),
        );
        store.write(
            StorageScope::Session,
            LANGUAGE_FILTER_KEY,
            self.language.as_deref().unwrap_or_default(),
        );
        store.write_json(
            StorageScope::Session,
            SHOW_FAVORITES_KEY,
            &self.show_favorites_only,
        );
    }

    fn region_filter(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    fn language_filter(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || self.region_filter().is_some()
            || self.language_filter().is_some()
            || self.show_favorites_only
    }

    pub fn matches(&self, country: &Country, favorites: &Favorites) -> bool {
        if !self.search_term.is_empty()
            && !country
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
        {
            return false;
        }

        if let Some(region) = self.region_filter() {
            if country.region != region {
                return false;
            }
        }

        if let Some(language) = self.language_filter() {
            let needle = language.to_lowercase();
            if !country
                .language_names()
                .any(|l| l.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if self.show_favorites_only && !favorites.is_favorite(&country.name) {
            return false;
        }

        true
    }
}

/// Countries matching every active predicate, in catalog order.
pub fn filter_countries(
    catalog: &[Country],
    state: &FilterState,
    favorites: &Favorites,
) -> Vec<Country> {
    catalog
        .iter()
        .filter(|c| state.matches(c, favorites))
        .cloned()
        .collect()
}

/// Distinct non-empty regions, sorted.
pub fn regions(catalog: &[Country]) -> Vec<String> {
    catalog
        .iter()
        .map(|c| c.region.as_str())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct non-empty language names across the catalog, sorted.
pub fn languages(catalog: &[Country]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|c| c.language_names())
        .filter(|l| !l.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
