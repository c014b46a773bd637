use crate::api::CountriesClient;
use crate::auth::AuthDirectory;
use crate::favorites::Favorites;
use crate::models::{Country, Theme};
use crate::preferences::Preferences;
use crate::storage::Persistence;
use leptos::prelude::*;

/// Services and shared signals, provided once at the root.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub store: StoredValue<Persistence>,
    pub client: StoredValue<CountriesClient>,

    pub auth: RwSignal<AuthDirectory>,

    /// Favorites of the signed-in user; empty when signed out.
    pub favorites: RwSignal<Favorites>,

    pub preferences: RwSignal<Preferences>,

    /// Fetched once per application load.
    pub catalog: RwSignal<Vec<Country>>,
    pub catalog_loaded: RwSignal<bool>,
}

impl AppState {
    pub fn new(store: Persistence, client: CountriesClient) -> Self {
        let auth = AuthDirectory::restore(store.clone());
        let favorites = auth
            .username()
            .map(|u| Favorites::load(&store, u))
            .unwrap_or_default();
        let preferences = Preferences::load(&store);

        Self {
            store: StoredValue::new(store),
            client: StoredValue::new(client),
            auth: RwSignal::new(auth),
            favorites: RwSignal::new(favorites),
            preferences: RwSignal::new(preferences),
            catalog: RwSignal::new(vec![]),
            catalog_loaded: RwSignal::new(false),
        }
    }

    pub fn browser() -> Self {
        Self::new(Persistence::browser(), CountriesClient::from_env())
    }

    pub fn persistence(&self) -> Persistence {
        self.store.get_value()
    }

    pub fn api(&self) -> CountriesClient {
        self.client.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.with(|a| a.is_authenticated())
    }

    pub fn username(&self) -> Option<String> {
        self.auth.with(|a| a.username().map(str::to_string))
    }

    pub fn signup(&self, username: &str, password: &str) -> bool {
        self.auth
            .try_update(|a| a.signup(username, password))
            .unwrap_or(false)
    }

    /// On success the user's favorites are loaded.
    pub fn login(&self, username: &str, password: &str) -> bool {
        let ok = self
            .auth
            .try_update(|a| a.login(username, password))
            .unwrap_or(false);
        if ok {
            let favorites = Favorites::load(&self.persistence(), username);
            self.favorites.set(favorites);
        }
        ok
    }

    pub fn logout(&self) {
        self.auth.update(|a| a.logout());
        self.favorites.set(Favorites::default());
    }

    /// Returns the new state, or `None` when nobody is signed in.
    pub fn toggle_favorite(&self, country: &str) -> Option<bool> {
        let username = self.auth.with_untracked(|a| a.username().map(str::to_string))?;
        let store = self.persistence();
        self.favorites
            .try_update(|f| f.toggle(&store, &username, country))
    }

    pub fn toggle_dark_mode(&self) {
        let store = self.persistence();
        self.preferences.update(|p| p.toggle_dark_mode(&store));
    }

    pub fn set_theme(&self, theme: Theme) {
        let store = self.persistence();
        self.preferences.update(|p| p.set_theme(&store, theme));
    }

    pub fn set_last_search(&self, name: &str) {
        let store = self.persistence();
        self.preferences.update(|p| p.set_last_search(&store, name));
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageScope;

    fn state() -> AppState {
        AppState::new(Persistence::in_memory(), CountriesClient::default())
    }

    #[test]
    fn test_login_loads_user_favorites_and_logout_clears_them() {
        let app = state();
        assert!(app.signup("alice", "pw1"));
        assert!(app.login("alice", "pw1"));
        assert_eq!(app.toggle_favorite("Chile"), Some(true));
        assert!(app.favorites.with_untracked(|f| f.is_favorite("Chile")));

        app.logout();
        assert!(!app.is_authenticated());
        assert!(app.favorites.with_untracked(|f| f.is_empty()));

        assert!(app.login("alice", "pw1"));
        assert!(app.favorites.with_untracked(|f| f.is_favorite("Chile")));
    }

    #[test]
    fn test_toggle_favorite_requires_user() {
        let app = state();
        assert_eq!(app.toggle_favorite("Chile"), None);
        assert!(app.favorites.with_untracked(|f| f.is_empty()));
    }

    #[test]
    fn test_restores_session_and_favorites_on_start() {
        let store = Persistence::in_memory();
        {
            let app = AppState::new(store.clone(), CountriesClient::default());
            app.signup("bob", "secret");
            app.login("bob", "secret");
            app.toggle_favorite("Ghana");
            app.set_theme(Theme::Blue);
        }

        let app = AppState::new(store.clone(), CountriesClient::default());
        assert_eq!(app.username().as_deref(), Some("bob"));
        assert!(app.favorites.with_untracked(|f| f.is_favorite("Ghana")));
        assert_eq!(app.preferences.with_untracked(|p| p.theme), Theme::Blue);
        assert_eq!(store.get(StorageScope::Session, "theme").as_deref(), Some("blue"));
    }
}
