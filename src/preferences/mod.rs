use crate::models::Theme;
use crate::storage::{Persistence, StorageScope, DARK_MODE_KEY, LAST_SEARCH_KEY, THEME_KEY};
use std::str::FromStr;

/// Appearance settings and the last opened country, kept for the tab session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub theme: Theme,
    pub last_search: Option<String>,
}

impl Preferences {
    pub fn load(store: &Persistence) -> Self {
        Self {
            dark_mode: store
                .load_json::<bool>(StorageScope::Session, DARK_MODE_KEY)
                .unwrap_or(false),
            theme: store
                .get(StorageScope::Session, THEME_KEY)
                .and_then(|t| Theme::from_str(&t).ok())
                .unwrap_or_default(),
            last_search: store
                .get(StorageScope::Session, LAST_SEARCH_KEY)
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn toggle_dark_mode(&mut self, store: &Persistence) {
        self.dark_mode = !self.dark_mode;
        store.write_json(StorageScope::Session, DARK_MODE_KEY, &self.dark_mode);
    }

    pub fn set_theme(&mut self, store: &Persistence, theme: Theme) {
        self.theme = theme;
        store.write(StorageScope::Session, THEME_KEY, theme.as_ref());
    }

    pub fn set_last_search(&mut self, store: &Persistence, name: &str) {
        self.last_search = Some(name.to_string());
        store.write(StorageScope::Session, LAST_SEARCH_KEY, name);
    }

    pub fn page_background(&self) -> &'static str {
        self.theme.page_background(self.dark_mode)
    }

    pub fn accent(&self) -> &'static str {
        self.theme.accent()
    }

    /// Classes for the round header buttons (theme, dark mode, logout).
    pub fn control_class(&self) -> String {
        if self.dark_mode {
            "text-white bg-gray-700 hover:bg-gray-600".to_string()
        } else {
            let accent = self.accent();
            format!("text-{accent}-800 bg-{accent}-100 hover:bg-{accent}-200")
        }
    }

    pub fn text_class(&self) -> &'static str {
        if self.dark_mode {
            "text-white"
        } else {
            "text-gray-800"
        }
    }
}
