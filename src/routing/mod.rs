use crate::storage::{Persistence, StorageScope, CURRENT_VIEW_KEY};

pub(crate) const SIGNIN_PATH: &str = "/signin";
pub(crate) const SIGNUP_PATH: &str = "/signup";
pub(crate) const COUNTRIES_PATH: &str = "/countries";
pub(crate) const NOTES_PATH: &str = "/my-notes";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// `/` renders the sign-in form.
    Root,
    SignIn,
    SignUp,
    Countries,
    Country(String),
    Notes,
}

impl AppRoute {
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Self::Root),
            SIGNIN_PATH => Some(Self::SignIn),
            SIGNUP_PATH => Some(Self::SignUp),
            COUNTRIES_PATH => Some(Self::Countries),
            NOTES_PATH => Some(Self::Notes),
            _ => {
                let name = path.strip_prefix("/country/")?;
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                let name = urlencoding::decode(name).ok()?;
                Some(Self::Country(name.into_owned()))
            }
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Countries | Self::Country(_) | Self::Notes)
    }
}

/// Replays the last visited route once per application load.
#[derive(Clone, Debug, Default)]
pub struct ViewRestorer {
    checked: bool,
}

impl ViewRestorer {
    /// Call on every route change.
    ///
    /// The first call returns the stored route when it differs from
    /// `current`; the caller navigates there, replacing history. Protected
    /// routes are not replayed for a signed-out visitor. Every other call
    /// records `current`.
    pub fn on_route_change(
        &mut self,
        store: &Persistence,
        current: &str,
        authenticated: bool,
    ) -> Option<String> {
        if !self.checked {
            self.checked = true;
            let saved = store
                .get(StorageScope::Session, CURRENT_VIEW_KEY)
                .filter(|v| v.starts_with('/') && v != current)
                .filter(|v| {
                    AppRoute::parse(v).is_some_and(|r| authenticated || !r.requires_auth())
                });
            if saved.is_some() {
                return saved;
            }
        }

        store.write(StorageScope::Session, CURRENT_VIEW_KEY, current);
        None
    }
}
