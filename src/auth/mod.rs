use crate::models::{SessionRecord, User};
use crate::storage::{Persistence, StorageScope, USERS_KEY, USER_KEY, USER_SESSION_KEY};
use crate::util::session_token;
use leptos::logging::log;

/// Client-side credential registry plus the signed-in user.
///
/// Credentials are compared as plain strings; this is a simulated login for
/// a public dataset, not an authentication system.
#[derive(Clone)]
pub struct AuthDirectory {
    store: Persistence,
    users: Vec<User>,
    current: Option<User>,
}

impl AuthDirectory {
    /// Loads registered users and the persisted session.
    ///
    /// A stored session whose credentials are no longer in the directory is dropped.
    pub fn restore(store: Persistence) -> Self {
        let users: Vec<User> = store.load_json_list(StorageScope::Durable, USERS_KEY);

        let current = store
            .load_json::<User>(StorageScope::Durable, USER_KEY)
            .filter(|u| users.contains(u));

        let directory = Self {
            store,
            users,
            current,
        };
        if directory.current.is_none() {
            directory.clear_session();
        }
        directory
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|u| u.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    /// Registers a new user. Returns `false` if the username is taken.
    pub fn signup(&mut self, username: &str, password: &str) -> bool {
        if self.user_exists(username) {
            log!("signup rejected: username `{username}` already exists");
            return false;
        }

        self.users.push(User {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.store
            .write_json(StorageScope::Durable, USERS_KEY, &self.users);
        log!("signed up `{username}`");
        true
    }

    /// Signs in on an exact username/password match.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let Some(user) = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
        else {
            log!("login failed for `{username}`");
            return false;
        };

        self.store.write_json(StorageScope::Durable, USER_KEY, &user);
        self.store.write_json(
            StorageScope::Session,
            USER_SESSION_KEY,
            &SessionRecord {
                username: user.username.clone(),
                token: session_token(),
            },
        );
        log!("logged in as `{username}`");
        self.current = Some(user);
        true
    }

    /// Ends the session. The user record stays registered.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            log!("logged out `{}`", user.username);
        }
        self.clear_session();
    }

    fn clear_session(&self) {
        self.store.forget(StorageScope::Durable, USER_KEY);
        self.store.forget(StorageScope::Session, USER_SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rejects_duplicate_username() {
        let mut auth = AuthDirectory::restore(Persistence::in_memory());
        assert!(auth.signup("alice", "pw1"));
        assert!(!auth.signup("alice", "pw2"));
        assert!(auth.login("alice", "pw1"));
        assert!(!auth.login("alice", "pw2"));
    }

    #[test]
    fn test_login_requires_exact_pair() {
        let mut auth = AuthDirectory::restore(Persistence::in_memory());
        auth.signup("alice", "pw1");

        assert!(!auth.login("alice", "wrong"));
        assert!(!auth.login("Alice", "pw1"));
        assert!(!auth.login("bob", "pw1"));
        assert!(!auth.is_authenticated());

        assert!(auth.login("alice", "pw1"));
        assert_eq!(auth.username(), Some("alice"));
    }

    #[test]
    fn test_signup_does_not_sign_in() {
        let mut auth = AuthDirectory::restore(Persistence::in_memory());
        auth.signup("alice", "pw1");
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_session_is_persisted_and_restored() {
        let store = Persistence::in_memory();
        let mut auth = AuthDirectory::restore(store.clone());
        auth.signup("alice", "pw1");
        auth.login("alice", "pw1");

        let session: SessionRecord = store
            .load_json(StorageScope::Session, USER_SESSION_KEY)
            .expect("session mirror should be written");
        assert_eq!(session.username, "alice");
        assert!(!session.token.is_empty());

        let restored = AuthDirectory::restore(store);
        assert_eq!(restored.username(), Some("alice"));
        assert!(restored.user_exists("alice"));
    }

    #[test]
    fn test_logout_keeps_user_record() {
        let store = Persistence::in_memory();
        let mut auth = AuthDirectory::restore(store.clone());
        auth.signup("alice", "pw1");
        auth.login("alice", "pw1");
        auth.logout();

        assert!(!auth.is_authenticated());
        assert!(store.get(StorageScope::Durable, USER_KEY).is_none());
        assert!(store.get(StorageScope::Session, USER_SESSION_KEY).is_none());

        let mut restored = AuthDirectory::restore(store);
        assert!(!restored.is_authenticated());
        assert!(restored.login("alice", "pw1"));
    }

    #[test]
    fn test_stale_session_is_discarded() {
        let store = Persistence::in_memory();
        store.write(
            StorageScope::Durable,
            USER_KEY,
            r#"{"username":"ghost","password":"x"}"#,
        );

        let auth = AuthDirectory::restore(store.clone());
        assert!(!auth.is_authenticated());
        assert!(store.get(StorageScope::Durable, USER_KEY).is_none());
    }

    #[test]
    fn test_unreadable_user_record_keeps_the_others() {
        let store = Persistence::in_memory();
        store.write(
            StorageScope::Durable,
            USERS_KEY,
            r#"[{"username":"alice","password":"pw1"},{"username":"broken"}]"#,
        );

        let mut auth = AuthDirectory::restore(store.clone());
        assert!(auth.user_exists("alice"));
        assert!(!auth.user_exists("broken"));

        assert!(auth.signup("bob", "pw2"));
        let mut restored = AuthDirectory::restore(store);
        assert!(restored.login("alice", "pw1"));
        assert!(restored.user_exists("bob"));
    }

    #[test]
    fn test_users_blob_matches_stored_format() {
        let store = Persistence::in_memory();
        let mut auth = AuthDirectory::restore(store.clone());
        auth.signup("alice", "pw1");
        assert_eq!(
            store.get(StorageScope::Durable, USERS_KEY).as_deref(),
            Some(r#"[{"username":"alice","password":"pw1"}]"#)
        );
    }
}
