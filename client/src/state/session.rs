//! Auth session backed by persisted storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the API client on every request (bearer token) and by the route
//! guard on every navigation. Written only by login and logout.
//!
//! TRADE-OFFS
//! ==========
//! `set_auth_data` is two sequential writes, not a transaction. A crash in
//! between can leave a token without a user; readers treat each key
//! independently. Nothing here expires or refreshes tokens, and a server-side
//! 401 does not clear storage.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;
use crate::state::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::util::guard::LOGIN_PATH;
use crate::util::navigate::Navigator;

/// Point-in-time view of the persisted session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Login-state queries and mutations over a [`SessionStorage`].
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True iff a non-empty token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// The stored bearer token. An empty stored value reads as absent.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// The stored user, or `None` when missing or not valid JSON.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::debug!("ignoring malformed session user: {e}");
                None
            }
        }
    }

    pub fn snapshot(&self) -> Session {
        Session { token: self.token(), user: self.current_user() }
    }

    /// Persist token then user.
    pub fn set_auth_data(&self, token: &str, user: &User) {
        self.storage.set(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(USER_KEY, &raw),
            Err(e) => log::warn!("failed to encode session user: {e}"),
        }
    }

    /// Forget the session without navigating.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Clear the session and send the user to the login view.
    pub fn logout(&self, navigator: &impl Navigator) {
        self.clear();
        navigator.navigate(LOGIN_PATH);
    }
}
