//! Session store
//!
//! Holds the bearer token and the display info of the signed-in
//! administrator. The token is mirrored into durable storage under
//! [`TOKEN_STORAGE_KEY`] on every change, so a restarted process comes back
//! authenticated. Nothing here checks a restored token against the backend;
//! the first call that gets a 401 tells.
//!
//! The store is shared as `Arc<SessionStore>`: the authenticated client reads
//! the token before each request, login and logout write it. Locks are never
//! held across an await.

use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{LoginRequest, LoginResponse, UserInfo};
use cockpit_core::{CoreResult, KeyValueStorage};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Durable storage key of the session token
pub const TOKEN_STORAGE_KEY: &str = "admin_token";

const DEFAULT_DISPLAY_NAME: &str = "Admin";

/// Display info of the current administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub avatar: String,
}

impl UserProfile {
    fn cleared() -> Self {
        Self {
            display_name: String::new(),
            avatar: String::new(),
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            avatar: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token
    Anonymous,
    /// A token is held, valid or not
    Authenticated,
}

/// Point-in-time copy of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Empty exactly when logged out
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn state(&self) -> SessionState {
        if self.token.is_empty() {
            SessionState::Anonymous
        } else {
            SessionState::Authenticated
        }
    }
}

/// Process-wide session state over durable storage
pub struct SessionStore {
    session: RwLock<Session>,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restore the session from durable storage
    ///
    /// Authenticated when a non-empty token is stored, anonymous otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> CoreResult<Self> {
        let token = storage.get_item(TOKEN_STORAGE_KEY)?.unwrap_or_default();
        let session = Session {
            token,
            user: UserProfile::default(),
        };
        debug!(state = ?session.state(), "Session restored");

        Ok(Self {
            session: RwLock::new(session),
            storage,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current token, `None` while anonymous
    pub fn token(&self) -> Option<String> {
        let session = self.read();
        (!session.token.is_empty()).then(|| session.token.clone())
    }

    pub fn user(&self) -> UserProfile {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn state(&self) -> SessionState {
        self.read().state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Log in through `client` and keep the returned token
    ///
    /// `client` should read its token from this store. A rejected login
    /// leaves the session untouched.
    ///
    /// # Errors
    ///
    /// The client's error when the backend refuses, or
    /// [`ClientError::Storage`] when the token cannot be persisted
    pub async fn login(
        &self,
        client: &AuthenticatedClient,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = client.auth().login(&request).await?;

        self.storage.set_item(TOKEN_STORAGE_KEY, &response.token)?;
        {
            let mut session = self.write();
            session.token.clone_from(&response.token);
            session.user.display_name = response
                .username
                .clone()
                .unwrap_or_else(|| username.to_string());
        }

        info!(username, "Logged in");
        Ok(response)
    }

    /// Fetch the administrator's info and keep it as display info
    ///
    /// # Errors
    ///
    /// The client's error when the call fails; the session is unchanged then
    pub async fn refresh_user(&self, client: &AuthenticatedClient) -> Result<UserInfo, ClientError> {
        let info = client.auth().get_info().await?;
        self.write().user = UserProfile {
            display_name: info.username.clone(),
            avatar: info.avatar.clone().unwrap_or_default(),
        };
        Ok(info)
    }

    /// Forget the token and display info, here and in durable storage
    ///
    /// Never fails and is safe to repeat; a storage failure is logged.
    pub fn logout(&self) {
        {
            let mut session = self.write();
            session.token.clear();
            session.user = UserProfile::cleared();
        }

        if let Err(e) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            warn!(error = %e, "Failed to remove stored session token");
        }
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cockpit_core::{CoreError, MemoryStorage};

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> CoreResult<Option<String>> {
            Ok(Some("stale".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> CoreResult<()> {
            Err(CoreError::io_error("read-only"))
        }

        fn remove_item(&self, _key: &str) -> CoreResult<()> {
            Err(CoreError::io_error("read-only"))
        }
    }

    #[test]
    fn test_empty_storage_is_anonymous() {
        let store = SessionStore::load(Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(store.token(), None);
        assert_eq!(store.user().display_name, "Admin");
    }

    #[test]
    fn test_stored_token_is_authenticated() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_STORAGE_KEY, "tok123").unwrap();

        let store = SessionStore::load(storage).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok123"));
    }

    #[test]
    fn test_stored_empty_token_is_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_STORAGE_KEY, "").unwrap();
        let store = SessionStore::load(storage).unwrap();
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_logout_twice() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_STORAGE_KEY, "tok123").unwrap();
        let store = SessionStore::load(storage.clone()).unwrap();

        store.logout();
        store.logout();

        let session = store.snapshot();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.user, UserProfile::cleared());
        assert_eq!(storage.get_item(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_swallows_storage_failure() {
        let store = SessionStore::load(Arc::new(BrokenStorage)).unwrap();
        assert!(store.is_authenticated());
        store.logout();
        assert!(!store.is_authenticated());
    }
}
