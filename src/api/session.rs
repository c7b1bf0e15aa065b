//! Authenticated session ownership
//!
//! [`SessionStore`] is the single owner of the [`AuthSession`]. The HTTP client
//! reads the token from it and clears it on `401` when the rejected token is
//! still current; the auth state container establishes and ends it. User,
//! token and the role flags derived from the user all live in one `Option`,
//! so clearing is atomic.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{User, UserRole};
use crate::storage::{persisted, KeyValueStore};

/// Storage key for the persisted session
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

/// Shape version of the persisted session
pub const SESSION_STATE_VERSION: u32 = 1;

/// Logged-in user together with their bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

impl AuthSession {
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    pub fn is_teacher(&self) -> bool {
        self.user.role == UserRole::Teacher
    }

    pub fn is_parent(&self) -> bool {
        self.user.role == UserRole::Parent
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == UserRole::Admin
    }
}

/// Owner of the current session, optionally mirrored to local storage
pub struct SessionStore {
    current: RwLock<Option<AuthSession>>,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl SessionStore {
    /// Session that lives only for the lifetime of the process
    pub fn in_memory() -> Self {
        Self {
            current: RwLock::new(None),
            storage: None,
        }
    }

    /// Session persisted under [`SESSION_STORAGE_KEY`], rehydrated immediately
    ///
    /// A persisted session written with another shape version is discarded.
    pub fn persistent(storage: Arc<dyn KeyValueStore>) -> Self {
        let restored: Option<AuthSession> =
            persisted::load(storage.as_ref(), SESSION_STORAGE_KEY, SESSION_STATE_VERSION);

        if let Some(session) = &restored {
            tracing::debug!(user_id = session.user.id, "Restored persisted session");
        }

        Self {
            current: RwLock::new(restored),
            storage: Some(storage),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn snapshot(&self) -> Option<AuthSession> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Replace the session after a successful login or registration
    pub async fn establish(&self, session: AuthSession) {
        let mut current = self.current.write().await;
        tracing::info!(user_id = session.user.id, role = %session.user.role, "Session established");
        *current = Some(session);
        self.persist(current.as_ref());
    }

    /// Refresh the user of an existing session, keeping its token
    ///
    /// Returns `false` when there is no session to update.
    pub async fn update_user(&self, user: User) -> bool {
        let mut current = self.current.write().await;
        match current.as_mut() {
            Some(session) => {
                session.user = user;
                self.persist(current.as_ref());
                true
            }
            None => false,
        }
    }

    /// Drop user, token and role flags together
    pub async fn clear(&self) {
        let mut current = self.current.write().await;
        if current.take().is_some() {
            tracing::info!("Session cleared");
        }
        self.persist(None);
    }

    /// Clear the session only while it still holds `token`
    ///
    /// Returns `true` when the session was cleared.
    pub async fn clear_if_token(&self, token: &str) -> bool {
        let mut current = self.current.write().await;
        if current.as_ref().map(|s| s.token.as_str()) != Some(token) {
            return false;
        }
        *current = None;
        tracing::info!("Session cleared");
        self.persist(None);
        true
    }

    fn persist(&self, session: Option<&AuthSession>) {
        let Some(storage) = &self.storage else {
            return;
        };

        let result = match session {
            Some(session) => persisted::save(
                storage.as_ref(),
                SESSION_STORAGE_KEY,
                SESSION_STATE_VERSION,
                session,
            ),
            None => storage.remove(SESSION_STORAGE_KEY),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn user(role: UserRole) -> User {
        User {
            id: 7,
            first_name: "Mona".to_string(),
            last_name: "Adel".to_string(),
            email: "mona@example.com".to_string(),
            role,
            is_active: true,
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_establish_and_clear() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated().await);

        store.establish(AuthSession::new(user(UserRole::Parent), "tok")).await;
        assert_eq!(store.token().await.as_deref(), Some("tok"));
        assert!(store.snapshot().await.unwrap().is_parent());

        store.clear().await;
        assert!(store.token().await.is_none());
        assert!(store.user().await.is_none());
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let first = SessionStore::persistent(storage.clone());
        first.establish(AuthSession::new(user(UserRole::Teacher), "abc")).await;

        let second = SessionStore::persistent(storage.clone());
        let restored = second.snapshot().await.expect("session restored");
        assert_eq!(restored.token, "abc");
        assert!(restored.is_teacher());

        second.clear().await;
        let third = SessionStore::persistent(storage);
        assert!(third.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_if_token_keeps_newer_session() {
        let store = SessionStore::in_memory();
        store.establish(AuthSession::new(user(UserRole::Parent), "old")).await;
        store.establish(AuthSession::new(user(UserRole::Parent), "new")).await;

        assert!(!store.clear_if_token("old").await);
        assert_eq!(store.token().await.as_deref(), Some("new"));

        assert!(store.clear_if_token("new").await);
        assert!(!store.is_authenticated().await);
        assert!(!store.clear_if_token("new").await);
    }

    #[tokio::test]
    async fn test_update_user_requires_session() {
        let store = SessionStore::in_memory();
        assert!(!store.update_user(user(UserRole::Admin)).await);

        store.establish(AuthSession::new(user(UserRole::Parent), "t")).await;
        assert!(store.update_user(user(UserRole::Admin)).await);
        let session = store.snapshot().await.unwrap();
        assert!(session.is_admin());
        assert_eq!(session.token, "t");
    }
}
