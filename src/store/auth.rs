//! Authentication state
//!
//! The session itself lives in [`SessionStore`]; this container adds the
//! request status (`is_loading`, `error`) around login, registration and
//! profile refresh.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::failure_message;
use crate::api::{ApiError, AuthSession, SessionStore};
use crate::models::{User, UserRole};
use crate::services::{AuthService, LoginPayload, RegisterPayload};

#[derive(Debug, Clone, Default, PartialEq)]
struct AuthStatus {
    is_loading: bool,
    error: Option<String>,
}

pub struct AuthStore {
    service: AuthService,
    session: Arc<SessionStore>,
    status: RwLock<AuthStatus>,
}

impl AuthStore {
    pub fn new(service: AuthService, session: Arc<SessionStore>) -> Self {
        Self {
            service,
            session,
            status: RwLock::new(AuthStatus::default()),
        }
    }

    /// Log in and return the role's landing path
    pub async fn login(&self, email: &str, password: &str) -> Result<&'static str, ApiError> {
        self.begin().await;

        let payload = LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.service.login(&payload).await {
            Ok(data) => {
                let home = data.user.role.home_path();
                self.session
                    .establish(AuthSession::new(data.user, data.token))
                    .await;
                self.finish(None).await;
                Ok(home)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                let message = failure_message(&e, || crate::i18n::t!("auth.login_failed").to_string());
                self.finish(Some(message)).await;
                Err(e)
            }
        }
    }

    /// Create an account and start a session for it
    pub async fn register(&self, payload: &RegisterPayload) -> Result<(), ApiError> {
        self.begin().await;

        match self.service.register(payload).await {
            Ok(data) => {
                self.session
                    .establish(AuthSession::new(data.user, data.token))
                    .await;
                self.finish(None).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                let message =
                    failure_message(&e, || crate::i18n::t!("auth.register_failed").to_string());
                self.finish(Some(message)).await;
                Err(e)
            }
        }
    }

    /// Refresh the user behind the stored token
    ///
    /// Without a token this does nothing. Any failure ends the session.
    /// Returns whether a fresh profile was stored.
    pub async fn load_profile(&self) -> bool {
        if self.session.token().await.is_none() {
            return false;
        }

        match self.service.profile().await {
            Ok(user) => self.session.update_user(user).await,
            Err(e) => {
                tracing::warn!(error = %e, "Profile refresh failed, logging out");
                self.logout().await;
                false
            }
        }
    }

    /// End the session locally
    pub async fn logout(&self) {
        self.session.clear().await;
        self.status.write().await.error = None;
    }

    pub async fn clear_error(&self) {
        self.status.write().await.error = None;
    }

    pub async fn has_role(&self, role: UserRole) -> bool {
        self.session
            .snapshot()
            .await
            .is_some_and(|session| session.role() == role)
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn session(&self) -> Option<AuthSession> {
        self.session.snapshot().await
    }

    pub async fn user(&self) -> Option<User> {
        self.session.user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    pub async fn is_loading(&self) -> bool {
        self.status.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.status.read().await.error.clone()
    }

    async fn begin(&self) {
        let mut status = self.status.write().await;
        status.is_loading = true;
        status.error = None;
    }

    async fn finish(&self, error: Option<String>) {
        let mut status = self.status.write().await;
        status.is_loading = false;
        status.error = error;
    }
}
