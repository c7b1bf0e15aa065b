//! Account endpoints (`/v1/auth/...`)

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{ApiResponse, User, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Roles a user can pick when signing up; admins are provisioned separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupRole {
    Parent,
    Teacher,
}

impl From<SignupRole> for UserRole {
    fn from(role: SignupRole) -> Self {
        match role {
            SignupRole::Parent => UserRole::Parent,
            SignupRole::Teacher => UserRole::Teacher,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub password_confirmation: String,
    pub role: SignupRole,
}

/// User and token handed back by login and registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordPayload {
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordPayload {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Editable profile fields; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthData, ApiError> {
        let response: ApiResponse<AuthData> = self.api.post("/v1/auth/login", payload).await?;
        Ok(response.data)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthData, ApiError> {
        let response: ApiResponse<AuthData> = self.api.post("/v1/auth/register", payload).await?;
        Ok(response.data)
    }

    /// Current user for the session token
    pub async fn profile(&self) -> Result<User, ApiError> {
        let response: ApiResponse<User> = self.api.get("/v1/auth/me").await?;
        Ok(response.data)
    }

    /// Revoke the token server-side
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api
            .post_unit("/v1/auth/logout", &serde_json::json!({}))
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .post_unit(
                "/v1/auth/forgot-password",
                &serde_json::json!({ "email": email }),
            )
            .await
    }

    pub async fn reset_password(&self, payload: &ResetPasswordPayload) -> Result<(), ApiError> {
        self.api.post_unit("/v1/auth/reset-password", payload).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let response: ApiResponse<User> = self.api.put("/v1/auth/profile", update).await?;
        Ok(response.data)
    }

    pub async fn change_password(&self, payload: &ChangePasswordPayload) -> Result<(), ApiError> {
        self.api.post_unit("/v1/auth/change-password", payload).await
    }
}
