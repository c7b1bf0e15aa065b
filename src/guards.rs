//! Route access decisions
//!
//! Guards are pure functions of the current session and the requested path,
//! so hosts can evaluate them before rendering anything.

use crate::api::AuthSession;
use crate::models::UserRole;

/// Login route
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing route for signed-in users with the wrong role
pub const ROOT_PATH: &str = "/";

/// Result of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect {
        to: String,
        /// Where to return after logging in
        return_url: Option<String>,
    },
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Full redirect target, with `returnUrl` appended when present
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Granted => None,
            Self::Redirect {
                to,
                return_url: None,
            } => Some(to.clone()),
            Self::Redirect {
                to,
                return_url: Some(back),
            } => {
                let encoded: String = url::form_urlencoded::byte_serialize(back.as_bytes()).collect();
                Some(format!("{to}?returnUrl={encoded}"))
            }
        }
    }

    fn to_login(path: &str) -> Self {
        Self::Redirect {
            to: LOGIN_PATH.to_string(),
            return_url: Some(path.to_string()),
        }
    }
}

/// Pages that require any signed-in user
pub fn auth_guard(session: Option<&AuthSession>, path: &str) -> Access {
    match session {
        Some(_) => Access::Granted,
        None => Access::to_login(path),
    }
}

/// Pages only for signed-out visitors (login, register)
pub fn guest_guard(session: Option<&AuthSession>) -> Access {
    match session {
        Some(session) => Access::Redirect {
            to: session.role().home_path().to_string(),
            return_url: None,
        },
        None => Access::Granted,
    }
}

/// Pages restricted to `roles`
pub fn role_guard(session: Option<&AuthSession>, path: &str, roles: &[UserRole]) -> Access {
    match session {
        None => Access::to_login(path),
        Some(session) if roles.contains(&session.role()) => Access::Granted,
        Some(session) => {
            tracing::debug!(role = %session.role(), path, "Role not allowed");
            Access::Redirect {
                to: ROOT_PATH.to_string(),
                return_url: None,
            }
        }
    }
}
