//! Account types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of account roles
///
/// Role-dependent behaviour (home routes, guards) matches on this enum, so a
/// new role is a compile-time change everywhere it matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Parent,
    Teacher,
}

impl UserRole {
    /// Landing route after login, or when a signed-in user opens a guest page
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Teacher => "/dashboard/teacher",
            Self::Parent => "/dashboard/parent",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Parent => "parent",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub email_verified_at: Option<String>,
    pub phone_verified_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
