//! Error types for REST API calls

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::error::{ErrorCategory, UstazErrorTrait};

/// Errors returned by [`ApiClient`](super::ApiClient) and the domain services
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// 401: the session token is missing, expired or revoked
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// 403
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// 404
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 422 with per-field messages
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: HashMap<String, Vec<String>>,
    },

    /// 429
    #[error("Too many requests")]
    RateLimited,

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status
    #[error("Unexpected status ({status}): {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error body the API sends alongside non-2xx statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

impl ApiError {
    /// Build an error from a non-2xx status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_default();

        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            422 => Self::Validation {
                message,
                errors: parsed.errors,
            },
            429 => Self::RateLimited,
            500..=599 => Self::Server { status, message },
            _ => Self::Status { status, message },
        }
    }

    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::RateLimited => Some(429),
            Self::Server { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Message supplied by the server, if it sent a non-empty one
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Status { message, .. } => message.as_str(),
            _ => return None,
        };
        (!message.is_empty()).then_some(message)
    }
}

impl UstazErrorTrait for ApiError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited | Self::Server { .. } => true,
            Self::Unauthorized { .. }
            | Self::Forbidden { .. }
            | Self::NotFound { .. }
            | Self::Validation { .. }
            | Self::Status { .. }
            | Self::Decode(_)
            | Self::InvalidUrl(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Network(_) => crate::i18n::t!("errors.api.network").to_string(),
            Self::Unauthorized { .. } => crate::i18n::t!("errors.api.unauthorized").to_string(),
            Self::Forbidden { .. } => crate::i18n::t!("errors.api.forbidden").to_string(),
            Self::NotFound { .. } => crate::i18n::t!("errors.api.not_found").to_string(),
            Self::Validation { .. } => crate::i18n::t!("errors.api.validation").to_string(),
            Self::RateLimited => crate::i18n::t!("errors.api.rate_limited").to_string(),
            Self::Server { status, .. } => {
                crate::i18n::t!("errors.api.server", status = status).to_string()
            }
            Self::Status { status, .. } => {
                crate::i18n::t!("errors.api.status", status = status).to_string()
            }
            Self::Decode(msg) => format!("{}: {msg}", crate::i18n::t!("errors.api.decode")),
            Self::InvalidUrl(url) => format!("{}: {url}", crate::i18n::t!("errors.api.invalid_url")),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } => ErrorCategory::Session,
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}
