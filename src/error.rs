//! Unified error handling for the ustaz crate
//!
//! Each layer owns a domain error ([`ApiError`], [`GeoError`], [`StorageError`],
//! [`MapError`]). The [`Error`] enum wraps them for code that crosses layer
//! boundaries, such as the CLI and [`AppContext`](crate::context::AppContext).
//!
//! # Architecture
//!
//! - [`UstazErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use ustaz::error::{Error, UstazErrorTrait};
//!
//! fn report(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("{} (retry later)", err.localized_desc());
//!     } else {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::api::ApiError;
pub use crate::geo::GeoError;
pub use crate::map::MapError;
pub use crate::storage::StorageError;

/// Common trait for all ustaz error types
pub trait UstazErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures and non-2xx responses
    Network,
    /// Missing or rejected bearer token
    Session,
    /// Response bodies that do not match the expected shape
    Parsing,
    /// Position acquisition failures
    Geolocation,
    /// Persistence and I/O errors
    Storage,
    /// Map surface failures
    Map,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Network => crate::i18n::t!("errors.category.network").to_string(),
            Self::Session => crate::i18n::t!("errors.category.session").to_string(),
            Self::Parsing => crate::i18n::t!("errors.category.parsing").to_string(),
            Self::Geolocation => crate::i18n::t!("errors.category.geolocation").to_string(),
            Self::Storage => crate::i18n::t!("errors.category.storage").to_string(),
            Self::Map => crate::i18n::t!("errors.category.map").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Other => crate::i18n::t!("errors.category.other").to_string(),
        }
    }
}

/// Unified error type for the ustaz crate
#[derive(Error, Debug)]
pub enum Error {
    /// REST API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Geolocation errors
    #[error("Geolocation error: {0}")]
    Geo(#[from] GeoError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Map surface errors
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl UstazErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_recoverable(),
            Self::Geo(e) => e.is_recoverable(),
            Self::Storage(e) => e.is_recoverable(),
            Self::Map(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Api(e) => e.localized_desc(),
            Self::Geo(e) => e.localized_desc(),
            Self::Storage(e) => e.localized_desc(),
            Self::Map(e) => e.localized_desc(),
            Self::Io(e) => format!("{}: {e}", crate::i18n::t!("errors.io.error")),
            Self::Json(e) => format!("{}: {e}", crate::i18n::t!("errors.json.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(e) => e.category(),
            Self::Geo(e) => e.category(),
            Self::Storage(e) => e.category(),
            Self::Map(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
