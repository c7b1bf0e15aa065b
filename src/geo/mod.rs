//! Geolocation: position acquisition with a fixed fallback
//!
//! Positions come from a [`LocationProvider`] (the platform boundary). The
//! [`GeolocationCoordinator`] turns provider results into a
//! [`LocationResult`] that is always usable: every failure degrades to the
//! configured fallback position.

pub mod coordinator;
pub mod provider;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ErrorCategory, UstazErrorTrait};

pub use coordinator::{GeolocationCoordinator, WatchHandle};
pub use provider::{FixedLocationProvider, LocationProvider, UnsupportedLocationProvider};

// ============================================================================
// Types
// ============================================================================

/// A position fix; `accuracy` is in meters (0 for the fallback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lng: f64, accuracy: f64) -> Self {
        Self { lat, lng, accuracy }
    }
}

/// Location permission as last observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    #[default]
    Prompt,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a one-shot location request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub position: GeoPosition,
    pub permission_status: PermissionStatus,
    /// Readable message when the fallback position was used
    pub error: Option<String>,
}

/// Options handed to the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// `None` means the provider may take as long as it needs
    pub timeout: Option<Duration>,
    /// Maximum age of a cached fix the provider may return
    pub maximum_age: Duration,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("geolocation is not supported on this host")]
    Unsupported,
}

impl GeoError {
    /// Permission state implied by this failure
    pub fn permission_status(&self) -> PermissionStatus {
        match self {
            Self::PermissionDenied | Self::Unsupported => PermissionStatus::Denied,
            Self::PositionUnavailable | Self::Timeout => PermissionStatus::Prompt,
        }
    }
}

impl UstazErrorTrait for GeoError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::PositionUnavailable | Self::Timeout)
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::PermissionDenied => crate::i18n::t!("geo.denied").to_string(),
            Self::PositionUnavailable => crate::i18n::t!("geo.unavailable").to_string(),
            Self::Timeout => crate::i18n::t!("geo.timeout").to_string(),
            Self::Unsupported => crate::i18n::t!("geo.unsupported").to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Geolocation
    }
}
