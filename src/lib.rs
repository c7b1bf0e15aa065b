//! ustaz - Client core for a location-based tutoring marketplace
//!
//! Parents find nearby teachers on a clustered map and in a paginated list,
//! book sessions and pay; teachers and admins manage their side of the same
//! REST backend. This crate holds everything below the UI: the API client,
//! domain services, state containers, geolocation and the map controller.
//!
//! # Architecture
//!
//! - [`config`] - Configuration from environment or TOML
//! - [`api`] - Authenticated REST client and session
//! - [`services`] - One thin service per backend resource
//! - [`store`] - Shared state containers (auth, search, bookings, map, theme)
//! - [`geo`] - Position acquisition with a fixed fallback
//! - [`map`] - Clustered teacher map over a pluggable surface
//! - [`guards`] - Route access decisions
//! - [`storage`] - Versioned local persistence
//! - [`context`] - Wiring of all of the above
//!
//! # Example
//!
//! ```no_run
//! use ustaz::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = AppContext::from_config(Config::from_env()?)?;
//!     ctx.search.set_user_location(30.0444, 31.2357).await;
//!     for teacher in ctx.search.teachers().await {
//!         println!("{} ({:.1} km)", teacher.full_name(), teacher.distance_km);
//!     }
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod geo;
pub mod guards;
pub mod i18n;
pub mod map;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ApiClient, ApiError, AuthSession, SessionStore};
    pub use crate::config::Config;
    pub use crate::context::AppContext;
    pub use crate::error::{Error, ErrorCategory, Result, UstazErrorTrait};
    pub use crate::geo::{GeoPosition, GeolocationCoordinator, LocationProvider, PermissionStatus};
    pub use crate::models::{Booking, BookingStatus, MapMarker, Teacher, User, UserRole};
    pub use crate::store::{FilterUpdate, SearchOutcome, SearchStore, Theme};
}

// Direct re-exports for convenience
pub use models::{Booking, MapMarker, Teacher, User, UserRole};
