//! Application state containers
//!
//! Each container owns its state behind a [`tokio::sync::RwLock`] and is
//! shared through `Arc`. Actions are the only way to mutate state; readers
//! get cloned snapshots. Locks are never held across a network call.
//!
//! Containers catch service errors at the action boundary and keep a
//! readable message in their `error` field.

pub mod auth;
pub mod booking;
pub mod map;
pub mod search;
pub mod theme;

pub use auth::AuthStore;
pub use booking::{BookingState, BookingStore};
pub use map::{MapState, MapStore};
pub use search::{
    FilterUpdate, Pagination, SearchFilters, SearchOutcome, SearchState, SearchStore,
    UserLocation,
};
pub use theme::{ResolvedTheme, Theme, ThemeStore};

use crate::api::ApiError;

/// Server-provided message, else the localized fallback
fn failure_message(error: &ApiError, fallback: impl FnOnce() -> String) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
