//! Booking list and detail state

use tokio::sync::RwLock;

use super::failure_message;
use crate::api::ApiError;
use crate::models::{Booking, BookingStatus, CreateBookingPayload, PaginationMeta};
use crate::services::{BookingQuery, BookingService};

#[derive(Debug, Clone, PartialEq)]
pub struct BookingState {
    pub bookings: Vec<Booking>,
    pub current_booking: Option<Booking>,
    pub upcoming_bookings: Vec<Booking>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub pagination: PaginationMeta,
}

impl Default for BookingState {
    fn default() -> Self {
        Self {
            bookings: Vec::new(),
            current_booking: None,
            upcoming_bookings: Vec::new(),
            is_loading: false,
            error: None,
            pagination: PaginationMeta {
                total: 0,
                page: 1,
                per_page: 20,
                total_pages: 0,
            },
        }
    }
}

pub struct BookingStore {
    service: BookingService,
    state: RwLock<BookingState>,
}

impl BookingStore {
    pub fn new(service: BookingService) -> Self {
        Self {
            service,
            state: RwLock::new(BookingState::default()),
        }
    }

    /// Load one page of the caller's bookings
    pub async fn load_bookings(&self, status: Option<BookingStatus>, page: Option<u32>) {
        self.begin().await;

        let query = BookingQuery {
            status,
            page,
            per_page: None,
        };

        let result = self.service.bookings(&query).await;
        let mut state = self.state.write().await;
        state.is_loading = false;

        match result {
            Ok(response) => {
                tracing::debug!(count = response.data.len(), "Bookings loaded");
                state.bookings = response.data;
                state.pagination = response.meta;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load bookings");
                state.error = Some(failure_message(&e, || {
                    crate::i18n::t!("booking.load_failed").to_string()
                }));
            }
        }
    }

    pub async fn load_booking(&self, id: u64) {
        self.begin().await;

        let result = self.service.booking(id).await;
        let mut state = self.state.write().await;
        state.is_loading = false;

        match result {
            Ok(booking) => state.current_booking = Some(booking),
            Err(e) => {
                tracing::warn!(booking_id = id, error = %e, "Failed to load booking");
                state.error = Some(failure_message(&e, || {
                    crate::i18n::t!("booking.load_one_failed").to_string()
                }));
            }
        }
    }

    /// Create a booking; the error is stored and also returned
    pub async fn create_booking(&self, payload: &CreateBookingPayload) -> Result<Booking, ApiError> {
        self.begin().await;

        let result = self.service.create(payload).await;
        let mut state = self.state.write().await;
        state.is_loading = false;

        match result {
            Ok(booking) => {
                tracing::info!(booking_id = booking.id, "Booking created");
                state.current_booking = Some(booking.clone());
                Ok(booking)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create booking");
                state.error = Some(failure_message(&e, || {
                    crate::i18n::t!("booking.create_failed").to_string()
                }));
                Err(e)
            }
        }
    }

    pub async fn confirm_booking(&self, id: u64) {
        let result = self.service.confirm(id).await;
        self.apply_transition(id, result, || crate::i18n::t!("booking.confirm_failed").to_string())
            .await;
    }

    pub async fn cancel_booking(&self, id: u64, reason: &str) {
        let result = self.service.cancel(id, reason).await;
        self.apply_transition(id, result, || crate::i18n::t!("booking.cancel_failed").to_string())
            .await;
    }

    pub async fn complete_booking(&self, id: u64) {
        let result = self.service.complete(id).await;
        self.apply_transition(id, result, || {
            crate::i18n::t!("booking.complete_failed").to_string()
        })
        .await;
    }

    /// Refresh upcoming bookings; failures keep the previous list
    pub async fn load_upcoming_bookings(&self) {
        match self.service.upcoming().await {
            Ok(bookings) => self.state.write().await.upcoming_bookings = bookings,
            Err(e) => tracing::debug!(error = %e, "Failed to load upcoming bookings"),
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    pub async fn snapshot(&self) -> BookingState {
        self.state.read().await.clone()
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.error = None;
    }

    /// Swap the updated booking into the list and make it current
    async fn apply_transition(
        &self,
        id: u64,
        result: Result<Booking, ApiError>,
        fallback: impl FnOnce() -> String,
    ) {
        let mut state = self.state.write().await;
        match result {
            Ok(booking) => {
                tracing::info!(booking_id = id, status = booking.status.as_str(), "Booking updated");
                for entry in state.bookings.iter_mut().filter(|b| b.id == id) {
                    *entry = booking.clone();
                }
                state.current_booking = Some(booking);
            }
            Err(e) => {
                tracing::warn!(booking_id = id, error = %e, "Booking transition failed");
                state.error = Some(failure_message(&e, fallback));
            }
        }
    }
}
