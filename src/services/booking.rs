//! Booking endpoints (`/v1/bookings/...`)

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{ApiResponse, Booking, BookingStatus, CreateBookingPayload, PaginatedResponse};

/// Filters of `GET /v1/bookings`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct BookingService {
    api: Arc<ApiClient>,
}

impl BookingService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn bookings(&self, query: &BookingQuery) -> Result<PaginatedResponse<Booking>, ApiError> {
        self.api.get_with_query("/v1/bookings", query).await
    }

    pub async fn booking(&self, id: u64) -> Result<Booking, ApiError> {
        let response: ApiResponse<Booking> = self.api.get(&format!("/v1/bookings/{id}")).await?;
        Ok(response.data)
    }

    pub async fn create(&self, payload: &CreateBookingPayload) -> Result<Booking, ApiError> {
        let response: ApiResponse<Booking> = self.api.post("/v1/bookings", payload).await?;
        Ok(response.data)
    }

    pub async fn confirm(&self, id: u64) -> Result<Booking, ApiError> {
        self.transition(id, "confirm").await
    }

    pub async fn cancel(&self, id: u64, reason: &str) -> Result<Booking, ApiError> {
        let response: ApiResponse<Booking> = self
            .api
            .post(
                &format!("/v1/bookings/{id}/cancel"),
                &serde_json::json!({ "cancellation_reason": reason }),
            )
            .await?;
        Ok(response.data)
    }

    pub async fn complete(&self, id: u64) -> Result<Booking, ApiError> {
        self.transition(id, "complete").await
    }

    pub async fn dispute(&self, id: u64, reason: &str) -> Result<Booking, ApiError> {
        let response: ApiResponse<Booking> = self
            .api
            .post(
                &format!("/v1/bookings/{id}/dispute"),
                &serde_json::json!({ "reason": reason }),
            )
            .await?;
        Ok(response.data)
    }

    pub async fn upcoming(&self) -> Result<Vec<Booking>, ApiError> {
        let response: ApiResponse<Vec<Booking>> = self.api.get("/v1/bookings/upcoming").await?;
        Ok(response.data)
    }

    pub async fn history(&self) -> Result<PaginatedResponse<Booking>, ApiError> {
        self.api.get("/v1/bookings/history").await
    }

    async fn transition(&self, id: u64, action: &str) -> Result<Booking, ApiError> {
        let response: ApiResponse<Booking> = self
            .api
            .post_empty(&format!("/v1/bookings/{id}/{action}"))
            .await?;
        Ok(response.data)
    }
}
