//! Payment (`/v1/payments/...`) and review (`/v1/reviews/...`) endpoints

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    ApiResponse, CreateReviewPayload, PaginatedResponse, Payment, PaymentGateway,
    PaymentInitiation, Review,
};

#[derive(Debug, Clone, Serialize)]
struct InitiatePayment {
    booking_id: u64,
    gateway: PaymentGateway,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Clone)]
pub struct PaymentService {
    api: Arc<ApiClient>,
}

impl PaymentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Start paying for a booking; the result says where to send the user
    pub async fn initiate(
        &self,
        booking_id: u64,
        gateway: PaymentGateway,
    ) -> Result<PaymentInitiation, ApiError> {
        let response: ApiResponse<PaymentInitiation> = self
            .api
            .post(
                "/v1/payments/initiate",
                &InitiatePayment {
                    booking_id,
                    gateway,
                },
            )
            .await?;
        Ok(response.data)
    }

    pub async fn status(&self, payment_id: u64) -> Result<Payment, ApiError> {
        let response: ApiResponse<Payment> = self
            .api
            .get(&format!("/v1/payments/status/{payment_id}"))
            .await?;
        Ok(response.data)
    }

    pub async fn history(&self, query: &HistoryQuery) -> Result<PaginatedResponse<Payment>, ApiError> {
        self.api.get_with_query("/v1/payments/history", query).await
    }

    pub async fn request_refund(&self, payment_id: u64, reason: &str) -> Result<Payment, ApiError> {
        let response: ApiResponse<Payment> = self
            .api
            .post(
                &format!("/v1/payments/{payment_id}/refund"),
                &serde_json::json!({ "reason": reason }),
            )
            .await?;
        Ok(response.data)
    }
}

#[derive(Clone)]
pub struct ReviewService {
    api: Arc<ApiClient>,
}

impl ReviewService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create(&self, payload: &CreateReviewPayload) -> Result<Review, ApiError> {
        let response: ApiResponse<Review> = self.api.post("/v1/reviews", payload).await?;
        Ok(response.data)
    }

    pub async fn update(&self, review_id: u64, payload: &CreateReviewPayload) -> Result<Review, ApiError> {
        let response: ApiResponse<Review> = self
            .api
            .put(&format!("/v1/reviews/{review_id}"), payload)
            .await?;
        Ok(response.data)
    }

    pub async fn delete(&self, review_id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("/v1/reviews/{review_id}")).await
    }
}
