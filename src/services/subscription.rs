//! Teacher subscription endpoints (`/v1/subscriptions/...`)

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    ApiResponse, FeaturedListing, FeaturedPlanType, PaymentGateway, SubscribeResult,
    SubscriptionPlan, TeacherSubscription,
};

#[derive(Debug, Clone, Serialize)]
struct Subscribe {
    plan_id: u64,
    gateway: PaymentGateway,
}

#[derive(Debug, Clone, Serialize)]
struct PurchaseFeatured {
    plan_type: FeaturedPlanType,
    gateway: PaymentGateway,
}

#[derive(Clone)]
pub struct SubscriptionService {
    api: Arc<ApiClient>,
}

impl SubscriptionService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn plans(&self) -> Result<Vec<SubscriptionPlan>, ApiError> {
        let response: ApiResponse<Vec<SubscriptionPlan>> =
            self.api.get("/v1/subscriptions/plans").await?;
        Ok(response.data)
    }

    /// The caller's active subscription, `None` if they have none
    pub async fn current(&self) -> Result<Option<TeacherSubscription>, ApiError> {
        let response: ApiResponse<Option<TeacherSubscription>> =
            self.api.get("/v1/subscriptions/my-subscription").await?;
        Ok(response.data)
    }

    pub async fn subscribe(
        &self,
        plan_id: u64,
        gateway: PaymentGateway,
    ) -> Result<SubscribeResult, ApiError> {
        let response: ApiResponse<SubscribeResult> = self
            .api
            .post("/v1/subscriptions/subscribe", &Subscribe { plan_id, gateway })
            .await?;
        Ok(response.data)
    }

    pub async fn cancel(&self) -> Result<(), ApiError> {
        self.api
            .post_unit("/v1/subscriptions/cancel", &serde_json::json!({}))
            .await
    }

    pub async fn purchase_featured_listing(
        &self,
        plan_type: FeaturedPlanType,
        gateway: PaymentGateway,
    ) -> Result<FeaturedListing, ApiError> {
        let response: ApiResponse<FeaturedListing> = self
            .api
            .post(
                "/v1/subscriptions/featured-listing",
                &PurchaseFeatured { plan_type, gateway },
            )
            .await?;
        Ok(response.data)
    }
}
