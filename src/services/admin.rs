//! Admin endpoints (`/v1/admin/...`)

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    ApiResponse, ChartData, DashboardStats, FinancialReport, PaginatedResponse, User, UserRole,
};

/// Filters of `GET /v1/admin/users`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Date window of the financial reports (`YYYY-MM-DD`)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Clone)]
pub struct AdminService {
    api: Arc<ApiClient>,
}

impl AdminService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let response: ApiResponse<DashboardStats> =
            self.api.get("/v1/admin/dashboard/stats").await?;
        Ok(response.data)
    }

    /// Time series for the dashboard; `period` is `week`, `month` or `year`
    pub async fn charts(&self, period: &str) -> Result<ChartData, ApiError> {
        let response: ApiResponse<ChartData> = self
            .api
            .get_with_query("/v1/admin/dashboard/charts", &[("period", period)])
            .await?;
        Ok(response.data)
    }

    pub async fn users(&self, query: &UserQuery) -> Result<PaginatedResponse<User>, ApiError> {
        self.api.get_with_query("/v1/admin/users", query).await
    }

    pub async fn user(&self, user_id: u64) -> Result<User, ApiError> {
        let response: ApiResponse<User> =
            self.api.get(&format!("/v1/admin/users/{user_id}")).await?;
        Ok(response.data)
    }

    pub async fn toggle_user_active(&self, user_id: u64) -> Result<User, ApiError> {
        let response: ApiResponse<User> = self
            .api
            .post_empty(&format!("/v1/admin/users/{user_id}/toggle-active"))
            .await?;
        Ok(response.data)
    }

    pub async fn pending_verifications(
        &self,
        page: u32,
    ) -> Result<PaginatedResponse<serde_json::Value>, ApiError> {
        self.api
            .get_with_query("/v1/admin/verifications/pending", &[("page", page)])
            .await
    }

    pub async fn approve_verification(&self, teacher_profile_id: u64) -> Result<(), ApiError> {
        self.api
            .post_unit(
                &format!("/v1/admin/verifications/{teacher_profile_id}/approve"),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn reject_verification(
        &self,
        teacher_profile_id: u64,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.api
            .post_unit(
                &format!("/v1/admin/verifications/{teacher_profile_id}/reject"),
                &serde_json::json!({ "reason": reason }),
            )
            .await
    }

    pub async fn revenue_report(&self, range: &ReportRange) -> Result<FinancialReport, ApiError> {
        let response: ApiResponse<FinancialReport> = self
            .api
            .get_with_query("/v1/admin/reports/revenue", range)
            .await?;
        Ok(response.data)
    }

    pub async fn commissions_report(
        &self,
        range: &ReportRange,
    ) -> Result<PaginatedResponse<serde_json::Value>, ApiError> {
        self.api
            .get_with_query("/v1/admin/reports/commissions", range)
            .await
    }

    pub async fn payouts_report(
        &self,
        range: &ReportRange,
    ) -> Result<PaginatedResponse<serde_json::Value>, ApiError> {
        self.api.get_with_query("/v1/admin/reports/payouts", range).await
    }
}
