//! Teacher discovery endpoints (`/v1/teachers/...`)

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    ApiResponse, DataResponse, GradeLevel, MapMarker, PaginatedResponse, Review, SearchMeta,
    Subject, Teacher, TeacherAvailability, TeacherSubject,
};

/// Paginated teacher list returned by the proximity search
pub type SearchResponse = PaginatedResponse<Teacher, SearchMeta>;

/// Query string of `GET /v1/teachers/nearby`
///
/// Absent filters are left out of the query string entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Meters
    pub radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_online: Option<bool>,
    pub page: u32,
    pub per_page: u32,
}

/// Query string of `GET /v1/teachers/map-markers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerQuery {
    pub lat: f64,
    pub lng: f64,
    /// Meters, twice the list radius
    pub radius: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
struct PageQuery {
    page: u32,
}

#[derive(Clone)]
pub struct TeacherSearchService {
    api: Arc<ApiClient>,
}

impl TeacherSearchService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Proximity search around an anchor with the active filters
    pub async fn search_nearby(&self, query: &NearbyQuery) -> Result<SearchResponse, ApiError> {
        tracing::debug!(
            lat = query.lat,
            lng = query.lng,
            radius = query.radius,
            page = query.page,
            "Searching nearby teachers"
        );
        self.api.get_with_query("/v1/teachers/nearby", query).await
    }

    /// Flat marker list for the map
    pub async fn map_markers(&self, query: &MarkerQuery) -> Result<Vec<MapMarker>, ApiError> {
        let response: DataResponse<Vec<MapMarker>> = self
            .api
            .get_with_query("/v1/teachers/map-markers", query)
            .await?;
        Ok(response.data)
    }

    pub async fn teacher_profile(&self, id: u64) -> Result<Teacher, ApiError> {
        let response: ApiResponse<Teacher> = self.api.get(&format!("/v1/teachers/{id}")).await?;
        Ok(response.data)
    }

    pub async fn teacher_reviews(
        &self,
        teacher_id: u64,
        page: u32,
    ) -> Result<PaginatedResponse<Review>, ApiError> {
        self.api
            .get_with_query(
                &format!("/v1/teachers/{teacher_id}/reviews"),
                &PageQuery { page },
            )
            .await
    }

    pub async fn teacher_availability(
        &self,
        teacher_id: u64,
    ) -> Result<Vec<TeacherAvailability>, ApiError> {
        let response: ApiResponse<Vec<TeacherAvailability>> = self
            .api
            .get(&format!("/v1/teachers/{teacher_id}/availability"))
            .await?;
        Ok(response.data)
    }

    pub async fn teacher_subjects(&self, teacher_id: u64) -> Result<Vec<TeacherSubject>, ApiError> {
        let response: ApiResponse<Vec<TeacherSubject>> = self
            .api
            .get(&format!("/v1/teachers/{teacher_id}/subjects"))
            .await?;
        Ok(response.data)
    }

    /// Subject catalogue used by the search filters
    pub async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        let response: ApiResponse<Vec<Subject>> = self.api.get("/v1/teachers/subjects").await?;
        Ok(response.data)
    }

    /// Grade-level catalogue used by the search filters
    pub async fn grade_levels(&self) -> Result<Vec<GradeLevel>, ApiError> {
        let response: ApiResponse<Vec<GradeLevel>> =
            self.api.get("/v1/teachers/grade-levels").await?;
        Ok(response.data)
    }
}
