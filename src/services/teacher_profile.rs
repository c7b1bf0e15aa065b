//! A teacher's own profile (`/v1/teachers/profile/mine/...`)

use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{ApiResponse, Teacher, TeacherLocation};

const PROFILE_PATH: &str = "/v1/teachers/profile/mine";

/// Partial profile change; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeacherProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_in_person: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Subject taught at one grade level
#[derive(Debug, Clone, Serialize)]
pub struct SubjectOffer {
    pub subject_id: u64,
    pub grade_level_id: u64,
    /// Replaces the hourly rate for this subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_override: Option<f64>,
}

/// New teaching location
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationPayload {
    pub label: String,
    pub address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub city: String,
    pub governorate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_primary: bool,
    pub is_active: bool,
}

/// Partial location change
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub governorate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One weekly slot; `day_of_week` runs from 0 (Sunday) to 6
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilitySlot {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
struct Availabilities<'a> {
    availabilities: &'a [AvailabilitySlot],
}

#[derive(Debug, Clone, Serialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Documents sent for profile verification
#[derive(Debug, Clone, Serialize)]
pub struct VerificationRequest {
    pub education: String,
    pub certifications: Vec<Certification>,
}

#[derive(Clone)]
pub struct TeacherProfileService {
    api: Arc<ApiClient>,
}

impl TeacherProfileService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn my_profile(&self) -> Result<Teacher, ApiError> {
        let response: ApiResponse<Teacher> = self.api.get(PROFILE_PATH).await?;
        Ok(response.data)
    }

    pub async fn update_my_profile(&self, update: &TeacherProfileUpdate) -> Result<Teacher, ApiError> {
        let response: ApiResponse<Teacher> = self.api.put(PROFILE_PATH, update).await?;
        Ok(response.data)
    }

    pub async fn add_subject(&self, offer: &SubjectOffer) -> Result<(), ApiError> {
        self.api
            .post_unit(&format!("{PROFILE_PATH}/subjects"), offer)
            .await
    }

    pub async fn remove_subject(&self, subject_id: u64) -> Result<(), ApiError> {
        self.api
            .delete(&format!("{PROFILE_PATH}/subjects/{subject_id}"))
            .await
    }

    pub async fn add_location(&self, location: &LocationPayload) -> Result<TeacherLocation, ApiError> {
        let response: ApiResponse<TeacherLocation> = self
            .api
            .post(&format!("{PROFILE_PATH}/locations"), location)
            .await?;
        Ok(response.data)
    }

    pub async fn update_location(
        &self,
        location_id: u64,
        update: &LocationUpdate,
    ) -> Result<TeacherLocation, ApiError> {
        let response: ApiResponse<TeacherLocation> = self
            .api
            .put(&format!("{PROFILE_PATH}/locations/{location_id}"), update)
            .await?;
        Ok(response.data)
    }

    pub async fn remove_location(&self, location_id: u64) -> Result<(), ApiError> {
        self.api
            .delete(&format!("{PROFILE_PATH}/locations/{location_id}"))
            .await
    }

    /// Replace the weekly schedule with `slots`
    pub async fn update_availability(&self, slots: &[AvailabilitySlot]) -> Result<(), ApiError> {
        self.api
            .put_unit(
                &format!("{PROFILE_PATH}/availability"),
                &Availabilities { availabilities: slots },
            )
            .await
    }

    pub async fn submit_verification(&self, request: &VerificationRequest) -> Result<(), ApiError> {
        self.api
            .post_unit(&format!("{PROFILE_PATH}/verification"), request)
            .await
    }
}
