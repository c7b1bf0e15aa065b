//! Teacher search and profile types

use serde::{Deserialize, Serialize};

/// Teacher summary as returned by search and profile endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    #[serde(default)]
    pub teacher_profile_id: u64,
    #[serde(default)]
    pub user_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub total_bookings: u32,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub accepts_online: bool,
    #[serde(default)]
    pub accepts_in_person: bool,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub governorate: String,
    #[serde(default)]
    pub distance_km: f64,
    pub subjects: Option<Vec<TeacherSubject>>,
    pub availabilities: Option<Vec<TeacherAvailability>>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherSubject {
    pub id: Option<u64>,
    pub subject_id: u64,
    pub subject_name: String,
    pub icon: Option<String>,
    pub grade_level_id: u64,
    pub grade_level_name: String,
    pub effective_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherAvailability {
    pub id: u64,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Place where a teacher gives in-person lessons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherLocation {
    pub id: u64,
    #[serde(default)]
    pub teacher_profile_id: u64,
    pub label: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    pub governorate: String,
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_active: bool,
}

/// Minimal teacher projection used only for map rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub hourly_rate: f64,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub is_featured: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub distance_km: f64,
}

impl MapMarker {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    pub name_ar: Option<String>,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolStage {
    Kindergarten,
    Primary,
    Preparatory,
    Secondary,
    University,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeLevel {
    pub id: u64,
    pub name: String,
    pub name_ar: Option<String>,
    pub slug: String,
    pub stage: SchoolStage,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_decodes_from_api() {
        let json = r#"{
            "id": 12,
            "first_name": "Ahmed",
            "last_name": "Hassan",
            "hourly_rate": 150,
            "avg_rating": 4.8,
            "is_featured": true,
            "latitude": 30.05,
            "longitude": 31.24,
            "distance_km": 1.2
        }"#;
        let marker: MapMarker = serde_json::from_str(json).unwrap();
        assert_eq!(marker.id, 12);
        assert_eq!(marker.full_name(), "Ahmed Hassan");
        assert!(marker.is_featured);
    }

    #[test]
    fn test_teacher_optional_fields_default() {
        let json = r#"{"id":1,"first_name":"Sara","last_name":"Ali","hourly_rate":200}"#;
        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert!(teacher.subjects.is_none());
        assert!(!teacher.accepts_online);
        assert_eq!(teacher.full_name(), "Sara Ali");
    }

    #[test]
    fn test_grade_stage_snake_case() {
        let json = r#"{"id":3,"name":"Grade 7","slug":"grade-7","stage":"preparatory"}"#;
        let grade: GradeLevel = serde_json::from_str(json).unwrap();
        assert_eq!(grade.stage, SchoolStage::Preparatory);
    }
}
