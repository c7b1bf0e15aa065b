//! Booking types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    Disputed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Disputed => "disputed",
        }
    }

    /// Whether the booking can no longer change state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            "disputed" => Ok(Self::Disputed),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[default]
    Online,
    InPerson,
    TeacherLocation,
    StudentHome,
    AgreedLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelledBy {
    Parent,
    Teacher,
    Admin,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    #[serde(default)]
    pub reference: String,
    pub parent_id: u64,
    pub teacher_id: u64,
    pub subject_id: u64,
    pub grade_level_id: Option<u64>,
    pub subject_name: Option<String>,
    pub teacher_name: Option<String>,
    pub parent_name: Option<String>,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub scheduled_at: String,
    #[serde(default)]
    pub duration_minutes: u32,
    pub status: BookingStatus,
    #[serde(default)]
    pub location_type: LocationType,
    pub location_address: Option<String>,
    pub meeting_address: Option<String>,
    pub meeting_lat: Option<f64>,
    pub meeting_lng: Option<f64>,
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub agreed_price: f64,
    #[serde(default)]
    pub currency: String,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<CancelledBy>,
    pub confirmed_at: Option<String>,
    pub completed_at: Option<String>,
    pub cancelled_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingPayload {
    pub teacher_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_subject_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level_id: Option<u64>,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub location_type: LocationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("in_progress".parse::<BookingStatus>(), Ok(BookingStatus::InProgress));
        assert_eq!(BookingStatus::NoShow.as_str(), "no_show");
        assert!("bogus".parse::<BookingStatus>().is_err());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_create_payload_omits_absent_fields() {
        let payload = CreateBookingPayload {
            teacher_id: 4,
            booking_date: "2026-11-02".into(),
            start_time: "16:00".into(),
            end_time: "17:00".into(),
            location_type: LocationType::InPerson,
            ..CreateBookingPayload::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["location_type"], "in_person");
        assert!(json.get("notes").is_none());
        assert!(json.get("subject_id").is_none());
    }
}
