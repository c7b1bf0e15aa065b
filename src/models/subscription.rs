//! Teacher subscription and featured-listing types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub monthly_price: f64,
    pub annual_price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub features: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub commission_rate: f64,
    #[serde(default)]
    pub max_subjects: u32,
    #[serde(default)]
    pub includes_featured: bool,
    #[serde(default)]
    pub featured_days: u32,
    #[serde(default)]
    pub priority_support: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSubscription {
    pub id: u64,
    pub teacher_profile_id: u64,
    #[serde(default)]
    pub plan_id: u64,
    #[serde(default)]
    pub subscription_plan_id: u64,
    pub payment_id: Option<u64>,
    pub starts_at: String,
    pub ends_at: String,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub auto_renew: bool,
    pub plan: Option<SubscriptionPlan>,
}

/// Result of subscribing: the subscription plus, for gateway payments, where to pay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeResult {
    pub subscription: TeacherSubscription,
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedPlanType {
    BasicBoost,
    PremiumBoost,
    TopTeacher,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedListing {
    pub id: u64,
    pub teacher_profile_id: u64,
    pub payment_id: Option<u64>,
    pub plan_type: FeaturedPlanType,
    #[serde(default)]
    pub priority_score: i32,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default)]
    pub is_active: bool,
}
