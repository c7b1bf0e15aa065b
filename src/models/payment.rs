//! Payment and review types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    PartiallyRefunded,
    Disputed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    Stripe,
    #[default]
    Paymob,
    Wallet,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    BookingPayment,
    Subscription,
    FeaturedListing,
    Refund,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub reference: String,
    pub booking_id: Option<u64>,
    pub user_id: u64,
    pub amount: f64,
    #[serde(default)]
    pub platform_fee: f64,
    #[serde(default)]
    pub currency: String,
    pub gateway: PaymentGateway,
    pub gateway_transaction_id: Option<String>,
    pub gateway_order_id: Option<String>,
    pub status: PaymentStatus,
    #[serde(rename = "type")]
    pub kind: PaymentType,
    pub paid_at: Option<String>,
    pub refunded_at: Option<String>,
    pub refund_amount: Option<f64>,
    pub refund_reason: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// What the client needs to hand the user over to the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInitiation {
    pub payment_id: u64,
    pub payment_reference: String,
    pub gateway: PaymentGateway,
    pub payment_url: Option<String>,
    pub client_secret: Option<String>,
    pub iframe_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub booking_id: u64,
    pub reviewer_id: u64,
    pub teacher_id: u64,
    pub rating: u8,
    pub comment: Option<String>,
    pub teaching_quality: Option<u8>,
    pub punctuality: Option<u8>,
    pub communication: Option<u8>,
    #[serde(default)]
    pub is_visible: bool,
    pub reviewer_name: Option<String>,
    pub reviewer_avatar: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateReviewPayload {
    pub booking_id: u64,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teaching_quality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punctuality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication: Option<u8>,
}
