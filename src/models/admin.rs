//! Admin dashboard and report types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_teachers: u64,
    pub total_parents: u64,
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub pending_verifications: u64,
    pub active_subscriptions: u64,
}

/// One point of a dashboard time series; `amount` for revenue, `count` otherwise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub amount: Option<f64>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub revenue_chart: Vec<ChartPoint>,
    #[serde(default)]
    pub bookings_chart: Vec<ChartPoint>,
    #[serde(default)]
    pub users_chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub period: ReportPeriod,
    pub total_revenue: f64,
    pub total_commissions: f64,
    pub total_payouts: f64,
    pub subscription_revenue: f64,
    pub featured_revenue: f64,
}
