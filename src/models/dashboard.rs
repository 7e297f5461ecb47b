//! Dashboard snapshot, aggregated by the backend per (employee, year, month).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, api_date, RecordId};
use super::subscription::OfferType;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    #[serde(default, with = "amount")]
    pub total_revenue: f64,
    #[serde(default, with = "amount")]
    pub period_revenue: f64,
    #[serde(default, with = "amount")]
    pub previous_period_revenue: f64,
    #[serde(default)]
    pub payments_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientAnalytics {
    #[serde(default)]
    pub total_clients: u64,
    #[serde(default)]
    pub new_clients: u64,
    #[serde(default)]
    pub previous_new_clients: u64,
    #[serde(default)]
    pub active_subscriptions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub label: String,
    #[serde(with = "amount")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionSlice {
    pub offer_type: OfferType,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub employee_id: RecordId,
    pub name: String,
    #[serde(with = "amount")]
    pub revenue: f64,
    #[serde(default)]
    pub subscriptions_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpiringSubscription {
    pub id: RecordId,
    pub client_name: String,
    pub offer_type: OfferType,
    #[serde(with = "api_date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub financial: FinancialSummary,
    #[serde(default)]
    pub clients: ClientAnalytics,
    #[serde(default)]
    pub revenue_history: Vec<RevenuePoint>,
    #[serde(default)]
    pub subscription_distribution: Vec<DistributionSlice>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub expiring: Vec<ExpiringSubscription>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilter {
    pub employee_id: Option<RecordId>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl DashboardFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(employee_id) = self.employee_id {
            query.push(("employee_id", employee_id.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            query.push(("month", month.to_string()));
        }
        query
    }
}
