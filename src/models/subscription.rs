//! Subscription (abonnement) records and the payloads that mutate them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::EmployeeRef;
use super::common::{amount, api_date, api_date_opt, Identified, RecordId};

/// Billing period of a subscription
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OfferType {
    #[serde(alias = "monthly")]
    Monthly,
    #[serde(alias = "quarterly")]
    Quarterly,
    #[serde(alias = "semiannual")]
    Semiannual,
    #[serde(alias = "annual")]
    Annual,
}

impl OfferType {
    pub const ALL: [OfferType; 4] = [
        OfferType::Monthly,
        OfferType::Quarterly,
        OfferType::Semiannual,
        OfferType::Annual,
    ];

    /// Length of one billing period in calendar months
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Semiannual => 6,
            Self::Annual => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Semiannual => "Semiannual",
            Self::Annual => "Annual",
        }
    }
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OfferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            "semiannual" | "semi-annual" | "half-yearly" => Ok(Self::Semiannual),
            "annual" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(format!("Unknown offer type: {}", s)),
        }
    }
}

/// Stored status of a subscription. See `domain::subscription::effective_status`
/// for the status shown to the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "suspended")]
    Suspended,
    #[serde(alias = "expired")]
    Expired,
    #[serde(alias = "cancelled", alias = "canceled")]
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "expired" => Ok(Self::Expired),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

/// Client summary embedded in subscription payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: RecordId,
    pub client_id: RecordId,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    pub offer_type: OfferType,
    #[serde(with = "amount")]
    pub price: f64,
    pub status: SubscriptionStatus,
    #[serde(with = "api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "api_date")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Subscription {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Subscription {
    pub fn client_name(&self) -> &str {
        self.client.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }

    pub fn employee_name(&self) -> &str {
        self.employee.as_ref().map(|e| e.name.as_str()).unwrap_or("-")
    }
}

/// Create/update form for a subscription
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionInput {
    pub client_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RecordId>,
    pub offer_type: OfferType,
    pub price: f64,
    pub status: SubscriptionStatus,
    #[serde(with = "api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "api_date")]
    pub end_date: NaiveDate,
}

/// Body of `POST /abonnements/:id/renew`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenewRequest {
    pub offer_type: OfferType,
    pub amount_paid: f64,
    #[serde(with = "api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "api_date")]
    pub end_date: NaiveDate,
}

/// Body of `POST /abonnements/:id/cancel`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CancelRequest {
    #[serde(with = "api_date_opt", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    pub search: Option<String>,
    pub status: Option<SubscriptionStatus>,
    pub offer_type: Option<OfferType>,
    pub employee_id: Option<RecordId>,
    pub client_id: Option<RecordId>,
    pub page: u32,
}

impl SubscriptionFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.max(1).to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(offer) = self.offer_type {
            query.push(("offer_type", offer.to_string()));
        }
        if let Some(employee_id) = self.employee_id {
            query.push(("employee_id", employee_id.to_string()));
        }
        if let Some(client_id) = self.client_id {
            query.push(("client_id", client_id.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_accepts_string_price_and_timestamps() {
        let raw = r#"{
            "id": 12, "client_id": 4, "client": {"id": 4, "name": "Amal Idrissi"},
            "employee_id": null, "offer_type": "Quarterly", "price": "450.00",
            "status": "active", "start_date": "2024-01-15T00:00:00.000000Z",
            "end_date": "2024-04-15"
        }"#;
        let sub: Subscription = serde_json::from_str(raw).unwrap();
        assert_eq!(sub.price, 450.0);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.offer_type, OfferType::Quarterly);
        assert_eq!(sub.start_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(sub.client_name(), "Amal Idrissi");
        assert_eq!(sub.employee_name(), "-");
    }

    #[test]
    fn test_offer_type_parsing() {
        assert_eq!("yearly".parse::<OfferType>().unwrap(), OfferType::Annual);
        assert_eq!("Semi-Annual".parse::<OfferType>().unwrap(), OfferType::Semiannual);
        assert!("weekly".parse::<OfferType>().is_err());
    }

    #[test]
    fn test_cancel_request_omits_missing_end_date() {
        let body = serde_json::to_value(CancelRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }
}
