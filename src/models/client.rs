//! Client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Identified, RecordId};
use super::subscription::Subscription;

/// Employee summary embedded in client and subscription payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub employee_id: Option<RecordId>,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "abonnements")]
    pub subscriptions: Vec<Subscription>,
}

impl Identified for Client {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Create/update form for a client
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub employee_id: Option<RecordId>,
    pub page: u32,
}

impl ClientFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.max(1).to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        if let Some(employee_id) = self.employee_id {
            query.push(("employee_id", employee_id.to_string()));
        }
        query
    }
}
