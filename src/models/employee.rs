//! Employee records (users managed by an admin).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Identified, RecordId};
use super::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub clients_count: u64,
    #[serde(default)]
    pub subscriptions_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Employee {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Employee {
    /// Deleting this employee without a transfer target would orphan clients
    pub fn owns_clients(&self) -> bool {
        self.clients_count > 0
    }

    /// Warning to show before deleting without a transfer target. The
    /// deletion itself is still sent; the server decides.
    pub fn deletion_warning(&self, transfer_to: Option<RecordId>) -> Option<String> {
        if transfer_to.is_some() || !self.owns_clients() {
            return None;
        }
        Some(format!(
            "{} still manages {} client(s) and no transfer target was given",
            self.name, self.clients_count
        ))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    /// Required on create, optional on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
