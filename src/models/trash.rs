//! Recycle bin resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Identified, RecordId};

/// Entity types that have a recycle bin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrashResource {
    Clients,
    Subscriptions,
    Employees,
}

impl TrashResource {
    /// Path segment under `/trash/`
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Subscriptions => "abonnements",
            Self::Employees => "employees",
        }
    }
}

impl std::fmt::Display for TrashResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clients => write!(f, "clients"),
            Self::Subscriptions => write!(f, "subscriptions"),
            Self::Employees => write!(f, "employees"),
        }
    }
}

impl std::str::FromStr for TrashResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clients" | "client" => Ok(Self::Clients),
            "subscriptions" | "subscription" | "abonnements" => Ok(Self::Subscriptions),
            "employees" | "employee" => Ok(Self::Employees),
            _ => Err(format!("Unknown recycle bin: {}", s)),
        }
    }
}

/// A soft-deleted record, whatever its type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrashedRecord {
    pub id: RecordId,
    /// Client/employee name, or the subscription's client name
    #[serde(default, alias = "client_name")]
    pub name: Option<String>,
    pub deleted_at: DateTime<Utc>,
}

impl Identified for TrashedRecord {
    fn id(&self) -> RecordId {
        self.id
    }
}
