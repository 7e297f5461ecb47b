//! Activity log entries. Read-only, computed by the backend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Identified, RecordId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" | "create" => Ok(Self::Created),
            "updated" | "update" => Ok(Self::Updated),
            "deleted" | "delete" => Ok(Self::Deleted),
            _ => Err(format!("Unknown activity action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActorRef {
    pub id: RecordId,
    pub name: String,
}

/// Before/after snapshot of the attributes an action touched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyDiff {
    #[serde(default, alias = "old")]
    pub before: BTreeMap<String, serde_json::Value>,
    #[serde(default, alias = "attributes")]
    pub after: BTreeMap<String, serde_json::Value>,
}

/// One changed attribute
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange<'a> {
    pub field: &'a str,
    pub before: Option<&'a serde_json::Value>,
    pub after: Option<&'a serde_json::Value>,
}

impl PropertyDiff {
    /// Attributes whose value differs between the two snapshots, in key order.
    /// Created entries only have `after`, deleted ones only `before`.
    pub fn changes(&self) -> Vec<FieldChange<'_>> {
        let mut keys: Vec<&String> = self.before.keys().chain(self.after.keys()).collect();
        keys.sort();
        keys.dedup();

        keys.into_iter()
            .filter_map(|key| {
                let before = self.before.get(key);
                let after = self.after.get(key);
                (before != after).then_some(FieldChange {
                    field: key.as_str(),
                    before,
                    after,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLog {
    pub id: RecordId,
    #[serde(default, alias = "causer", alias = "user")]
    pub actor: Option<ActorRef>,
    #[serde(alias = "event", alias = "description")]
    pub action: ActivityAction,
    pub subject_type: String,
    #[serde(default)]
    pub subject_id: Option<RecordId>,
    #[serde(default, alias = "properties")]
    pub changes: PropertyDiff,
    pub created_at: DateTime<Utc>,
}

impl Identified for ActivityLog {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl ActivityLog {
    pub fn actor_name(&self) -> &str {
        self.actor.as_ref().map(|a| a.name.as_str()).unwrap_or("system")
    }

    /// `App\Models\Client` becomes `Client`
    pub fn subject_label(&self) -> &str {
        self.subject_type
            .rsplit(['\\', '/', ':'])
            .next()
            .unwrap_or(&self.subject_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    pub action: Option<ActivityAction>,
    pub subject_type: Option<String>,
    pub page: u32,
}

impl ActivityFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.max(1).to_string())];
        if let Some(action) = self.action {
            query.push(("action", action.as_str().to_string()));
        }
        if let Some(subject) = &self.subject_type {
            query.push(("subject_type", subject.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changes_only_lists_modified_keys() {
        let diff: PropertyDiff = serde_json::from_value(json!({
            "old": {"name": "Amal", "phone": "0600", "address": "Rabat"},
            "attributes": {"name": "Amal", "phone": "0611", "email": "a@x.ma"}
        }))
        .unwrap();

        let changes = diff.changes();
        let fields: Vec<&str> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["address", "email", "phone"]);
        assert_eq!(changes[0].after, None);
        assert_eq!(changes[1].before, None);
    }

    #[test]
    fn test_log_from_backend_shape() {
        let log: ActivityLog = serde_json::from_value(json!({
            "id": 7,
            "causer": {"id": 1, "name": "Admin"},
            "event": "updated",
            "subject_type": "App\\Models\\Abonnement",
            "subject_id": 12,
            "properties": {"old": {"status": "Active"}, "attributes": {"status": "Cancelled"}},
            "created_at": "2024-05-02T10:15:00.000000Z"
        }))
        .unwrap();

        assert_eq!(log.action, ActivityAction::Updated);
        assert_eq!(log.actor_name(), "Admin");
        assert_eq!(log.subject_label(), "Abonnement");
        assert_eq!(log.changes.changes().len(), 1);
    }
}
