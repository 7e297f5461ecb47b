//! Activity log listing.

use super::{ApiClient, ApiResult};
use crate::models::{ActivityFilter, ActivityLog, Paginated};

impl ApiClient {
    pub async fn list_activity_logs(&self, filter: &ActivityFilter) -> ApiResult<Paginated<ActivityLog>> {
        self.get_page("/activity-logs", &filter.query()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use crate::api::testing::mock_backend;
    use crate::models::{ActivityAction, ActivityFilter};

    #[tokio::test]
    async fn test_filters_are_sent_as_query() {
        let router = Router::new().route(
            "/api/activity-logs",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q.get("page").map(String::as_str), Some("2"));
                assert_eq!(q.get("action").map(String::as_str), Some("deleted"));
                assert_eq!(q.get("subject_type").map(String::as_str), Some("Client"));
                Json(json!({"data": {
                    "data": [{
                        "id": 31,
                        "causer": {"id": 1, "name": "Admin"},
                        "event": "deleted",
                        "subject_type": "App\\Models\\Client",
                        "subject_id": 8,
                        "properties": {"old": {"name": "Karim"}},
                        "created_at": "2024-05-02T10:15:00.000000Z"
                    }],
                    "current_page": 2, "last_page": 2, "total": 16
                }}))
            }),
        );
        let client = mock_backend(router).await;

        let page = client
            .list_activity_logs(&ActivityFilter {
                action: Some(ActivityAction::Deleted),
                subject_type: Some("Client".to_string()),
                page: 2,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 16);
        assert_eq!(page.data[0].subject_label(), "Client");
        assert_eq!(page.data[0].changes.changes()[0].field, "name");
    }
}
