//! Recycle bin: list, restore, purge.

use reqwest::Method;
use tracing::warn;

use super::{ApiClient, ApiResult};
use crate::models::{Paginated, RecordId, TrashResource, TrashedRecord};

impl ApiClient {
    pub async fn list_trash(&self, resource: TrashResource, page: u32) -> ApiResult<Paginated<TrashedRecord>> {
        let query = [("page", page.max(1).to_string())];
        self.get_page(&format!("/trash/{}", resource.segment()), &query)
            .await
    }

    pub async fn restore(&self, resource: TrashResource, id: RecordId) -> ApiResult<()> {
        let path = format!("/trash/{}/{}/restore", resource.segment(), id);
        self.execute(Method::POST, &path, &[]).await
    }

    /// Permanent removal. Callers must have confirmed with the user first;
    /// there is no way back.
    pub async fn force_delete(&self, resource: TrashResource, id: RecordId) -> ApiResult<()> {
        warn!(%resource, id, "Permanently deleting record");
        let path = format!("/trash/{}/{}/force", resource.segment(), id);
        self.execute(Method::DELETE, &path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::json;

    use crate::api::testing::mock_backend;
    use crate::models::TrashResource;

    type Log = Arc<Mutex<Vec<String>>>;

    #[tokio::test]
    async fn test_trash_paths_per_resource() {
        let log: Log = Arc::default();
        let router = Router::new()
            .route(
                "/api/trash/:resource",
                get(|Path(resource): Path<String>| async move {
                    Json(json!({"data": {
                        "data": [{"id": 3, "name": resource, "deleted_at": "2024-05-01T08:00:00.000000Z"}],
                        "current_page": 1, "last_page": 1, "total": 1
                    }}))
                }),
            )
            .route(
                "/api/trash/:resource/:id/restore",
                post(|State(log): State<Log>, Path((resource, id)): Path<(String, u64)>| async move {
                    log.lock().push(format!("restore {} {}", resource, id));
                    StatusCode::NO_CONTENT
                }),
            )
            .route(
                "/api/trash/:resource/:id/force",
                delete(|State(log): State<Log>, Path((resource, id)): Path<(String, u64)>| async move {
                    log.lock().push(format!("force {} {}", resource, id));
                    StatusCode::NO_CONTENT
                }),
            )
            .with_state(log.clone());
        let client = mock_backend(router).await;

        let page = client.list_trash(TrashResource::Subscriptions, 1).await.unwrap();
        assert_eq!(page.data[0].name.as_deref(), Some("abonnements"));

        client.restore(TrashResource::Clients, 3).await.unwrap();
        client.force_delete(TrashResource::Employees, 4).await.unwrap();

        assert_eq!(
            log.lock().clone(),
            vec!["restore clients 3".to_string(), "force employees 4".to_string()]
        );
    }
}
