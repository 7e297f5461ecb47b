//! Dashboard snapshot and spreadsheet export.

use super::{ApiClient, ApiResult, Download};
use crate::models::{DashboardFilter, DashboardSnapshot};

impl ApiClient {
    pub async fn dashboard(&self, filter: &DashboardFilter) -> ApiResult<DashboardSnapshot> {
        self.get_data("/dashboard", &filter.query()).await
    }

    /// Same filter as the snapshot, rendered server-side as a spreadsheet
    pub async fn export_dashboard(&self, filter: &DashboardFilter) -> ApiResult<Download> {
        self.download("/dashboard/export", &filter.query()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use crate::api::testing::mock_backend;
    use crate::models::{DashboardFilter, OfferType};

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/dashboard",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(q.get("year").map(String::as_str), Some("2024"));
                    assert_eq!(q.get("month").map(String::as_str), Some("5"));
                    assert!(!q.contains_key("employee_id"));
                    Json(json!({"data": {
                        "financial": {"total_revenue": "12500.50", "period_revenue": 1800, "previous_period_revenue": 1500},
                        "clients": {"total_clients": 42, "new_clients": 5},
                        "revenue_history": [{"label": "2024-04", "revenue": 1500}, {"label": "2024-05", "revenue": 1800}],
                        "subscription_distribution": [{"offer_type": "Monthly", "count": 20}],
                        "leaderboard": [{"employee_id": 2, "name": "Youssef", "revenue": 900}],
                        "expiring": [{"id": 3, "client_name": "Karim", "offer_type": "Annual", "end_date": "2024-05-20"}]
                    }}))
                }),
            )
            .route(
                "/api/dashboard/export",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    if q.contains_key("employee_id") {
                        return (
                            StatusCode::FORBIDDEN,
                            Json(json!({"message": "Export restricted to administrators"})),
                        )
                            .into_response();
                    }
                    (
                        [(header::CONTENT_TYPE, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")],
                        b"PK\x03\x04".to_vec(),
                    )
                        .into_response()
                }),
            )
    }

    #[tokio::test]
    async fn test_dashboard_snapshot_decodes() {
        let client = mock_backend(backend()).await;
        let filter = DashboardFilter {
            employee_id: None,
            year: Some(2024),
            month: Some(5),
        };

        let snapshot = client.dashboard(&filter).await.unwrap();
        assert_eq!(snapshot.financial.total_revenue, 12500.5);
        assert_eq!(snapshot.clients.total_clients, 42);
        assert_eq!(snapshot.revenue_history.len(), 2);
        assert_eq!(snapshot.subscription_distribution[0].offer_type, OfferType::Monthly);
        assert_eq!(snapshot.expiring[0].client_name, "Karim");
    }

    #[tokio::test]
    async fn test_export_returns_bytes_or_message() {
        let client = mock_backend(backend()).await;

        let file = client.export_dashboard(&DashboardFilter::default()).await.unwrap();
        assert_eq!(&file.bytes[..], b"PK\x03\x04");

        let err = client
            .export_dashboard(&DashboardFilter {
                employee_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Export restricted to administrators");
    }
}
