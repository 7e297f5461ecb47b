//! Authentication endpoints.

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{AuthPayload, LoginRequest, RegisterRequest, User};

impl ApiClient {
    /// Exchange credentials for a token. On success the token is attached
    /// to every following request from this client.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthPayload> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let payload: AuthPayload = self.post_data("/login", &request).await?;
        self.set_token(Some(payload.token.clone()));
        Ok(payload)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthPayload> {
        let payload: AuthPayload = self.post_data("/register", request).await?;
        self.set_token(Some(payload.token.clone()));
        Ok(payload)
    }

    /// Profile of whoever owns the current token
    pub async fn profile(&self) -> ApiResult<User> {
        self.get_data("/user", &[]).await
    }

    /// Revoke the token server-side. The local token is dropped whatever
    /// the outcome.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.execute(Method::POST, "/logout", &[]).await;
        self.set_token(None);
        result
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::api::error::ApiError;
    use crate::api::testing::mock_backend;

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "secret123" {
                        (
                            StatusCode::OK,
                            Json(json!({"data": {
                                "token": "tok-1",
                                "user": {"id": 1, "name": "Admin", "email": body["email"], "role": "admin"}
                            }})),
                        )
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"message": "These credentials do not match our records."})),
                        )
                    }
                }),
            )
            .route(
                "/api/whoami",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({"data": auth}))
                }),
            )
            .route(
                "/api/user",
                get(|headers: HeaderMap| async move {
                    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                        Some("Bearer tok-1") => (
                            StatusCode::OK,
                            Json(json!({"data": {"id": 1, "name": "Admin", "email": "admin@sga.ma", "role": "admin"}})),
                        ),
                        _ => (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"message": "Unauthenticated."})),
                        ),
                    }
                }),
            )
            .route("/api/logout", post(|| async { StatusCode::NO_CONTENT }))
    }

    #[tokio::test]
    async fn test_login_attaches_bearer_token() {
        let client = mock_backend(backend()).await;

        let payload = client.login("admin@sga.ma", "secret123").await.unwrap();
        assert_eq!(payload.token, "tok-1");
        assert!(payload.user.is_admin());

        let auth: String = client.get_data("/whoami", &[]).await.unwrap();
        assert_eq!(auth, "Bearer tok-1");
    }

    #[tokio::test]
    async fn test_invalid_credentials_surface_server_message() {
        let client = mock_backend(backend()).await;

        let err = client.login("admin@sga.ma", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.user_message(), "These credentials do not match our records.");
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_logout_drops_token() {
        let client = mock_backend(backend()).await;
        client.login("admin@sga.ma", "secret123").await.unwrap();
        client.logout().await.unwrap();
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_profile_belongs_to_token_owner() {
        let client = mock_backend(backend()).await;
        assert!(client.profile().await.unwrap_err().is_unauthorized());

        client.set_token(Some("tok-1".to_string()));
        let user = client.profile().await.unwrap();
        assert_eq!(user.email, "admin@sga.ma");
        assert!(user.is_admin());
    }
}
