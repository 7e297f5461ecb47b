pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod models;
pub mod search;
pub mod session;
pub mod store;
pub mod ui;

use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwapOption;
use chrono::NaiveDate;
use config::Config;
use tracing::warn;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::domain::{guard, Navigation, Route};
use crate::models::{RecordId, RegisterRequest, TrashResource, User};
use crate::session::SessionStore;
use crate::ui::{Confirm, Feedback, Notice};

/// Everything a command needs, passed explicitly
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,
    /// Token given on the command line. Its owner is fetched from the
    /// backend and kept in memory only; the stored session is left alone.
    token_override: Option<String>,
    override_user: ArcSwapOption<User>,
}

impl AppState {
    /// Wire the stores together. The API client picks up the stored token
    /// unless `token_override` is given.
    pub fn new(config: Config, session: SessionStore, api: ApiClient, token_override: Option<String>) -> Self {
        api.set_token(token_override.clone().or_else(|| session.token()));
        Self {
            config,
            session,
            api,
            token_override,
            override_user: ArcSwapOption::empty(),
        }
    }

    /// Build from configuration: session file plus API client.
    pub fn open(config: Config, token_override: Option<String>) -> Result<Self> {
        let session = SessionStore::load(&config.session.state_file)?;
        let api = ApiClient::new(&config.api.base_url, config.api.timeout())?;
        Ok(Self::new(config, session, api, token_override))
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub fn has_token_override(&self) -> bool {
        self.token_override.is_some()
    }

    /// Who the commands act as: the owner of the override token once
    /// resolved, otherwise the signed-in user.
    pub fn current_user(&self) -> Option<User> {
        if self.has_token_override() {
            self.override_user.load_full().map(|user| User::clone(&user))
        } else {
            self.session.user()
        }
    }

    /// Run the navigation guard against the current user.
    pub fn navigate(&self, route: Route) -> Navigation {
        guard(route, self.current_user().as_ref())
    }

    /// Fetch the token owner's profile. It refreshes the cached profile of
    /// the stored session, or identifies the override token's owner.
    pub async fn refresh_profile(&self) -> ApiResult<User> {
        let user = self.api.profile().await?;
        if self.has_token_override() {
            self.override_user.store(Some(Arc::new(user.clone())));
        } else if let Err(e) = self.session.set_user(user.clone()) {
            warn!(error = %e, "Profile refreshed, but the session could not be saved");
        }
        Ok(user)
    }

    /// Identify the override token's owner before the first guarded page.
    /// Without an override the stored profile is used as is.
    pub async fn resolve_user(&self) -> ApiResult<()> {
        if self.has_token_override() && self.override_user.load().is_none() {
            self.refresh_profile().await?;
        }
        Ok(())
    }

    /// Sign in and return where to go next. On failure nothing is stored and
    /// the server's message is in the error.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Route> {
        let payload = self.api.login(email, password).await?;
        if let Err(e) = self.session.sign_in(payload.token, payload.user) {
            warn!(error = %e, "Signed in, but the session could not be saved");
        }
        Ok(Route::Dashboard)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<Route> {
        let payload = self.api.register(request).await?;
        if let Err(e) = self.session.sign_in(payload.token, payload.user) {
            warn!(error = %e, "Registered, but the session could not be saved");
        }
        Ok(Route::Dashboard)
    }

    /// Revoke server-side when possible; always forget the local session.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Server-side logout failed");
        }
        self.session.sign_out()
    }

    /// Turn a failed call into what the user sees. A 401 during a signed-in
    /// session ends that session; a rejected override token only forgets
    /// its owner.
    pub fn handle_error(&self, err: &ApiError) -> Feedback {
        if err.is_unauthorized() {
            if self.has_token_override() {
                self.override_user.store(None);
                return Feedback::Notice(Notice::error(format!(
                    "The token given with --token was rejected: {}",
                    err.user_message()
                )));
            }
            if self.session.is_authenticated() {
                if let Err(e) = self.session.expire() {
                    warn!(error = %e, "Failed to clear expired session");
                }
                self.api.set_token(None);
                return Feedback::SessionExpired;
            }
            return Feedback::Notice(Notice::error(err.user_message()));
        }
        Feedback::from(err)
    }

    /// Permanently delete from the recycle bin, only after the user typed the
    /// record id back. Returns false when they declined.
    pub async fn purge(
        &self,
        confirm: &dyn Confirm,
        resource: TrashResource,
        id: RecordId,
    ) -> Result<bool> {
        let prompt = format!(
            "Permanently delete {} #{}? This cannot be undone.",
            resource, id
        );
        if !confirm.confirm(&prompt, &id.to_string()).await? {
            return Ok(false);
        }
        self.api.force_delete(resource, id).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::testing::mock_backend;
    use crate::session::SessionState;
    use crate::ui::ScriptedConfirm;

    async fn app(router: Router, dir: &tempfile::TempDir) -> AppState {
        let api = mock_backend(router).await;
        let session = SessionStore::load(&dir.path().join("session.json")).unwrap();
        AppState::new(Config::default(), session, api, None)
    }

    fn auth_backend() -> Router {
        Router::new()
            .route(
                "/api/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "secret123" {
                        (
                            StatusCode::OK,
                            Json(json!({"data": {
                                "token": "tok-9",
                                "user": {"id": 3, "name": "Salma", "email": "salma@sga.ma", "role": "employee"}
                            }})),
                        )
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"message": "Identifiants invalides"})),
                        )
                    }
                }),
            )
            .route(
                "/api/clients/:id",
                get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated."}))) }),
            )
            .route(
                "/api/user",
                get(|headers: HeaderMap| async move {
                    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                        Some("Bearer tok-9") | Some("Bearer ci-token") => (
                            StatusCode::OK,
                            Json(json!({"data": {"id": 3, "name": "Salma", "email": "salma@sga.ma", "role": "employee"}})),
                        ),
                        _ => (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"message": "Unauthenticated."})),
                        ),
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_login_stores_token_and_goes_to_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(auth_backend(), &dir).await;

        let route = app.login("salma@sga.ma", "secret123").await.unwrap();
        assert_eq!(route, Route::Dashboard);
        assert_eq!(app.session.token().as_deref(), Some("tok-9"));

        let reloaded = SessionStore::load(&dir.path().join("session.json")).unwrap();
        assert!(reloaded.is_authenticated());

        // Employees are bounced off employee management
        assert_eq!(app.navigate(Route::Employees), Navigation::Redirect(Route::Dashboard));
        assert!(app.navigate(Route::Clients).is_allowed());
    }

    #[tokio::test]
    async fn test_invalid_login_shows_server_message_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(auth_backend(), &dir).await;

        let err = app.login("salma@sga.ma", "nope").await.unwrap_err();
        assert!(!app.session.is_authenticated());
        assert_eq!(
            app.handle_error(&err),
            Feedback::Notice(Notice::error("Identifiants invalides"))
        );
        assert_eq!(app.navigate(Route::Dashboard), Navigation::Redirect(Route::Login));
    }

    #[tokio::test]
    async fn test_unauthorized_during_session_expires_it() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(auth_backend(), &dir).await;
        app.login("salma@sga.ma", "secret123").await.unwrap();

        let err = app.api.get_client(1).await.unwrap_err();
        assert_eq!(app.handle_error(&err), Feedback::SessionExpired);
        assert!(!app.session.is_authenticated());
        assert!(!app.api.has_token());
    }

    #[tokio::test]
    async fn test_purge_requires_confirmation() {
        let calls: Arc<Mutex<u32>> = Arc::default();
        let counter = calls.clone();
        let router = Router::new().route(
            "/api/trash/clients/:id/force",
            delete(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock() += 1;
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let dir = tempfile::tempdir().unwrap();
        let app = app(router, &dir).await;

        let declined = ScriptedConfirm::new(["no"]);
        assert!(!app.purge(&declined, TrashResource::Clients, 12).await.unwrap());
        assert_eq!(*calls.lock(), 0);

        let accepted = ScriptedConfirm::new(["12"]);
        assert!(app.purge(&accepted, TrashResource::Clients, 12).await.unwrap());
        assert_eq!(*calls.lock(), 1);
        assert!(accepted.prompts()[0].contains("cannot be undone"));
    }

    #[test]
    fn test_stored_token_is_attached_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState {
            token: Some("persisted".to_string()),
            ..Default::default()
        };
        let session = SessionStore::with_state(&dir.path().join("s.json"), state);
        let api = ApiClient::new("http://localhost:1/api", std::time::Duration::from_secs(1)).unwrap();
        let app = AppState::new(Config::default(), session, api, None);
        assert!(app.api.has_token());
    }

    #[tokio::test]
    async fn test_token_override_acts_as_its_owner_without_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let api = mock_backend(auth_backend()).await;
        let session = SessionStore::load(&dir.path().join("session.json")).unwrap();
        let app = AppState::new(Config::default(), session, api, Some("ci-token".to_string()));

        assert_eq!(app.navigate(Route::Clients), Navigation::Redirect(Route::Login));
        app.resolve_user().await.unwrap();
        assert!(app.navigate(Route::Clients).is_allowed());
        assert_eq!(app.navigate(Route::Employees), Navigation::Redirect(Route::Dashboard));

        // Nothing about the override reaches the session file
        assert!(!app.session.is_authenticated());
        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn test_rejected_override_keeps_stored_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let stored = SessionStore::load(&path).unwrap();
        stored
            .sign_in(
                "good-stored".to_string(),
                User {
                    id: 1,
                    name: "Admin".to_string(),
                    email: "admin@sga.ma".to_string(),
                    role: crate::models::Role::Admin,
                },
            )
            .unwrap();

        let api = mock_backend(auth_backend()).await;
        let app = AppState::new(Config::default(), stored, api, Some("bad-override".to_string()));

        let err = app.resolve_user().await.unwrap_err();
        let feedback = app.handle_error(&err);
        assert!(matches!(feedback, Feedback::Notice(ref n) if n.message.contains("--token")));
        assert_eq!(app.navigate(Route::Clients), Navigation::Redirect(Route::Login));

        assert!(app.session.is_authenticated());
        let reloaded = SessionStore::load(&path).unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("good-stored"));
    }

    #[tokio::test]
    async fn test_profile_refresh_updates_cached_user() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(auth_backend(), &dir).await;
        app.login("salma@sga.ma", "secret123").await.unwrap();

        let user = app.refresh_profile().await.unwrap();
        assert_eq!(user.name, "Salma");
        let reloaded = SessionStore::load(&dir.path().join("session.json")).unwrap();
        assert_eq!(reloaded.user().map(|u| u.id), Some(3));
    }
}
