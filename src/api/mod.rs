//! REST client for the SGA backend.
//!
//! Responses come wrapped as `{data: ...}`, and lists as
//! `{data: {data: [...], current_page, last_page, total}}`. Every non-success
//! status is turned into an [`ApiError`] category; nothing is retried.

pub mod activity;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod subscriptions;
pub mod trash;

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub use error::{ApiError, ErrorCode, ValidationErrors};

use crate::models::{Envelope, Paginated};
use error::download_error_message;

pub type ApiResult<T> = Result<T, ApiError>;

type Query<'a> = &'a [(&'static str, String)];

/// A binary file returned by an export or receipt endpoint
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, when the server names the file
    pub filename: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    token: ArcSwapOption<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: ArcSwapOption::empty(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token attached to every following request
    pub fn set_token(&self, token: Option<String>) {
        self.token.store(token.map(Arc::new));
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token.load_full() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send and classify failures. Success responses are handed back as-is.
    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API call");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method.clone(), path).query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(method, path, builder).await?;
        Self::decode(response).await
    }

    /// `GET` a single record out of its envelope
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str, query: Query<'_>) -> ApiResult<T> {
        let envelope: Envelope<T> = self.call::<(), _>(Method::GET, path, query, None).await?;
        Ok(envelope.data)
    }

    /// `GET` one page of a list
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ApiResult<Paginated<T>> {
        self.get_data(path, query).await
    }

    pub(crate) async fn post_data<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let envelope: Envelope<T> = self.call(Method::POST, path, &[], Some(body)).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn put_data<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let envelope: Envelope<T> = self.call(Method::PUT, path, &[], Some(body)).await?;
        Ok(envelope.data)
    }

    /// Call whose response body is irrelevant (deletes, logout, restore)
    pub(crate) async fn execute(&self, method: Method, path: &str, query: Query<'_>) -> ApiResult<()> {
        let builder = self.request(method.clone(), path).query(query);
        self.send(method, path, builder).await?;
        Ok(())
    }

    /// Fetch a binary payload.
    ///
    /// A failed download often still arrives as a blob; its body is parsed
    /// for a JSON `message`. A JSON body on a success status is treated the
    /// same way, since a real export is never JSON.
    pub(crate) async fn download(&self, path: &str, query: Query<'_>) -> ApiResult<Download> {
        let builder = self
            .request(Method::GET, path)
            .header(ACCEPT, "*/*")
            .query(query);
        let response = builder.send().await?;
        let status = response.status();
        debug!(method = "GET", path, status = status.as_u16(), "API download");

        let content_type = header_str(response.headers(), CONTENT_TYPE.as_str());
        let filename = header_str(response.headers(), CONTENT_DISPOSITION.as_str())
            .and_then(|d| disposition_filename(&d));
        let bytes = response.bytes().await?;

        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"));

        if !status.is_success() {
            return Err(match ApiError::from_response(status.as_u16(), &bytes) {
                ApiError::Server { status, .. } => ApiError::Server {
                    status,
                    message: download_error_message(&bytes),
                },
                other => other,
            });
        }
        if is_json {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: download_error_message(&bytes),
            });
        }

        Ok(Download {
            bytes,
            content_type,
            filename,
        })
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `attachment; filename="dashboard-2024-05.xlsx"` → `dashboard-2024-05.xlsx`
fn disposition_filename(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-process mock backend for client tests.

    use axum::Router;

    use super::ApiClient;

    /// Serve `router` on an ephemeral port and return a client pointed at it.
    pub async fn mock_backend(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(&format!("http://{}/api", addr), std::time::Duration::from_secs(5)).unwrap()
    }
}
