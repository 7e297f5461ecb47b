//! Error classification for backend responses.
//!
//! Every failed call is sorted into one of the categories the views know how
//! to present: field-keyed validation errors, authentication/authorization
//! failures, missing records, and everything else as a generic failure.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Shown when the server gives no usable message
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Shown when a failed download carries no readable message
pub const GENERIC_DOWNLOAD_ERROR: &str = "The file could not be generated. Please try again.";

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Server,
    Network,
    Decode,
}

impl ErrorCode {
    /// Category for a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            422 => ErrorCode::Validation,
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            _ => ErrorCode::Server,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Validation => "validation_error",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Server => "server_error",
            ErrorCode::Network => "network_error",
            ErrorCode::Decode => "decode_error",
        }
    }
}

/// Field-keyed validation messages, as the backend's 422 responses carry them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    message: Option<String>,
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new(message: Option<String>, fields: BTreeMap<String, Vec<String>>) -> Self {
        Self { message, fields }
    }

    pub fn builder() -> ValidationErrorBuilder {
        ValidationErrorBuilder::default()
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One-line description: the server's message, the only field message,
    /// or a count of failing fields.
    pub fn summary(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if self.fields.len() == 1 {
            self.fields
                .values()
                .next()
                .and_then(|v| v.first())
                .cloned()
                .unwrap_or_else(|| "Validation failed".to_string())
        } else {
            format!("Validation failed for {} fields", self.fields.len())
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Builder for collecting client-side form errors before a request is sent
#[derive(Debug, Default)]
pub struct ValidationErrorBuilder {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrorBuilder {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn build(self) -> Option<ValidationErrors> {
        if self.errors.is_empty() {
            None
        } else {
            Some(ValidationErrors::new(None, self.errors))
        }
    }

    /// Ok(()) if nothing was added
    pub fn finish(self) -> Result<(), ValidationErrors> {
        match self.build() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Failure of a backend call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error body as the backend renders it (`{message, errors}`), with the
/// occasional `{error}` from middleware.
#[derive(Debug, Default, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ServerErrorBody {
    fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    fn message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = ServerErrorBody::parse(body).unwrap_or_default();
        let message = parsed.message();

        match ErrorCode::from_status(status) {
            ErrorCode::Validation => ApiError::Validation(ValidationErrors::new(
                message,
                parsed.errors.unwrap_or_default(),
            )),
            ErrorCode::Unauthorized => ApiError::Unauthorized {
                message: message.unwrap_or_else(|| "Unauthenticated.".to_string()),
            },
            ErrorCode::Forbidden => ApiError::Forbidden {
                message: message.unwrap_or_else(|| "Access denied.".to_string()),
            },
            ErrorCode::NotFound => ApiError::NotFound {
                message: message.unwrap_or_else(|| "Record not found.".to_string()),
            },
            _ => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| GENERIC_ERROR.to_string()),
            },
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::Validation,
            ApiError::Unauthorized { .. } => ErrorCode::Unauthorized,
            ApiError::Forbidden { .. } => ErrorCode::Forbidden,
            ApiError::NotFound { .. } => ErrorCode::NotFound,
            ApiError::Server { .. } => ErrorCode::Server,
            ApiError::Network(_) => ErrorCode::Network,
            ApiError::Decode(_) => ErrorCode::Decode,
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.summary(),
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code() == ErrorCode::Unauthorized
    }
}

/// Message carried by a download that came back as an error.
///
/// Such payloads are usually JSON wrapped as a binary blob; anything that
/// does not parse yields the generic download message.
pub fn download_error_message(body: &[u8]) -> String {
    ServerErrorBody::parse(body)
        .and_then(|b| b.message())
        .unwrap_or_else(|| GENERIC_DOWNLOAD_ERROR.to_string())
}
