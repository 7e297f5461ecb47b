//! How a failure (or success) is shown to the user.

use crate::api::error::{ApiError, ValidationErrors, GENERIC_ERROR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    fn tag(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "[OK]",
            NoticeLevel::Info => "[i]",
            NoticeLevel::Warning => "[!]",
            NoticeLevel::Error => "[!!]",
        }
    }
}

/// Transient, dismissible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    /// Successes go to stdout with the page; everything else to stderr.
    pub fn print(&self) {
        match self.level {
            NoticeLevel::Success => println!("{}", self),
            _ => eprintln!("{}", self),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.level.tag(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Shown under each offending field; other input is kept
    FieldErrors(ValidationErrors),
    /// 401 during a signed-in session
    SessionExpired,
    /// 403 on a record
    AccessDenied(String),
    /// 404: a dedicated state with a way back
    NotFound(String),
    Notice(Notice),
}

impl From<&ApiError> for Feedback {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Validation(errors) => Feedback::FieldErrors(errors.clone()),
            ApiError::Unauthorized { .. } => Feedback::SessionExpired,
            ApiError::Forbidden { message } => Feedback::AccessDenied(message.clone()),
            ApiError::NotFound { message } => Feedback::NotFound(message.clone()),
            ApiError::Server { message, .. } => Feedback::Notice(Notice::error(message.clone())),
            ApiError::Network(_) | ApiError::Decode(_) => {
                Feedback::Notice(Notice::error(GENERIC_ERROR))
            }
        }
    }
}

impl Feedback {
    /// Lines to print, without trailing newline
    pub fn render(&self) -> Vec<String> {
        match self {
            Feedback::FieldErrors(errors) => {
                let mut lines = vec![format!("[!!] {}", errors.summary())];
                for (field, messages) in errors.fields() {
                    for message in messages {
                        lines.push(format!("     {:<14} {}", field, message));
                    }
                }
                lines
            }
            Feedback::SessionExpired => vec![
                "[!!] Your session has expired. Please sign in again with 'sga login'.".to_string(),
            ],
            Feedback::AccessDenied(message) => vec![
                format!("[!!] Access denied: {}", message),
                "     You do not have permission to view this record.".to_string(),
            ],
            Feedback::NotFound(message) => vec![
                format!("[!!] {}", message),
                "     The record may have been deleted. Go back to the list to continue.".to_string(),
            ],
            Feedback::Notice(notice) => vec![notice.to_string()],
        }
    }

    pub fn print(&self) {
        for line in self.render() {
            eprintln!("{}", line);
        }
    }
}
