use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Unauthorized,
    Forbidden,
    Network,
    Decode,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::Decode => write!(f, "Decode"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured error shared by the API client, the page cache and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Forbidden, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Decode, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::InternalError, message)
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// The backend reports failures as `{"detail": "..."}`. Validation
    /// failures carry a list of `{"loc": [...], "msg": "..."}` objects in
    /// `detail` instead, which are folded into `field_errors` keyed by the
    /// last path segment.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned());

        let message = match &detail {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => default_status_message(status).to_string(),
        };

        match status {
            400 => Self::bad_request(message),
            401 => Self::unauthorized(message),
            403 => Self::forbidden(message),
            404 => Self::not_found(message),
            422 => {
                let field_errors = match &detail {
                    Some(serde_json::Value::Array(items)) => collect_field_errors(items),
                    _ => HashMap::new(),
                };
                Self::validation(message, field_errors)
            }
            _ => Self::internal(message),
        }
    }

    /// Extract a user-friendly message suitable for a toast or error card.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            AppErrorKind::Network => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AppErrorKind::Decode | AppErrorKind::InternalError if self.message.is_empty() => {
                "Something went wrong. Please try again.".to_string()
            }
            _ => self.message.clone(),
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            AppErrorKind::Network | AppErrorKind::InternalError | AppErrorKind::Decode
        )
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Not authenticated",
        403 => "Not enough permissions",
        404 => "Not found",
        422 => "Validation failed",
        _ => "Something went wrong. Please try again.",
    }
}

fn collect_field_errors(items: &[serde_json::Value]) -> HashMap<String, String> {
    let mut field_errors = HashMap::new();
    for item in items {
        let field = item
            .get("loc")
            .and_then(|loc| loc.as_array())
            .and_then(|loc| loc.last())
            .map(|seg| match seg {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        let msg = item.get("msg").and_then(|m| m.as_str());
        if let (Some(field), Some(msg)) = (field, msg) {
            field_errors.entry(field).or_insert_with(|| msg.to_string());
        }
    }
    field_errors
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}
