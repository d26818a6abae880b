/*!
 * # Errors
 *
 * Permission checks never fail: absent sessions, unknown role levels and
 * malformed input all resolve to "denied". The types here cover the
 * boundaries around the engine: parsing untyped permission strings and
 * classifying authorization failures reported by the backend API.
 */

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Error parsing a `resource:action[:context]` permission string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionParseError {
    #[error("Malformed permission string: {0:?}")]
    Malformed(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown context: {0}")]
    UnknownContext(String),
}

/// What the calling page should do after a failed backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDisposition {
    /// Session is gone; send the user to sign in again.
    RedirectToLogin,
    /// The backend refused the record; leave the page without rendering partial data.
    NavigateAway,
    /// Any other failure is surfaced by the page itself.
    ShowError,
}

/// Backend failure, classified by HTTP status.
///
/// Client-side capability flags are an optimistic hint. A 403 from the
/// backend is the authoritative answer and is expected, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    #[error("Authentication required: {message}")]
    Unauthenticated { message: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Request failed with status {status}: {message}")]
    Other { status: StatusCode, message: String },
}

impl ApiFailure {
    /// Classify a non-success response. Returns `None` for success statuses.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        let message = message.into();
        let failure = match status {
            StatusCode::UNAUTHORIZED => ApiFailure::Unauthenticated { message },
            StatusCode::FORBIDDEN => ApiFailure::AccessDenied { message },
            status => ApiFailure::Other { status, message },
        };

        tracing::debug!(status = %status, error = %failure, "backend request failed");
        Some(failure)
    }

    pub fn disposition(&self) -> FailureDisposition {
        match self {
            ApiFailure::Unauthenticated { .. } => FailureDisposition::RedirectToLogin,
            ApiFailure::AccessDenied { .. } => FailureDisposition::NavigateAway,
            ApiFailure::Other { .. } => FailureDisposition::ShowError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiFailure::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ApiFailure::Other { status, .. } => *status,
        }
    }
}
