use super::protocol::{ErrorResponse, STATUS_ERROR};
use crate::config::Environment;
use crate::items::types::PayloadError;
use crate::items::validator::ValidationError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every failure a handler can return, mapped onto an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// A request the framework refused (oversized or malformed body).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Wraps an unexpected failure. The error chain is only kept for the
    /// response body in development.
    pub fn internal(
        message: impl Into<String>,
        err: &dyn std::error::Error,
        environment: Environment,
    ) -> Self {
        let detail = environment
            .is_development()
            .then(|| format!("{:?}", err));
        Self::Internal {
            message: message.into(),
            detail,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Payload(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let rule = match &self {
            Self::Validation(err) => Some(err.rule()),
            _ => None,
        };
        let detail = match &self {
            Self::Internal { detail, .. } => detail.clone(),
            _ => None,
        };

        let body = ErrorResponse {
            status: STATUS_ERROR,
            message: self.to_string(),
            rule,
            detail,
        };
        (status, Json(body)).into_response()
    }
}
