//! Mapping of ledger errors onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Handler error: a status plus a client-safe body.
///
/// Storage failures are logged in full server-side; clients only see a
/// generic message so internal details do not leak.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation { field, message } => {
                tracing::warn!("Validation error on {}: {}", field, message);
                Self {
                    status: StatusCode::BAD_REQUEST,
                    body: ErrorBody {
                        message,
                        field: Some(field.to_string()),
                    },
                }
            }
            LedgerError::NotFound { entity, id } => {
                let message = format!("{entity} not found: {id}");
                tracing::warn!("{}", message);
                Self {
                    status: StatusCode::NOT_FOUND,
                    body: ErrorBody {
                        message,
                        field: None,
                    },
                }
            }
            LedgerError::Storage(e) => {
                tracing::error!("Internal error: {:#}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        message: "Internal server error".to_string(),
                        field: None,
                    },
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        tracing::warn!("Rejected request body: {}", message);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                message,
                field: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validation_maps_to_bad_request_with_field() {
        let err = ApiError::from(LedgerError::validation("amount", "amount is required"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().field.as_deref(), Some("amount"));
        assert_eq!(err.body().message, "amount is required");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(LedgerError::not_found("chore", Uuid::nil()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.body().message.starts_with("chore not found"));
    }

    #[test]
    fn storage_errors_are_sanitized() {
        let err = ApiError::from(LedgerError::Storage(anyhow::anyhow!(
            "no such table: bills"
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().message, "Internal server error");
    }
}
