//! HTTP error type and its translation into response envelopes.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, warn};

use discoteca_core::CoreError;
use discoteca_core::validation::{FieldError, ValidationError};
use discoteca_storage::StoreError;

use crate::response::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] CoreError),
  /// Carries the request path that matched no route.
  #[error("The requested endpoint '{0}' does not exist")]
  UnmatchedRoute(String),
  #[error("{0}")]
  Unexpected(String),
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self {
    ApiError::Core(CoreError::Validation(e))
  }
}

impl From<StoreError> for ApiError {
  fn from(e: StoreError) -> Self {
    ApiError::Core(e.into())
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ValidationError::single("body", rejection.body_text()).into()
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ValidationError::single("query", rejection.body_text()).into()
  }
}

impl From<tokio::task::JoinError> for ApiError {
  fn from(e: tokio::task::JoinError) -> Self {
    ApiError::Unexpected(e.to_string())
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(e: serde_json::Error) -> Self {
    ApiError::Unexpected(e.to_string())
  }
}

fn field_errors(errors: &[FieldError]) -> Value {
  Value::Array(errors.iter().map(|e| json!({"path": e.path, "message": e.message})).collect())
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let envelope = match self {
      ApiError::Core(CoreError::Validation(err)) => {
        warn!(%err, "rejected invalid request");
        Envelope::error(StatusCode::BAD_REQUEST, "Validation error")
          .with("errors", field_errors(&err.errors))
      }
      ApiError::Core(CoreError::NotFound(message)) => {
        warn!(%message, "resource not found");
        Envelope::error(StatusCode::NOT_FOUND, message)
      }
      ApiError::Core(CoreError::Repository(detail)) => {
        error!(%detail, "database operation failed");
        Envelope::error(
          StatusCode::INTERNAL_SERVER_ERROR,
          "Database operation failed",
        )
        .with("error", Value::String(detail))
      }
      ApiError::UnmatchedRoute(ref path) => {
        warn!(%path, "no route matched");
        let detail = self.to_string();
        Envelope::error(StatusCode::NOT_FOUND, "Not Found")
          .with("error", Value::String(detail))
      }
      ApiError::Unexpected(detail) => {
        error!(%detail, "unexpected error");
        Envelope::error(
          StatusCode::INTERNAL_SERVER_ERROR,
          "An unexpected error occurred",
        )
        .with("error", Value::String(detail))
      }
    };

    envelope.into_response()
  }
}
