//! JSON response envelope shared by every endpoint.
//!
//! Success bodies look like `{"success": true, "message": "Success", ...}` and
//! error bodies like `{"success": false, "message": "...", ...}`. Extra fields
//! are spread at the top level next to `success` and `message`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct Envelope {
  status: StatusCode,
  body: Map<String, Value>,
}

impl Envelope {
  /// `{success: true}` with no message, status 200.
  pub fn ok() -> Self {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    Self { status: StatusCode::OK, body }
  }

  /// `{success: true, message: "Success"}`, status 200.
  pub fn success() -> Self {
    Self::ok().with_message("Success")
  }

  pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(false));
    Self { status, body }.with_message(message)
  }

  pub fn with_message(self, message: impl Into<String>) -> Self {
    self.with("message", Value::String(message.into()))
  }

  pub fn with_status(mut self, status: StatusCode) -> Self {
    self.status = status;
    self
  }

  /// Sets a top-level field to an already built JSON value.
  pub fn with(mut self, key: &str, value: Value) -> Self {
    self.body.insert(key.to_string(), value);
    self
  }

  /// Serializes `value` into a top-level field.
  pub fn field<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Result<Self, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    Ok(self.with(key, value))
  }

  pub fn status(&self) -> StatusCode {
    self.status
  }

  pub fn body(&self) -> &Map<String, Value> {
    &self.body
  }
}

impl IntoResponse for Envelope {
  fn into_response(self) -> Response {
    (self.status, Json(Value::Object(self.body))).into_response()
  }
}
