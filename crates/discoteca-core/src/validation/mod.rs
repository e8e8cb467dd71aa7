//! Payload validation.
//!
//! Validators take the raw JSON body and either return a typed payload or a
//! [`ValidationError`] carrying one [`FieldError`] per offending field. Every
//! field is checked so a client sees all problems at once.

mod artist;
mod release;

pub use artist::validate_artist;
pub use release::validate_release;

use serde::Serialize;
use serde_json::{Map, Value};

/// One rejected field: its path in the payload and a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub path: String,
  pub message: String,
}

impl FieldError {
  pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self { path: path.into(), message: message.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationError {
  pub errors: Vec<FieldError>,
}

impl ValidationError {
  pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self { errors: vec![FieldError::new(path, message)] }
  }

  /// True if some entry targets `path`.
  pub fn has_path(&self, path: &str) -> bool {
    self.errors.iter().any(|e| e.path == path)
  }
}

fn summary(errors: &[FieldError]) -> String {
  errors.iter().map(|e| format!("{}: {}", e.path, e.message)).collect::<Vec<_>>().join(", ")
}

/// Name of a JSON value's type as reported in "Expected x, received y" messages.
fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Bounds and messages for a trimmed string field.
struct TextRule {
  required: &'static str,
  max: usize,
  too_long: Option<&'static str>,
}

impl TextRule {
  const fn new(required: &'static str, max: usize) -> Self {
    Self { required, max, too_long: None }
  }

  const fn too_long(mut self, message: &'static str) -> Self {
    self.too_long = Some(message);
    self
  }
}

/// Accumulates field errors while reading an object payload.
struct Fields<'a> {
  object: &'a Map<String, Value>,
  errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
  fn of(body: &'a Value) -> Result<Self, ValidationError> {
    match body {
      Value::Object(object) => Ok(Self { object, errors: Vec::new() }),
      other => Err(ValidationError::single(
        "",
        format!("Expected object, received {}", type_name(other)),
      )),
    }
  }

  fn get(&self, field: &str) -> Option<&'a Value> {
    self.object.get(field)
  }

  fn reject(&mut self, field: &str, message: impl Into<String>) {
    self.errors.push(FieldError::new(field, message));
  }

  /// Reads a string field, trims it and enforces `rule`.
  fn text(&mut self, field: &str, rule: TextRule) -> Option<String> {
    let raw = match self.get(field) {
      None => {
        self.reject(field, "Required");
        return None;
      }
      Some(Value::String(s)) => s,
      Some(other) => {
        self.reject(field, format!("Expected string, received {}", type_name(other)));
        return None;
      }
    };

    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len == 0 {
      self.reject(field, rule.required);
      return None;
    }

    if len > rule.max {
      let message = match rule.too_long {
        Some(msg) => msg.to_string(),
        None => format!("String must contain at most {} character(s)", rule.max),
      };
      self.reject(field, message);
      return None;
    }

    Some(trimmed.to_string())
  }

  fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
    match value {
      Some(v) if self.errors.is_empty() => Ok(v),
      _ => Err(ValidationError { errors: self.errors }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_non_object_body_is_rejected_at_root() {
    let err = validate_artist(&json!(["name"])).unwrap_err();
    assert_eq!(err.errors, vec![FieldError::new("", "Expected object, received array")]);
  }

  #[test]
  fn test_display_lists_every_field() {
    let err = ValidationError {
      errors: vec![FieldError::new("name", "Required"), FieldError::new("bio", "Required")],
    };
    assert_eq!(err.to_string(), "validation failed: name: Required, bio: Required");
  }
}
