//! Structured error types for the NEO engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// A provider record is missing a required field or carries an unparsable number.
  #[error("malformed record: {field}: {reason}")]
  MalformedRecord { field: String, reason: String },

  /// Caller-supplied input is outside the domain an operation accepts.
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn malformed(field: &str, reason: &str) -> Self {
    Self::MalformedRecord {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Field name carried by record/validation errors, if any.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::MalformedRecord { field, .. } | Self::Validation { field, .. } => Some(field),
      Self::Json(_) => None,
    }
  }
}
