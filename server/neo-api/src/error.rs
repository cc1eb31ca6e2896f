//! Mapping engine errors onto HTTP responses.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use neo_engine::types::ErrorOutput;
use neo_engine::EngineError;

/// Handler error: an engine error rendered as `ErrorOutput` JSON.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
  fn from(e: EngineError) -> Self {
    Self(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      EngineError::MalformedRecord { .. } | EngineError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      EngineError::Json(_) => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(status = status.as_u16(), error = %self.0, "request rejected");
    (status, Json(ErrorOutput::from(&self.0))).into_response()
  }
}
