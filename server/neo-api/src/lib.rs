//! NEO API
//!
//! HTTP service exposing the NEO engine: feed normalization, lookups, approach
//! history, Sentry risk ranking and impact estimates. Stateless; no persistence.
//! Bind to 127.0.0.1 by default (internal only).

mod date;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;
pub use handlers::{approaches, feed, health, impact, lookup, sentry_risks};
pub use state::AppState;

/// Build the service router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/neo/feed", post(feed))
    .route("/neo/lookup", post(lookup))
    .route("/neo/approaches", post(approaches))
    .route("/sentry/risks", post(sentry_risks))
    .route("/impact", post(impact))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
