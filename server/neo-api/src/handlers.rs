//! HTTP handlers for the NEO API.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  Json,
};
use neo_engine::types::{ApproachHistory, FeedReport, NeoFeed, SentryFeed};
use neo_engine::{CanonicalAsteroid, ImpactEffects, ImpactParameters, RawAsteroid, SentryRiskEntry};
use serde::{Deserialize, Serialize};

use crate::date;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn health() -> &'static str {
  "ok"
}

/// POST /neo/feed: normalize a date-keyed feed page.
pub async fn feed(State(state): State<Arc<AppState>>, Json(feed): Json<NeoFeed>) -> Json<FeedReport> {
  let report = state.engine.feed(&feed);
  tracing::info!(
    asteroids = report.asteroids.len(),
    rejected = report.rejected.len(),
    "feed normalized"
  );
  Json(report)
}

/// POST /neo/lookup: normalize a single lookup record.
pub async fn lookup(
  State(state): State<Arc<AppState>>,
  Json(raw): Json<RawAsteroid>,
) -> Result<Json<CanonicalAsteroid>, ApiError> {
  Ok(Json(state.engine.lookup(&raw)?))
}

#[derive(Debug, Deserialize)]
pub struct ApproachesBody {
  pub asteroid: RawAsteroid,
  #[serde(default)]
  pub reference_date: Option<String>,
}

/// POST /neo/approaches: approach history split around `reference_date` (default: today, UTC).
pub async fn approaches(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ApproachesBody>,
) -> Result<Json<ApproachHistory>, ApiError> {
  let reference = date::reference_or_today(body.reference_date.as_deref());
  Ok(Json(state.engine.approaches(&body.asteroid, &reference)?))
}

#[derive(Debug, Deserialize)]
pub struct RiskQuery {
  pub top_n: Option<usize>,
}

/// POST /sentry/risks?top_n=N: ranked impact-monitoring entries.
pub async fn sentry_risks(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RiskQuery>,
  Json(feed): Json<SentryFeed>,
) -> Json<Vec<SentryRiskEntry>> {
  Json(state.engine.risk_feed(&feed, query.top_n))
}

#[derive(Debug, Serialize)]
pub struct ImpactBody {
  pub effects: ImpactEffects,
  pub finite: bool,
}

/// POST /impact: effects of a hypothetical impact.
pub async fn impact(
  State(state): State<Arc<AppState>>,
  Json(params): Json<ImpactParameters>,
) -> Result<Json<ImpactBody>, ApiError> {
  let effects = state.engine.impact(&params)?;
  Ok(Json(ImpactBody {
    finite: effects.is_finite(),
    effects,
  }))
}
