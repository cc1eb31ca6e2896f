//! Request dispatcher: applies the batch/validation policies around the pure components.

use chrono::NaiveDate;
use serde_json::Value;

use crate::config::Config;
use crate::error::EngineError;
use crate::impact;
use crate::normalize;
use crate::risk_feed;
use crate::stats;
use crate::types::*;

/// Stateless engine. Holds only configuration, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Handle one request.
  ///
  /// Record-level problems inside a feed are reported in the response; errors are
  /// returned only when the request as a whole cannot be answered.
  pub fn process(&self, request: &Request) -> Result<Response, EngineError> {
    match request {
      Request::Feed { feed } => Ok(Response::Feed(self.feed(feed))),
      Request::Lookup { asteroid } => Ok(Response::Lookup {
        asteroid: self.lookup(asteroid)?,
      }),
      Request::Approaches {
        asteroid,
        reference_date,
      } => Ok(Response::Approaches {
        history: self.approaches(asteroid, reference_date)?,
      }),
      Request::RiskFeed { feed, top_n } => Ok(Response::RiskFeed {
        entries: self.risk_feed(feed, *top_n),
      }),
      Request::Impact { params } => {
        let effects = self.impact(params)?;
        Ok(Response::Impact {
          finite: effects.is_finite(),
          effects,
        })
      }
    }
  }

  /// Normalize a feed page. Malformed records are dropped and listed in `rejected`;
  /// the rest of the batch is still returned, ordered by approach date.
  pub fn feed(&self, feed: &NeoFeed) -> FeedReport {
    let mut asteroids = Vec::new();
    let mut rejected = Vec::new();

    for value in normalize::flatten_feed(feed) {
      match normalize::decode_record(value).and_then(|raw| normalize::normalize(&raw)) {
        Ok(a) => asteroids.push(a),
        Err(e) => {
          let record_id = value.get("id").and_then(Value::as_str);
          tracing::warn!(record_id = record_id.unwrap_or("?"), error = %e, "dropping malformed record");
          let mut out = ErrorOutput::from(&e);
          if let Some(id) = record_id {
            out = out.with_record_id(id);
          }
          rejected.push(out);
        }
      }
    }
    normalize::sort_by_approach_date(&mut asteroids);

    if let Some(expected) = feed.element_count {
      let received = asteroids.len() + rejected.len();
      if expected as usize != received {
        tracing::debug!(expected, received, "feed element_count differs from records received");
      }
    }

    let summary = stats::feed_summary(&asteroids);
    let closest = stats::closest_approaches(&asteroids, self.config.closest_approaches_limit);
    FeedReport {
      asteroids,
      closest,
      summary,
      rejected,
    }
  }

  /// Normalize a single by-ID lookup record.
  pub fn lookup(&self, raw: &RawAsteroid) -> Result<CanonicalAsteroid, EngineError> {
    normalize::normalize(raw)
  }

  /// Full approach history of one object relative to a caller-supplied date.
  pub fn approaches(&self, raw: &RawAsteroid, reference_date: &str) -> Result<ApproachHistory, EngineError> {
    let reference = NaiveDate::parse_from_str(reference_date.trim(), "%Y-%m-%d")
      .map_err(|e| EngineError::validation("reference_date", &format!("expected YYYY-MM-DD: {}", e)))?;
    stats::approach_history(raw, reference)
  }

  /// Ranked Sentry entries; `top_n` falls back to the configured default.
  pub fn risk_feed(&self, feed: &SentryFeed, top_n: Option<usize>) -> Vec<SentryRiskEntry> {
    risk_feed::parse_risk_feed(&feed.data, top_n.unwrap_or(self.config.risk_feed_top_n))
  }

  /// Validate user-supplied parameters, then compute effects.
  pub fn impact(&self, params: &ImpactParameters) -> Result<ImpactEffects, EngineError> {
    params.validate()?;
    let effects = impact::compute_impact_effects(params);
    if !effects.is_finite() {
      tracing::warn!(?params, "impact effects are not finite");
    }
    Ok(effects)
  }

  /// Scenario derived from a tracked object, using the configured impactor density.
  pub fn scenario_for(&self, asteroid: &CanonicalAsteroid) -> ImpactParameters {
    ImpactParameters::for_asteroid(asteroid, &self.config)
  }
}
