//! Aggregates over normalized records: feed summary, closest approaches, approach history.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::normalize;
use crate::types::{ApproachHistory, CanonicalAsteroid, FeedSummary, NotableObject, RawAsteroid};

fn notable(a: &CanonicalAsteroid) -> NotableObject {
  NotableObject {
    id: a.id.clone(),
    name: a.name.clone(),
    distance_km: a.distance_km,
    size_km: a.size_km,
  }
}

/// Counts and extremes over a normalized batch. On ties the earlier record wins.
pub fn feed_summary(asteroids: &[CanonicalAsteroid]) -> FeedSummary {
  let total = asteroids.len();
  let hazardous = asteroids.iter().filter(|a| a.is_potentially_hazardous).count();
  let high_risk = asteroids.iter().filter(|a| a.risk.is_high_risk()).count();
  let hazardous_percent = if total == 0 {
    0.0
  } else {
    hazardous as f64 / total as f64 * 100.0
  };

  let closest = asteroids
    .iter()
    .reduce(|best, a| if a.distance_km < best.distance_km { a } else { best })
    .map(notable);
  let largest = asteroids
    .iter()
    .reduce(|best, a| if a.size_km > best.size_km { a } else { best })
    .map(notable);

  FeedSummary {
    total,
    hazardous,
    hazardous_percent,
    high_risk,
    closest,
    largest,
  }
}

/// The `limit` nearest records by miss distance (stable for equal distances).
pub fn closest_approaches(asteroids: &[CanonicalAsteroid], limit: usize) -> Vec<CanonicalAsteroid> {
  let mut by_distance: Vec<&CanonicalAsteroid> = asteroids.iter().collect();
  by_distance.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
  by_distance.into_iter().take(limit).cloned().collect()
}

/// Every close approach of one object, sorted by date and split at `reference`:
/// approaches on or before the reference day are past, later ones upcoming.
pub fn approach_history(raw: &RawAsteroid, reference: NaiveDate) -> Result<ApproachHistory, EngineError> {
  let mut entries = raw
    .close_approach_data
    .iter()
    .enumerate()
    .map(|(i, a)| normalize::normalize_approach(a, &format!("close_approach_data[{}]", i)))
    .collect::<Result<Vec<_>, _>>()?;
  entries.sort_by_key(|e| e.approach_date);

  let (past, upcoming): (Vec<_>, Vec<_>) = entries.into_iter().partition(|e| e.approach_date <= reference);
  Ok(ApproachHistory { past, upcoming })
}
