//! Normalize provider records into canonical asteroid records.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::classify::{self, LUNAR_DISTANCE_KM};
use crate::error::EngineError;
use crate::types::*;

/// Parse and normalize a provider record into a canonical asteroid.
///
/// Uses the first close-approach entry as "the" approach; the list is neither sorted
/// nor deduplicated here.
pub fn normalize(raw: &RawAsteroid) -> Result<CanonicalAsteroid, EngineError> {
  let id = require_text(&raw.id, "id")?;
  let name = require_text(&raw.name, "name")?;
  let url = require(raw.nasa_jpl_url.as_ref(), "nasa_jpl_url")?.clone();
  let magnitude = *require(raw.absolute_magnitude_h.as_ref(), "absolute_magnitude_h")?;
  let is_hazardous = *require(
    raw.is_potentially_hazardous_asteroid.as_ref(),
    "is_potentially_hazardous_asteroid",
  )?;
  let is_sentry = *require(raw.is_sentry_object.as_ref(), "is_sentry_object")?;

  let range = raw
    .estimated_diameter
    .as_ref()
    .and_then(|d| d.kilometers.as_ref())
    .ok_or_else(|| EngineError::malformed("estimated_diameter.kilometers", "missing"))?;
  let min_km = *require(
    range.estimated_diameter_min.as_ref(),
    "estimated_diameter.kilometers.estimated_diameter_min",
  )?;
  let max_km = *require(
    range.estimated_diameter_max.as_ref(),
    "estimated_diameter.kilometers.estimated_diameter_max",
  )?;
  let size_km = (min_km + max_km) / 2.0;

  let first = raw
    .close_approach_data
    .first()
    .ok_or_else(|| EngineError::malformed("close_approach_data", "must have at least one entry"))?;
  let approach = normalize_approach(first, "close_approach_data[0]")?;

  let risk = classify::classify(approach.distance_km, size_km, is_hazardous, is_sentry);

  Ok(CanonicalAsteroid {
    id,
    name: clean_name(&name),
    date: approach.date.clone(),
    date_formatted: format_date(&approach.approach_date),
    approach_date: approach.approach_date,
    distance: format_distance(approach.distance_km),
    distance_km: approach.distance_km,
    distance_lunar: approach.distance_lunar,
    size: format_size(size_km),
    size_km,
    velocity: approach.velocity,
    velocity_km_s: approach.velocity_km_s,
    magnitude,
    orbiting_body: approach.orbiting_body,
    is_potentially_hazardous: is_hazardous,
    is_sentry_object: is_sentry,
    risk,
    url,
  })
}

/// Normalize every record and order the result by close-approach date (ascending).
///
/// The sort is stable, so records sharing a date keep their input order. Fails on
/// the first malformed record.
pub fn process_asteroids(raws: &[RawAsteroid]) -> Result<Vec<CanonicalAsteroid>, EngineError> {
  let mut out = raws.iter().map(normalize).collect::<Result<Vec<_>, _>>()?;
  sort_by_approach_date(&mut out);
  Ok(out)
}

pub(crate) fn sort_by_approach_date(asteroids: &mut [CanonicalAsteroid]) {
  asteroids.sort_by_key(|a| a.approach_date);
}

/// Flatten a date-keyed feed into one record list (date keys ascending, page order kept).
pub fn flatten_feed(feed: &NeoFeed) -> Vec<&Value> {
  feed.near_earth_objects.values().flatten().collect()
}

/// Decode one feed record. A field of the wrong JSON type makes this record malformed
/// without affecting its neighbours.
pub fn decode_record(value: &Value) -> Result<RawAsteroid, EngineError> {
  RawAsteroid::deserialize(value).map_err(|e| EngineError::malformed("record", &e.to_string()))
}

/// Validate and parse one close approach into a history entry.
pub(crate) fn normalize_approach(raw: &RawCloseApproach, path: &str) -> Result<ApproachEntry, EngineError> {
  let date = require_text(&raw.close_approach_date, &format!("{}.close_approach_date", path))?;
  let approach_date = parse_date(&date, &format!("{}.close_approach_date", path))?;

  let velocity_field = format!("{}.relative_velocity.kilometers_per_second", path);
  let velocity_km_s = parse_decimal(
    raw
      .relative_velocity
      .as_ref()
      .and_then(|v| v.kilometers_per_second.as_deref()),
    &velocity_field,
  )?;

  let km_field = format!("{}.miss_distance.kilometers", path);
  let lunar_field = format!("{}.miss_distance.lunar", path);
  let miss = raw.miss_distance.as_ref();
  let distance_km = parse_decimal(miss.and_then(|m| m.kilometers.as_deref()), &km_field)?;
  let distance_lunar = parse_decimal(miss.and_then(|m| m.lunar.as_deref()), &lunar_field)?;

  let orbiting_body = require_text(&raw.orbiting_body, &format!("{}.orbiting_body", path))?;

  Ok(ApproachEntry {
    date_formatted: format_date_long(&approach_date),
    date,
    approach_date,
    distance_km,
    distance_lunar,
    distance: format!("{} LD", fixed(distance_lunar, 2)),
    velocity_km_s,
    velocity: format_velocity(velocity_km_s),
    orbiting_body,
  })
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Strip literal parentheses: "(2024 AB)" -> "2024 AB".
pub fn clean_name(name: &str) -> String {
  name.chars().filter(|c| *c != '(' && *c != ')').collect()
}

/// Fixed-point rendering with exact halves rounded away from zero ("2.5" -> "3").
pub fn fixed(value: f64, decimals: i32) -> String {
  let scale = 10f64.powi(decimals);
  format!("{:.*}", decimals as usize, (value * scale).round() / scale)
}

/// Thousands of km inside one lunar distance, LD up to ten, millions of km beyond.
pub fn format_distance(km: f64) -> String {
  let ratio = km / LUNAR_DISTANCE_KM;
  if ratio < 1.0 {
    format!("{}k km", fixed(km / 1000.0, 0))
  } else if ratio < 10.0 {
    format!("{} LD", fixed(ratio, 2))
  } else {
    format!("{}M km", fixed(km / 1_000_000.0, 2))
  }
}

/// Whole meters below one kilometer, otherwise km with two decimals.
pub fn format_size(km: f64) -> String {
  if km < 1.0 {
    format!("{}m", fixed(km * 1000.0, 0))
  } else {
    format!("{}km", fixed(km, 2))
  }
}

pub fn format_velocity(km_s: f64) -> String {
  format!("{} km/s", fixed(km_s, 1))
}

/// "Jan 5, 2025".
pub fn format_date(date: &NaiveDate) -> String {
  date.format("%b %-d, %Y").to_string()
}

/// "January 5, 2025".
pub fn format_date_long(date: &NaiveDate) -> String {
  date.format("%B %-d, %Y").to_string()
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn require<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T, EngineError> {
  value.ok_or_else(|| EngineError::malformed(field, "missing"))
}

fn require_text(value: &Option<String>, field: &str) -> Result<String, EngineError> {
  match value {
    Some(s) if !s.trim().is_empty() => Ok(s.clone()),
    Some(_) => Err(EngineError::malformed(field, "must not be empty")),
    None => Err(EngineError::malformed(field, "missing")),
  }
}

/// Provider decimal string -> f64. Absent or unparsable values are malformed.
fn parse_decimal(value: Option<&str>, field: &str) -> Result<f64, EngineError> {
  let raw = value.ok_or_else(|| EngineError::malformed(field, "missing"))?;
  let parsed: f64 = raw
    .trim()
    .parse()
    .map_err(|_| EngineError::malformed(field, &format!("not a decimal number: {:?}", raw)))?;
  if !parsed.is_finite() {
    return Err(EngineError::malformed(field, &format!("not a finite number: {:?}", raw)));
  }
  Ok(parsed)
}

/// Calendar date "YYYY-MM-DD"; a trailing time part ("YYYY-MM-DD HH:MM") is tolerated.
fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, EngineError> {
  let day = raw.trim().split_whitespace().next().unwrap_or_default();
  NaiveDate::parse_from_str(day, "%Y-%m-%d")
    .map_err(|e| EngineError::malformed(field, &format!("invalid date {:?}: {}", raw, e)))
}
