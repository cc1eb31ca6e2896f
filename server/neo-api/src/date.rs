//! Date utilities for the HTTP boundary. The engine itself never reads the clock.

use chrono::Utc;

/// Today's date (UTC) as YYYY-MM-DD, the default reference for approach history.
pub fn today_utc() -> String {
  Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Caller-supplied reference date, or today when absent/blank.
pub fn reference_or_today(reference: Option<&str>) -> String {
  match reference.map(str::trim) {
    Some(s) if !s.is_empty() => s.to_string(),
    _ => today_utc(),
  }
}
