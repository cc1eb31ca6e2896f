//! Impact-monitoring (Sentry) summary parsing: coercion, ranking, derived fields.

use serde_json::Value;

use crate::types::{RawSentryEntry, SentryRiskEntry, SentryRiskLevel};

/// Label used when the provider gives no last-observation date.
pub const LAST_OBSERVED_UNKNOWN: &str = "TBD";

/// Coerce a provider value into a float. Never fails.
///
/// - absent, `null` or the `"-"` placeholder -> 0.0
/// - JSON numbers -> their value
/// - strings -> parsed as decimal (surrounding whitespace ignored)
/// - anything else (unparsable text, booleans, arrays, objects, NaN) -> 0.0
///
/// A 0.0 result is indistinguishable from a genuine zero; callers accept that.
pub fn parse_lenient_float(value: Option<&Value>) -> f64 {
  let coerced = match value {
    None | Some(Value::Null) => 0.0,
    Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
    Some(Value::String(s)) => {
      let s = s.trim();
      if s == "-" {
        0.0
      } else {
        s.parse::<f64>().unwrap_or(0.0)
      }
    }
    Some(_) => 0.0,
  };
  if coerced.is_nan() {
    0.0
  } else {
    coerced
  }
}

/// Text field: strings as-is, numbers rendered, anything else (or empty text) absent.
fn lenient_text(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) if !s.is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Torino maximum -> qualitative level.
pub fn risk_level(torino: f64) -> SentryRiskLevel {
  if torino >= 5.0 {
    SentryRiskLevel::High
  } else if torino >= 3.0 {
    SentryRiskLevel::Moderate
  } else if torino >= 1.0 {
    SentryRiskLevel::Low
  } else {
    SentryRiskLevel::Minimal
  }
}

/// `min(95, 70 + 2 * impact_count)`; capped above only.
pub fn confidence(impact_count: f64) -> f64 {
  (70.0 + 2.0 * impact_count).min(95.0)
}

/// Derive one output entry from a raw row.
pub fn to_risk_entry(raw: &RawSentryEntry) -> SentryRiskEntry {
  let designation = lenient_text(raw.des.as_ref()).unwrap_or_default();
  let full_name = lenient_text(raw.fullname.as_ref()).unwrap_or_else(|| designation.clone());
  let torino_scale = parse_lenient_float(raw.ts_max.as_ref());
  let impact_count = parse_lenient_float(raw.n_imp.as_ref());

  SentryRiskEntry {
    designation,
    full_name,
    impact_probability: parse_lenient_float(raw.ip.as_ref()),
    torino_scale,
    palermo_scale: parse_lenient_float(raw.ps_max.as_ref()),
    palermo_cumulative: parse_lenient_float(raw.ps_cum.as_ref()),
    impact_count,
    last_observed: lenient_text(raw.last_obs.as_ref())
      .unwrap_or_else(|| LAST_OBSERVED_UNKNOWN.to_string()),
    risk_level: risk_level(torino_scale),
    confidence: confidence(impact_count),
  }
}

/// Rank rows by coerced impact probability (descending, stable) and keep the top `top_n`.
pub fn parse_risk_feed(entries: &[RawSentryEntry], top_n: usize) -> Vec<SentryRiskEntry> {
  let mut ranked: Vec<(f64, &RawSentryEntry)> = entries
    .iter()
    .map(|e| (parse_lenient_float(e.ip.as_ref()), e))
    .collect();
  ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

  let out: Vec<SentryRiskEntry> = ranked
    .into_iter()
    .take(top_n)
    .map(|(_, raw)| to_risk_entry(raw))
    .collect();

  tracing::debug!(received = entries.len(), kept = out.len(), top_n, "ranked risk feed");
  out
}
