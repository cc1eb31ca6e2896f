//! Core types for the NEO engine (JSON contracts + derived models).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Inbound types: near-Earth-object feed / lookup (provider JSON contract)
// ---------------------------------------------------------------------------

/// Date-keyed feed document. Unknown fields are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeoFeed {
  #[serde(default)]
  pub element_count: Option<u64>,
  /// Records grouped by calendar date ("YYYY-MM-DD"). Kept as raw JSON so each record
  /// is decoded on its own (see `normalize::decode_record`).
  #[serde(default)]
  pub near_earth_objects: BTreeMap<String, Vec<Value>>,
}

/// One provider record, as received from a feed page or a by-ID lookup.
///
/// Every field is optional at the serde layer so a missing field surfaces as
/// `MalformedRecord` during normalization, naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAsteroid {
  pub id: Option<String>,
  pub name: Option<String>,
  pub nasa_jpl_url: Option<String>,
  pub absolute_magnitude_h: Option<f64>,
  pub estimated_diameter: Option<RawEstimatedDiameter>,
  pub is_potentially_hazardous_asteroid: Option<bool>,
  pub is_sentry_object: Option<bool>,
  #[serde(default)]
  pub close_approach_data: Vec<RawCloseApproach>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEstimatedDiameter {
  pub kilometers: Option<RawDiameterRange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDiameterRange {
  pub estimated_diameter_min: Option<f64>,
  pub estimated_diameter_max: Option<f64>,
}

/// One close approach. Numeric quantities arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCloseApproach {
  pub close_approach_date: Option<String>,
  pub relative_velocity: Option<RawRelativeVelocity>,
  pub miss_distance: Option<RawMissDistance>,
  pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRelativeVelocity {
  pub kilometers_per_second: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMissDistance {
  pub kilometers: Option<String>,
  pub lunar: Option<String>,
}

// ---------------------------------------------------------------------------
// Inbound types: impact-monitoring (Sentry) summary
// ---------------------------------------------------------------------------

/// `{ data: [...] }` summary list. A missing `data` array reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentryFeed {
  #[serde(default)]
  pub data: Vec<RawSentryEntry>,
}

/// One summary row. Any field may be absent, `null`, `"-"`, a string or a number,
/// so everything is kept as raw JSON and coerced by `risk_feed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSentryEntry {
  pub des: Option<Value>,
  pub fullname: Option<Value>,
  pub ip: Option<Value>,
  pub ts_max: Option<Value>,
  pub ps_max: Option<Value>,
  pub ps_cum: Option<Value>,
  pub n_imp: Option<Value>,
  pub last_obs: Option<Value>,
}

// ---------------------------------------------------------------------------
// Threat tiers
// ---------------------------------------------------------------------------

/// Discrete threat tier of a tracked object, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
  Minimal,
  Low,
  Moderate,
  High,
  Extreme,
}

impl RiskTier {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Minimal => "MINIMAL",
      Self::Low => "LOW",
      Self::Moderate => "MODERATE",
      Self::High => "HIGH",
      Self::Extreme => "EXTREME",
    }
  }

  /// HIGH and EXTREME count as "high risk" in feed summaries.
  pub fn is_high_risk(self) -> bool {
    matches!(self, Self::High | Self::Extreme)
  }
}

/// Qualitative level of a Sentry entry, derived from its Torino maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentryRiskLevel {
  Minimal,
  Low,
  Moderate,
  High,
}

// ---------------------------------------------------------------------------
// Derived records
// ---------------------------------------------------------------------------

/// Canonical, display-ready asteroid record built from a `RawAsteroid`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalAsteroid {
  pub id: String,
  pub name: String,
  /// First close-approach date exactly as the provider sent it.
  pub date: String,
  /// "Mon D, YYYY".
  pub date_formatted: String,
  /// Parsed form of `date`; used for ordering.
  #[serde(skip)]
  pub approach_date: NaiveDate,
  pub distance: String,
  pub distance_km: f64,
  pub distance_lunar: f64,
  pub size: String,
  /// Mean of the provider's min/max diameter estimate.
  pub size_km: f64,
  pub velocity: String,
  pub velocity_km_s: f64,
  pub magnitude: f64,
  pub orbiting_body: String,
  pub is_potentially_hazardous: bool,
  pub is_sentry_object: bool,
  pub risk: RiskTier,
  pub url: String,
}

/// Ranked impact-monitoring entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentryRiskEntry {
  pub designation: String,
  pub full_name: String,
  pub impact_probability: f64,
  pub torino_scale: f64,
  pub palermo_scale: f64,
  pub palermo_cumulative: f64,
  pub impact_count: f64,
  pub last_observed: String,
  pub risk_level: SentryRiskLevel,
  pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Impact scenario
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMaterial {
  Water,
  Sedimentary,
  Crystalline,
}

/// Hypothetical impactor. Location and observer distance are carried for the
/// caller's benefit and do not enter the effect formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactParameters {
  pub diameter_km: f64,
  pub density_kg_m3: f64,
  pub velocity_km_s: f64,
  /// Degrees from horizontal, 0..=90.
  pub angle_deg: f64,
  pub target_material: TargetMaterial,
  #[serde(default)]
  pub latitude: f64,
  #[serde(default)]
  pub longitude: f64,
  #[serde(default)]
  pub observer_distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEffects {
  pub energy_megatons: f64,
  pub crater_diameter_km: f64,
  pub seismic_magnitude: f64,
  pub thermal_radius_km: f64,
  pub blast_radius_km: f64,
  pub safe_distance_km: f64,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// An object singled out by a summary (closest, largest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotableObject {
  pub id: String,
  pub name: String,
  pub distance_km: f64,
  pub size_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSummary {
  pub total: usize,
  pub hazardous: usize,
  /// Share of hazardous objects, 0..=100; 0 for an empty batch.
  pub hazardous_percent: f64,
  pub high_risk: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub closest: Option<NotableObject>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub largest: Option<NotableObject>,
}

/// One entry of an object's approach history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachEntry {
  pub date: String,
  /// "Month D, YYYY".
  pub date_formatted: String,
  #[serde(skip)]
  pub approach_date: NaiveDate,
  pub distance_km: f64,
  pub distance_lunar: f64,
  /// "x.xx LD".
  pub distance: String,
  pub velocity_km_s: f64,
  pub velocity: String,
  pub orbiting_body: String,
}

/// Approaches split around a caller-supplied reference date, each side ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ApproachHistory {
  pub past: Vec<ApproachEntry>,
  pub upcoming: Vec<ApproachEntry>,
}

// ---------------------------------------------------------------------------
// Engine requests / responses (JSON-lines and HTTP contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
  Feed {
    feed: NeoFeed,
  },
  Lookup {
    asteroid: RawAsteroid,
  },
  Approaches {
    asteroid: RawAsteroid,
    /// "YYYY-MM-DD"; approaches strictly before it are "past".
    reference_date: String,
  },
  RiskFeed {
    feed: SentryFeed,
    #[serde(default)]
    top_n: Option<usize>,
  },
  Impact {
    params: ImpactParameters,
  },
}

/// Normalized feed batch. Malformed records are dropped and reported in `rejected`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
  pub asteroids: Vec<CanonicalAsteroid>,
  /// Nearest objects by miss distance, capped by config.
  pub closest: Vec<CanonicalAsteroid>,
  pub summary: FeedSummary,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub rejected: Vec<ErrorOutput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
  Feed(FeedReport),
  Lookup {
    asteroid: CanonicalAsteroid,
  },
  Approaches {
    history: ApproachHistory,
  },
  RiskFeed {
    entries: Vec<SentryRiskEntry>,
  },
  Impact {
    effects: ImpactEffects,
    /// False when any effect is NaN/infinite; render a warning instead of values.
    finite: bool,
  },
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines and rejected records.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub record_id: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
      record_id: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }

  pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
    self.record_id = Some(id.into());
    self
  }
}

impl From<&crate::error::EngineError> for ErrorOutput {
  fn from(e: &crate::error::EngineError) -> Self {
    use crate::error::EngineError;
    match e {
      EngineError::MalformedRecord { field, reason } | EngineError::Validation { field, reason } => {
        ErrorOutput::new(reason.clone()).with_field(field.clone())
      }
      EngineError::Json(_) => ErrorOutput::new(e.to_string()),
    }
  }
}
