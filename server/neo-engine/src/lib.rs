//! NEO threat & impact engine: deterministic, rule-based.
//!
//! Normalizes near-Earth-object feed records into display-ready canonical records,
//! tags them with a threat tier, ranks impact-monitoring summaries, and estimates
//! impact effects for hypothetical scenarios.
//!
//! No DB, no network, no wall clock; pure computation.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod impact;
pub mod normalize;
pub mod risk_feed;
pub mod stats;
pub mod types;

pub use classify::classify;
pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use impact::compute_impact_effects;
pub use normalize::{normalize, process_asteroids};
pub use risk_feed::{parse_lenient_float, parse_risk_feed};
pub use types::{
  CanonicalAsteroid, ImpactEffects, ImpactParameters, RawAsteroid, RawSentryEntry, Request, Response,
  RiskTier, SentryRiskEntry, TargetMaterial,
};
