//! Engine configuration with sane defaults.

/// Environment variable overriding [`Config::risk_feed_top_n`].
pub const ENV_RISK_TOP_N: &str = "NEO_RISK_TOP_N";

/// Tunable knobs for the engine. Physical constants of the impact model are not
/// configurable; they live in `impact`.
#[derive(Debug, Clone)]
pub struct Config {
  /// How many ranked Sentry entries to keep when a request does not say.
  pub risk_feed_top_n: usize,
  /// Density assumed when deriving a scenario from a tracked asteroid (rocky body).
  pub default_impactor_density_kg_m3: f64,
  /// Size of the "closest approaches" shortlist in a feed response.
  pub closest_approaches_limit: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      risk_feed_top_n: 5,
      default_impactor_density_kg_m3: 2600.0,
      closest_approaches_limit: 6,
    }
  }
}

impl Config {
  /// Defaults, with `NEO_RISK_TOP_N` applied when it holds a positive integer.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Ok(raw) = std::env::var(ENV_RISK_TOP_N) {
      match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => config.risk_feed_top_n = n,
        _ => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_RISK_TOP_N),
      }
    }
    config
  }
}
