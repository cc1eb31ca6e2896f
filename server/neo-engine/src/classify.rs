//! Threat tier classification.
//!
//! An ordered decision table: rows are evaluated top to bottom and the first row
//! whose predicate holds decides the tier. Precedence is therefore
//! Sentry > non-hazardous > distance/size bands.

use crate::types::RiskTier;

/// Mean Earth–Moon distance in km (one lunar distance, LD).
pub const LUNAR_DISTANCE_KM: f64 = 384_400.0;

/// Inputs the table is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ThreatInputs {
  pub distance_km: f64,
  pub size_km: f64,
  pub is_hazardous: bool,
  pub is_sentry: bool,
}

/// One row of the decision table.
pub struct Rule {
  pub name: &'static str,
  pub applies: fn(&ThreatInputs) -> bool,
  pub tier: RiskTier,
}

fn within_moons(i: &ThreatInputs, moons: f64) -> bool {
  i.distance_km < LUNAR_DISTANCE_KM * moons
}

fn sentry(i: &ThreatInputs) -> bool {
  i.is_sentry
}

// Deliberate policy: a non-flagged object is MINIMAL whatever its size or distance.
fn not_hazardous(i: &ThreatInputs) -> bool {
  !i.is_hazardous
}

fn inside_1ld_over_1km(i: &ThreatInputs) -> bool {
  within_moons(i, 1.0) && i.size_km > 1.0
}

fn inside_1ld_over_half_km(i: &ThreatInputs) -> bool {
  within_moons(i, 1.0) && i.size_km > 0.5
}

fn inside_1ld(i: &ThreatInputs) -> bool {
  within_moons(i, 1.0)
}

fn inside_2ld_over_1km(i: &ThreatInputs) -> bool {
  within_moons(i, 2.0) && i.size_km > 1.0
}

fn inside_2ld_over_half_km(i: &ThreatInputs) -> bool {
  within_moons(i, 2.0) && i.size_km > 0.5
}

fn inside_2ld(i: &ThreatInputs) -> bool {
  within_moons(i, 2.0)
}

fn inside_5ld_over_1km(i: &ThreatInputs) -> bool {
  within_moons(i, 5.0) && i.size_km > 1.0
}

fn always(_: &ThreatInputs) -> bool {
  true
}

/// The classification table. The final row matches everything, so the table is total.
pub const RULES: &[Rule] = &[
  Rule { name: "sentry", applies: sentry, tier: RiskTier::Extreme },
  Rule { name: "not_hazardous", applies: not_hazardous, tier: RiskTier::Minimal },
  Rule { name: "inside_1ld_over_1km", applies: inside_1ld_over_1km, tier: RiskTier::Extreme },
  Rule { name: "inside_1ld_over_half_km", applies: inside_1ld_over_half_km, tier: RiskTier::High },
  Rule { name: "inside_1ld", applies: inside_1ld, tier: RiskTier::Moderate },
  Rule { name: "inside_2ld_over_1km", applies: inside_2ld_over_1km, tier: RiskTier::High },
  Rule { name: "inside_2ld_over_half_km", applies: inside_2ld_over_half_km, tier: RiskTier::Moderate },
  Rule { name: "inside_2ld", applies: inside_2ld, tier: RiskTier::Low },
  Rule { name: "inside_5ld_over_1km", applies: inside_5ld_over_1km, tier: RiskTier::Moderate },
  Rule { name: "fallback", applies: always, tier: RiskTier::Low },
];

/// First matching row of [`RULES`].
pub fn matching_rule(inputs: &ThreatInputs) -> Option<&'static Rule> {
  RULES.iter().find(|rule| (rule.applies)(inputs))
}

/// Classify an object into a threat tier. Total: any input, including zero,
/// negative or NaN quantities, yields a tier.
pub fn classify(distance_km: f64, size_km: f64, is_hazardous: bool, is_sentry: bool) -> RiskTier {
  let inputs = ThreatInputs {
    distance_km,
    size_km,
    is_hazardous,
    is_sentry,
  };
  match matching_rule(&inputs) {
    Some(rule) => {
      tracing::trace!(rule = rule.name, tier = rule.tier.as_str(), "classified");
      rule.tier
    }
    None => RiskTier::Low,
  }
}
