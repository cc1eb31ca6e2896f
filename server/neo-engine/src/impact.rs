//! Impact effects estimate for a hypothetical impactor.
//!
//! Simplified empirical model. Every constant and exponent below is part of the
//! output contract; changing one changes results for every caller.

use std::f64::consts::PI;

use crate::config::Config;
use crate::error::EngineError;
use crate::types::{CanonicalAsteroid, ImpactEffects, ImpactParameters, TargetMaterial};

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Target density for ocean impacts (kg/m³).
pub const WATER_DENSITY_KG_M3: f64 = 1000.0;
/// Target density for every land material (kg/m³). Sedimentary and crystalline rock
/// are not distinguished.
pub const ROCK_DENSITY_KG_M3: f64 = 2500.0;

const CRATER_COEFFICIENT: f64 = 1.161;
const CRATER_MASS_EXPONENT: f64 = 0.283;
const CRATER_VELOCITY_EXPONENT: f64 = 0.44;
const CRATER_ANGLE_EXPONENT: f64 = 0.33;

const SEISMIC_SLOPE: f64 = 0.67;
const SEISMIC_OFFSET: f64 = 5.87;

const THERMAL_EXPONENT: f64 = 0.41;
const THERMAL_COEFFICIENT_KM: f64 = 2.5;
const BLAST_EXPONENT: f64 = 0.33;
const BLAST_COEFFICIENT_KM: f64 = 3.2;
const SAFE_DISTANCE_COEFFICIENT_KM: f64 = 15.0;

/// Scenario defaults used when deriving parameters from a tracked object.
const SCENARIO_ANGLE_DEG: f64 = 40.0;
const SCENARIO_LATITUDE: f64 = 35.0;
const SCENARIO_LONGITUDE: f64 = -95.0;
const SCENARIO_OBSERVER_DISTANCE_KM: f64 = 2050.0;

impl TargetMaterial {
  pub fn density_kg_m3(self) -> f64 {
    match self {
      Self::Water => WATER_DENSITY_KG_M3,
      Self::Sedimentary | Self::Crystalline => ROCK_DENSITY_KG_M3,
    }
  }
}

/// Impactor mass in kg. The radius is converted to meters before cubing.
pub fn impactor_mass_kg(diameter_km: f64, density_kg_m3: f64) -> f64 {
  let radius_m = (diameter_km / 2.0) * 1000.0;
  (4.0 / 3.0) * PI * radius_m.powi(3) * density_kg_m3
}

/// Compute the effects of an impact. Pure; does not clamp or validate, so
/// out-of-domain parameters propagate as NaN or infinity.
pub fn compute_impact_effects(params: &ImpactParameters) -> ImpactEffects {
  let mass_kg = impactor_mass_kg(params.diameter_km, params.density_kg_m3);
  let velocity_m_s = params.velocity_km_s * 1000.0;
  let kinetic_energy_j = 0.5 * mass_kg * velocity_m_s.powi(2);
  let energy_megatons = kinetic_energy_j / JOULES_PER_MEGATON;

  let target_density = params.target_material.density_kg_m3();
  let angle_factor = (params.angle_deg * PI / 180.0).sin();
  let crater_scaling = CRATER_COEFFICIENT
    * (mass_kg / target_density).powf(CRATER_MASS_EXPONENT)
    * velocity_m_s.powf(CRATER_VELOCITY_EXPONENT)
    * angle_factor.powf(CRATER_ANGLE_EXPONENT);

  ImpactEffects {
    energy_megatons,
    crater_diameter_km: crater_scaling / 1000.0,
    seismic_magnitude: SEISMIC_SLOPE * kinetic_energy_j.log10() - SEISMIC_OFFSET,
    thermal_radius_km: energy_megatons.powf(THERMAL_EXPONENT) * THERMAL_COEFFICIENT_KM,
    blast_radius_km: energy_megatons.powf(BLAST_EXPONENT) * BLAST_COEFFICIENT_KM,
    safe_distance_km: energy_megatons.powf(BLAST_EXPONENT) * SAFE_DISTANCE_COEFFICIENT_KM,
  }
}

impl ImpactEffects {
  /// True when every effect is a finite number.
  pub fn is_finite(&self) -> bool {
    [
      self.energy_megatons,
      self.crater_diameter_km,
      self.seismic_magnitude,
      self.thermal_radius_km,
      self.blast_radius_km,
      self.safe_distance_km,
    ]
    .iter()
    .all(|v| v.is_finite())
  }
}

impl ImpactParameters {
  /// Scenario for a tracked object: its mean diameter and approach velocity, a rocky
  /// density from config, and the default angle, target and location.
  pub fn for_asteroid(asteroid: &CanonicalAsteroid, config: &Config) -> Self {
    Self {
      diameter_km: asteroid.size_km,
      density_kg_m3: config.default_impactor_density_kg_m3,
      velocity_km_s: asteroid.velocity_km_s,
      angle_deg: SCENARIO_ANGLE_DEG,
      target_material: TargetMaterial::Sedimentary,
      latitude: SCENARIO_LATITUDE,
      longitude: SCENARIO_LONGITUDE,
      observer_distance_km: SCENARIO_OBSERVER_DISTANCE_KM,
    }
  }

  /// Reject parameters outside the model's domain. For callers handling user input;
  /// `compute_impact_effects` itself never calls this.
  pub fn validate(&self) -> Result<(), EngineError> {
    positive(self.diameter_km, "diameter_km")?;
    positive(self.density_kg_m3, "density_kg_m3")?;
    positive(self.velocity_km_s, "velocity_km_s")?;
    if !(0.0..=90.0).contains(&self.angle_deg) {
      return Err(EngineError::validation("angle_deg", "must be within 0..=90 degrees"));
    }
    Ok(())
  }
}

fn positive(value: f64, field: &str) -> Result<(), EngineError> {
  if value.is_finite() && value > 0.0 {
    Ok(())
  } else {
    Err(EngineError::validation(field, "must be a finite number > 0"))
  }
}
