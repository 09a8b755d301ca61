//! Impact model: impactor parameters to damage radii.
//!
//! A simplified scaling law, not a physical model. Every band radius is
//! proportional to the cube root of `diameter³ · speed² · sin(angle)`,
//! which keeps the radii monotonic in each input and fixes the ratios
//! between bands.

use crate::types::{DEG_TO_RAD, DamageRadii, ScenarioParameters};

/// Severe radius (km) per unit of the cube-rooted energy index.
pub const SEVERE_KM_PER_INDEX: f64 = 0.004;

/// Major radius as a multiple of the severe radius.
pub const MAJOR_TO_SEVERE: f64 = 2.2;

/// Light radius as a multiple of the severe radius.
pub const LIGHT_TO_SEVERE: f64 = 5.0;

/// Floor on sin(angle) so grazing entries still produce finite radii.
pub const MIN_ANGLE_FACTOR: f64 = 0.02;

/// Smallest severe radius ever reported (km).
pub const MIN_SEVERE_KM: f64 = 0.05;

/// Assumed bulk density of a stony impactor (kg/m³).
pub const IMPACTOR_DENSITY: f64 = 3000.0;

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Effective angle factor: sin(angle), floored at [`MIN_ANGLE_FACTOR`].
///
/// Angles are expected in (0, 90]; anything steeper is treated as vertical.
pub fn angle_factor(angle_deg: f64) -> f64 {
    let angle = angle_deg.clamp(0.0, 90.0) * DEG_TO_RAD;
    angle.sin().max(MIN_ANGLE_FACTOR)
}

/// Unscaled energy index `diameter³ · speed² · sin(angle)`.
pub fn energy_index(diameter_m: f64, speed_kms: f64, angle_deg: f64) -> f64 {
    let d = diameter_m.max(0.0);
    let v = speed_kms.max(0.0);
    d.powi(3) * v.powi(2) * angle_factor(angle_deg)
}

/// Compute the three damage radii for an impactor.
///
/// Pure and deterministic. All radii are strictly positive and ordered
/// severe ≤ major ≤ light.
pub fn damage_radii(diameter_m: f64, speed_kms: f64, angle_deg: f64) -> DamageRadii {
    let index = energy_index(diameter_m, speed_kms, angle_deg);
    let severe_km = (SEVERE_KM_PER_INDEX * index.cbrt()).max(MIN_SEVERE_KM);

    DamageRadii {
        severe_km,
        major_km: severe_km * MAJOR_TO_SEVERE,
        light_km: severe_km * LIGHT_TO_SEVERE,
    }
}

/// Damage radii for a full parameter set.
pub fn radii_for(params: &ScenarioParameters) -> DamageRadii {
    damage_radii(params.diameter_m, params.speed_kms, params.angle_deg)
}

/// Kinetic energy of a spherical stony impactor in megatons of TNT.
///
/// Display-only figure for the KPI panel; it does not feed the radii.
pub fn kinetic_energy_mt(diameter_m: f64, speed_kms: f64) -> f64 {
    let radius = diameter_m.max(0.0) * 0.5;
    let volume = 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3);
    let mass = IMPACTOR_DENSITY * volume;
    let speed_ms = speed_kms.max(0.0) * 1000.0;
    0.5 * mass * speed_ms * speed_ms / JOULES_PER_MEGATON
}
