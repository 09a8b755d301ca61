//! Mitigation strategies and their effect on a base outcome.
//!
//! Exactly one strategy is active at a time:
//! - **None**: the mitigated outcome equals the base outcome
//! - **Deflection**: shrinks the damage radii, casualties are re-derived
//!   from the shrunk severe radius
//! - **Evacuation**: keeps the radii, removes part of the exposed
//!   population and a larger share of the deaths

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::casualty;
use crate::exposure::ExposureField;
use crate::types::{DamageRadii, Outcome};

/// Upper bound of the deflection effectiveness score.
pub const MAX_DEFLECTION_EFFECTIVENESS: f64 = 3.0;

/// Radius reduction per unit of effectiveness.
pub const DEFLECTION_REDUCTION_PER_UNIT: f64 = 0.18;

/// Largest fraction of a radius deflection can remove.
pub const MAX_DEFLECTION_REDUCTION: f64 = 0.7;

/// Share of the deflection factor applied to the light radius.
/// Thermal effects shrink less than blast effects.
pub const LIGHT_RADIUS_SENSITIVITY: f64 = 0.15;

/// Largest fraction of deaths evacuation can avoid.
pub const MAX_EVACUATION_LOSS_REDUCTION: f64 = 0.7;

/// Largest fraction of the exposed population evacuation can remove.
pub const MAX_EVACUATION_EXPOSURE_REDUCTION: f64 = 0.3;

/// The active mitigation strategy.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MitigationState {
    /// No intervention.
    #[default]
    None,
    /// Nudge the impactor ahead of time.
    Deflection {
        /// Velocity change imparted, mm/s.
        delta_v_mm_s: f64,
        /// Years of warning before impact.
        lead_years: f64,
    },
    /// Move people out of the danger zone.
    Evacuation {
        /// Radius of the evacuated zone around ground zero, km.
        radius_km: f64,
        /// Share of the zone's population that leaves, percent.
        coverage_pct: f64,
    },
}

impl MitigationState {
    /// Short label for logs and the strategy selector.
    pub fn label(&self) -> &'static str {
        match self {
            MitigationState::None => "None",
            MitigationState::Deflection { .. } => "Deflection",
            MitigationState::Evacuation { .. } => "Evacuation",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, MitigationState::None)
    }
}

/// Deflection effectiveness score, clamped to [0, 3].
pub fn deflection_effectiveness(delta_v_mm_s: f64, lead_years: f64) -> f64 {
    ((delta_v_mm_s / 2.0) * (lead_years / 2.0)).clamp(0.0, MAX_DEFLECTION_EFFECTIVENESS)
}

/// Multiplier applied to the severe and major radii under deflection.
///
/// Always within [0.3, 1].
pub fn deflection_factor(delta_v_mm_s: f64, lead_years: f64) -> f64 {
    let effectiveness = deflection_effectiveness(delta_v_mm_s, lead_years);
    1.0 - (DEFLECTION_REDUCTION_PER_UNIT * effectiveness).min(MAX_DEFLECTION_REDUCTION)
}

/// Shrink damage radii by a deflection factor.
pub fn deflect_radii(base: &DamageRadii, factor: f64) -> DamageRadii {
    let light_factor = (1.0 - LIGHT_RADIUS_SENSITIVITY) + LIGHT_RADIUS_SENSITIVITY * factor;
    DamageRadii {
        severe_km: base.severe_km * factor,
        major_km: base.major_km * factor,
        light_km: base.light_km * light_factor,
    }
}

/// How much of the severe zone the evacuated zone covers, in [0, 1].
pub fn severity_overlap(evac_radius_km: f64, base_severe_km: f64) -> f64 {
    if base_severe_km <= 0.0 {
        return 0.0;
    }
    (evac_radius_km / base_severe_km).clamp(0.0, 1.0)
}

/// Fraction of deaths avoided by an evacuation.
pub fn evacuation_loss_reduction(
    evac_radius_km: f64,
    coverage_pct: f64,
    base_severe_km: f64,
) -> f64 {
    let covered = (coverage_pct / 100.0).clamp(0.0, 1.0);
    MAX_EVACUATION_LOSS_REDUCTION * severity_overlap(evac_radius_km, base_severe_km) * covered
}

/// Apply an evacuation to a base outcome. Radii are unchanged.
pub fn evacuate(base: &Outcome, evac_radius_km: f64, coverage_pct: f64) -> Outcome {
    let covered = (coverage_pct / 100.0).clamp(0.0, 1.0);
    let overlap = severity_overlap(evac_radius_km, base.radii.severe_km);
    let loss_reduction = MAX_EVACUATION_LOSS_REDUCTION * overlap * covered;
    let exposure_reduction = MAX_EVACUATION_EXPOSURE_REDUCTION * overlap * covered;

    Outcome {
        population: scale_count(base.population, 1.0 - exposure_reduction),
        deaths: scale_count(base.deaths, 1.0 - loss_reduction),
        radii: base.radii,
    }
}

/// Transform a base outcome under the given strategy.
///
/// Deflection re-estimates casualties from `field`; the other modes ignore it.
pub fn apply(state: &MitigationState, base: &Outcome, field: &ExposureField) -> Outcome {
    match *state {
        MitigationState::None => *base,
        MitigationState::Deflection {
            delta_v_mm_s,
            lead_years,
        } => {
            let radii = deflect_radii(&base.radii, deflection_factor(delta_v_mm_s, lead_years));
            let estimate = casualty::estimate(field, radii.severe_km);
            Outcome {
                population: estimate.population,
                deaths: estimate.deaths,
                radii,
            }
        }
        MitigationState::Evacuation {
            radius_km,
            coverage_pct,
        } => evacuate(base, radius_km, coverage_pct),
    }
}

fn scale_count(count: u64, factor: f64) -> u64 {
    ((count as f64) * factor.clamp(0.0, 1.0)).round() as u64
}
