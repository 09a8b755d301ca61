//! Preset scenario definitions.
//!
//! A handful of starting points covering each mitigation mode. Coordinates
//! are real places; sizes and speeds are illustrative.

use crate::mitigation::MitigationState;
use crate::types::{GeoCoord, ScenarioParameters};

use super::Preset;

/// All available presets. The first entry is loaded on startup.
pub static PRESETS: &[Preset] = &[
    REFERENCE,
    TUNGUSKA,
    CITY_EVACUATION,
    DEFLECTION_DRILL,
    OCEAN_STRIKE,
];

/// Preset 1: Reference impact (default)
///
/// A 200 m stony body at 19 km/s and 45° over Paris, no mitigation.
pub static REFERENCE: Preset = Preset {
    id: "reference",
    name: "Reference Impact",
    description: "200 m impactor over Paris at 19 km/s, 45°. No mitigation.",
    params: ScenarioParameters {
        diameter_m: 200.0,
        speed_kms: 19.0,
        angle_deg: 45.0,
        impact: GeoCoord::new(48.8566, 2.3522),
    },
    mitigation: MitigationState::None,
};

/// Preset 2: Tunguska-like event
///
/// Small, shallow entry over sparsely populated Siberian taiga.
pub static TUNGUSKA: Preset = Preset {
    id: "tunguska",
    name: "Tunguska 1908",
    description: "60 m body at a shallow 30° over the Siberian taiga.",
    params: ScenarioParameters {
        diameter_m: 60.0,
        speed_kms: 15.0,
        angle_deg: 30.0,
        impact: GeoCoord::new(60.886, 101.894),
    },
    mitigation: MitigationState::None,
};

/// Preset 3: Evacuation of a megacity
///
/// Short warning time; deflection is not an option, so the city empties
/// its core.
pub static CITY_EVACUATION: Preset = Preset {
    id: "city_evacuation",
    name: "Tokyo Evacuation",
    description: "140 m impactor over Tokyo. 70% of a 25 km zone evacuated.",
    params: ScenarioParameters {
        diameter_m: 140.0,
        speed_kms: 17.0,
        angle_deg: 60.0,
        impact: GeoCoord::new(35.6762, 139.6503),
    },
    mitigation: MitigationState::Evacuation {
        radius_km: 25.0,
        coverage_pct: 70.0,
    },
};

/// Preset 4: Deflection drill
///
/// Apophis-sized body with four years of warning and a kinetic nudge.
pub static DEFLECTION_DRILL: Preset = Preset {
    id: "deflection_drill",
    name: "Deflection Drill",
    description: "370 m body aimed at New York, deflected 2 mm/s with 4 years lead.",
    params: ScenarioParameters {
        diameter_m: 370.0,
        speed_kms: 12.6,
        angle_deg: 50.0,
        impact: GeoCoord::new(40.7128, -74.006),
    },
    mitigation: MitigationState::Deflection {
        delta_v_mm_s: 2.0,
        lead_years: 4.0,
    },
};

/// Preset 5: Ocean strike
///
/// Large steep impact in the mid-Atlantic, far from dense population.
pub static OCEAN_STRIKE: Preset = Preset {
    id: "ocean_strike",
    name: "Mid-Atlantic Strike",
    description: "500 m impactor into the open Atlantic at 20 km/s.",
    params: ScenarioParameters {
        diameter_m: 500.0,
        speed_kms: 20.0,
        angle_deg: 70.0,
        impact: GeoCoord::new(30.0, -40.0),
    },
    mitigation: MitigationState::None,
};

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}
