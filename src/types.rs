//! Core scenario types and constants shared across the engine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// System set ordering the per-frame scenario pipeline.
///
/// Inputs (presets, slider edits) land first, then derived values are
/// recomputed, then snapshots capture the fresh outcome.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScenarioSet {
    /// Parameter and strategy changes
    Input,
    /// Radii, exposure and casualty recompute
    Recompute,
    /// Snapshot capture
    Capture,
}

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    /// Latitude in degrees, [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, [-180, 180].
    pub lng: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Impactor parameters as set by the user.
///
/// Replaced wholesale on every edit; any change triggers a full recompute
/// of the derived outcome.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Impactor diameter in meters.
    pub diameter_m: f64,
    /// Entry speed in km/s.
    pub speed_kms: f64,
    /// Entry angle above the horizon in degrees, (0, 90].
    pub angle_deg: f64,
    /// Ground-zero coordinate.
    pub impact: GeoCoord,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            diameter_m: 200.0,
            speed_kms: 19.0,
            angle_deg: 45.0,
            // Central Paris
            impact: GeoCoord::new(48.8566, 2.3522),
        }
    }
}

/// Concentric damage bands, innermost first.
///
/// Invariant: `0 < severe_km <= major_km <= light_km`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageRadii {
    /// Severe blast damage (innermost, strongest).
    pub severe_km: f64,
    /// Major structural damage.
    pub major_km: f64,
    /// Light damage / thermal effects (outermost, weakest).
    pub light_km: f64,
}

impl DamageRadii {
    /// Check the ordering invariant.
    pub fn is_ordered(&self) -> bool {
        0.0 < self.severe_km && self.severe_km <= self.major_km && self.major_km <= self.light_km
    }
}

/// Affected population, deaths and the radii they were derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Outcome {
    pub population: u64,
    pub deaths: u64,
    pub radii: DamageRadii,
}
