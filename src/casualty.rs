//! Population and casualty estimation over an exposure field.

use crate::exposure::ExposureField;
use crate::geometry::haversine_km;
use crate::types::GeoCoord;

/// People represented by one unit of exposure weight.
pub const PEOPLE_PER_WEIGHT: f64 = 10_000.0;

/// Lethality at the edge of the radius.
pub const EDGE_LETHALITY: f64 = 0.35;

/// Lethality at ground zero.
pub const CENTER_LETHALITY: f64 = 0.85;

/// Affected population and deaths within a radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CasualtyEstimate {
    pub population: u64,
    pub deaths: u64,
}

/// Fraction of the exposed population killed at `distance_km` inside a zone
/// of `radius_km`. Rises linearly toward the center.
pub fn lethality(distance_km: f64, radius_km: f64) -> f64 {
    let proximity = 1.0 - (distance_km / radius_km).clamp(0.0, 1.0);
    EDGE_LETHALITY + (CENTER_LETHALITY - EDGE_LETHALITY) * proximity
}

/// Integrate the field within `radius_km` of its center.
///
/// Deaths never exceed population. A non-positive radius yields zero.
pub fn estimate(field: &ExposureField, radius_km: f64) -> CasualtyEstimate {
    if radius_km <= 0.0 || field.is_empty() {
        return CasualtyEstimate::default();
    }

    let (weight, lethal) = field
        .points
        .iter()
        .filter_map(|p| {
            let d = haversine_km(field.center, GeoCoord::new(p.lat, p.lng));
            (d <= radius_km).then(|| (p.weight, p.weight * lethality(d, radius_km)))
        })
        .fold((0.0, 0.0), |(w, l), (pw, pl)| (w + pw, l + pl));

    let population = to_people(weight);
    let deaths = to_people(lethal).min(population);
    CasualtyEstimate { population, deaths }
}

/// Affected population within `radius_km`.
pub fn estimate_population(field: &ExposureField, radius_km: f64) -> u64 {
    estimate(field, radius_km).population
}

/// Deaths within `radius_km`.
pub fn estimate_deaths(field: &ExposureField, radius_km: f64) -> u64 {
    estimate(field, radius_km).deaths
}

fn to_people(weight: f64) -> u64 {
    (weight * PEOPLE_PER_WEIGHT).round().max(0.0) as u64
}
