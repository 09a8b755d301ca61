//! Chart-ready data derived from outcomes.
//!
//! Shapes only; drawing is up to the caller.

use crate::types::Outcome;

/// Number of samples in the distance-vs-intensity curve.
pub const INTENSITY_SAMPLES: usize = 20;

/// Blast falloff rate per unit of normalized distance.
const BLAST_DECAY: f64 = 4.0;

/// Thermal flux falls off more slowly than blast.
const THERMAL_DECAY: f64 = 2.0;

/// One named bar group with base and mitigated values.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSeries {
    pub name: &'static str,
    pub base: u64,
    pub mitigated: u64,
}

/// Bars comparing base and mitigated outcomes: "Affected" then "Deaths".
pub fn outcome_bars(base: &Outcome, mitigated: &Outcome) -> [BarSeries; 2] {
    [
        BarSeries {
            name: "Affected",
            base: base.population,
            mitigated: mitigated.population,
        },
        BarSeries {
            name: "Deaths",
            base: base.deaths,
            mitigated: mitigated.deaths,
        },
    ]
}

/// One point of the intensity falloff curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensitySample {
    pub distance_km: f64,
    /// Normalized blast intensity, 1 at ground zero.
    pub blast: f64,
    /// Normalized thermal intensity, 1 at ground zero.
    pub thermal: f64,
}

/// Blast and thermal falloff sampled evenly over [0, light_km].
///
/// Always returns [`INTENSITY_SAMPLES`] points; both intensities are in
/// [0, 1] and never increase with distance.
pub fn intensity_curve(light_km: f64) -> Vec<IntensitySample> {
    let light_km = light_km.max(0.0);
    let last = (INTENSITY_SAMPLES - 1) as f64;

    (0..INTENSITY_SAMPLES)
        .map(|i| {
            let x = i as f64 / last;
            IntensitySample {
                distance_km: light_km * x,
                blast: (-BLAST_DECAY * x).exp(),
                thermal: (-THERMAL_DECAY * x).exp(),
            }
        })
        .collect()
}
