//! Synthetic population field around an impact site.
//!
//! Not real demographic data: a Monte-Carlo proxy that scatters weighted
//! points around ground zero, denser and heavier near the center as if the
//! impact landed on an urban core.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::destination;
use crate::types::{DamageRadii, GeoCoord};

/// Default number of points per generated field.
pub const DEFAULT_SAMPLE_COUNT: usize = 4000;

/// Smallest influence radius the pipeline samples over (km).
pub const MIN_INFLUENCE_RADIUS_KM: f64 = 200.0;

/// Influence radius as a multiple of the light-damage radius.
pub const INFLUENCE_TO_LIGHT: f64 = 1.5;

/// Radial shaping exponent. Values above 1 pull points toward the center.
pub const RADIAL_CONCENTRATION: f64 = 1.8;

/// Weight e-folding distance as a fraction of the spread radius.
pub const WEIGHT_DECAY_FRACTION: f64 = 0.25;

/// Default RNG seed for reproducible fields.
pub const DEFAULT_EXPOSURE_SEED: u64 = 42;

/// A single synthetic population sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposurePoint {
    pub lat: f64,
    pub lng: f64,
    /// Relative population weight, always positive.
    pub weight: f64,
}

/// A generated set of exposure points and the inputs it was generated from.
///
/// Never mutated after generation; a change of center or radius produces a
/// new field.
#[derive(Clone, Debug, Default)]
pub struct ExposureField {
    pub center: GeoCoord,
    pub influence_radius_km: f64,
    pub points: Vec<ExposurePoint>,
}

impl ExposureField {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest weight in the field, used to normalize heatmap intensity.
    pub fn max_weight(&self) -> f64 {
        self.points.iter().map(|p| p.weight).fold(0.0, f64::max)
    }
}

/// Radius over which the field is sampled for a given set of damage bands.
pub fn influence_radius_km(radii: &DamageRadii, floor_km: f64) -> f64 {
    (radii.light_km * INFLUENCE_TO_LIGHT).max(floor_km)
}

/// Scatter `count` weighted points within `radius_km` of `center`.
///
/// Distance from the center follows `radius · u^RADIAL_CONCENTRATION` with
/// uniform `u`, so density falls off with distance. Weights decay
/// exponentially with distance and carry ±40% jitter.
pub fn sample_exposure<R: Rng>(
    center: GeoCoord,
    radius_km: f64,
    count: usize,
    rng: &mut R,
) -> ExposureField {
    let spread = radius_km.max(1.0);
    let decay = spread * WEIGHT_DECAY_FRACTION;

    let points = (0..count)
        .map(|_| {
            let u: f64 = rng.gen_range(0.0..1.0);
            let distance = spread * u.powf(RADIAL_CONCENTRATION);
            let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
            let jitter = rng.gen_range(0.6..1.4);

            let at = destination(center, bearing, distance);
            ExposurePoint {
                lat: at.lat,
                lng: at.lng,
                weight: (-distance / decay).exp() * jitter,
            }
        })
        .collect();

    ExposureField {
        center,
        influence_radius_km: radius_km,
        points,
    }
}

/// Inputs that invalidate a cached field.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ExposureKey {
    center: GeoCoord,
    radius_km: f64,
}

/// Fold the field inputs into the base seed.
///
/// Identical inputs always give the same stream, regardless of which fields
/// were generated before.
fn field_seed(seed: u64, center: GeoCoord, radius_km: f64) -> u64 {
    [center.lat.to_bits(), center.lng.to_bits(), radius_km.to_bits()]
        .into_iter()
        .fold(seed, |acc, bits| mix64(acc ^ bits))
}

/// SplitMix64 finalizer.
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Owns the current exposure field and regenerates it only when the center
/// or influence radius changes.
///
/// Each field is seeded from its own inputs, so a field is a pure function of
/// `(seed, center, radius)`.
#[derive(Resource)]
pub struct ExposureCache {
    seed: u64,
    sample_count: usize,
    key: Option<ExposureKey>,
    field: ExposureField,
    generations: u64,
}

impl Default for ExposureCache {
    fn default() -> Self {
        Self::new(DEFAULT_EXPOSURE_SEED, DEFAULT_SAMPLE_COUNT)
    }
}

impl ExposureCache {
    pub fn new(seed: u64, sample_count: usize) -> Self {
        Self {
            seed,
            sample_count,
            key: None,
            field: ExposureField::default(),
            generations: 0,
        }
    }

    /// Return the field for these inputs, regenerating if they changed.
    ///
    /// The second element is true when a new field was generated.
    pub fn ensure(&mut self, center: GeoCoord, radius_km: f64) -> (&ExposureField, bool) {
        let key = ExposureKey { center, radius_km };
        let regenerated = self.key != Some(key);
        if regenerated {
            let mut rng = ChaCha8Rng::seed_from_u64(field_seed(self.seed, center, radius_km));
            self.field = sample_exposure(center, radius_km, self.sample_count, &mut rng);
            self.key = Some(key);
            self.generations += 1;
        }
        (&self.field, regenerated)
    }

    /// The most recently generated field (empty before the first `ensure`).
    pub fn field(&self) -> &ExposureField {
        &self.field
    }

    /// Number of fields generated so far.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}
