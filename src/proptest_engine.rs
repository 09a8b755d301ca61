//! Property-based tests for the scenario engine using proptest.
//!
//! These tests verify ordering and monotonicity invariants across the
//! whole input domain.

use std::time::Duration;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::casualty;
use crate::explosion::{ExplosionKind, ExplosionRegistry};
use crate::exposure::sample_exposure;
use crate::impact::damage_radii;
use crate::mitigation::{self, MitigationState, deflect_radii, deflection_factor};
use crate::snapshot::{ScenarioSnapshot, SnapshotSlot, compare};
use crate::types::{DamageRadii, GeoCoord, Outcome, ScenarioParameters};

fn outcome(population: u64, deaths: u64, severe_km: f64) -> Outcome {
    Outcome {
        population,
        deaths: deaths.min(population),
        radii: DamageRadii {
            severe_km,
            major_km: severe_km * 2.2,
            light_km: severe_km * 5.0,
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Radii are strictly positive and ordered for every valid input.
    #[test]
    fn prop_radii_ordered_and_positive(
        diameter in 1.0f64..5000.0,
        speed in 1.0f64..72.0,
        angle in 0.001f64..=90.0,
    ) {
        let r = damage_radii(diameter, speed, angle);
        prop_assert!(r.severe_km > 0.0);
        prop_assert!(r.severe_km <= r.major_km);
        prop_assert!(r.major_km <= r.light_km);
    }

    /// Growing diameter or speed never shrinks any radius.
    #[test]
    fn prop_radii_monotonic_in_size_and_speed(
        diameter in 1.0f64..5000.0,
        speed in 1.0f64..72.0,
        angle in 0.001f64..=90.0,
        grow in 0.0f64..3.0,
    ) {
        let base = damage_radii(diameter, speed, angle);
        let bigger = damage_radii(diameter * (1.0 + grow), speed, angle);
        let faster = damage_radii(diameter, speed * (1.0 + grow), angle);
        for r in [bigger, faster] {
            prop_assert!(r.severe_km >= base.severe_km);
            prop_assert!(r.major_km >= base.major_km);
            prop_assert!(r.light_km >= base.light_km);
        }
    }

    /// Flattening the entry angle never grows any radius.
    #[test]
    fn prop_radii_monotonic_in_angle(
        diameter in 1.0f64..5000.0,
        speed in 1.0f64..72.0,
        angle in 0.001f64..=90.0,
        flatten in 0.0f64..1.0,
    ) {
        let steep = damage_radii(diameter, speed, angle);
        let shallow = damage_radii(diameter, speed, angle * flatten);
        prop_assert!(shallow.severe_km <= steep.severe_km);
        prop_assert!(shallow.major_km <= steep.major_km);
        prop_assert!(shallow.light_km <= steep.light_km);
    }

    /// Deflection shrinks severe/major radii by at most 70%.
    #[test]
    fn prop_deflection_bounded(
        delta_v in 0.0f64..1000.0,
        lead in 0.0f64..1000.0,
        severe in 0.05f64..200.0,
    ) {
        let factor = deflection_factor(delta_v, lead);
        prop_assert!((0.3..=1.0).contains(&factor));

        let base = outcome(0, 0, severe).radii;
        let r = deflect_radii(&base, factor);
        prop_assert!(r.severe_km <= base.severe_km);
        prop_assert!(r.major_km <= base.major_km);
        prop_assert!(r.light_km <= base.light_km);
        prop_assert!(r.severe_km >= 0.3 * base.severe_km);
        prop_assert!(r.major_km >= 0.3 * base.major_km);
    }

    /// Evacuation never adds deaths or exposure.
    #[test]
    fn prop_evacuation_never_worse(
        population in 0u64..50_000_000,
        death_share in 0.0f64..=1.0,
        severe in 0.05f64..200.0,
        evac_radius in 0.0f64..500.0,
        coverage in 0.0f64..=100.0,
    ) {
        let deaths = (population as f64 * death_share) as u64;
        let base = outcome(population, deaths, severe);
        let out = mitigation::evacuate(&base, evac_radius, coverage);
        prop_assert!(out.deaths <= base.deaths);
        prop_assert!(out.population <= base.population);
        prop_assert_eq!(out.radii, base.radii);
    }

    /// Zero coverage or zero radius leaves the outcome untouched.
    #[test]
    fn prop_evacuation_identity_at_zero(
        population in 0u64..50_000_000,
        severe in 0.05f64..200.0,
        evac_radius in 0.0f64..500.0,
        coverage in 0.0f64..=100.0,
    ) {
        let base = outcome(population, population / 3, severe);
        prop_assert_eq!(mitigation::evacuate(&base, evac_radius, 0.0), base);
        prop_assert_eq!(mitigation::evacuate(&base, 0.0, coverage), base);
    }

    /// Comparison is anti-symmetric.
    #[test]
    fn prop_compare_anti_symmetric(
        pa in 0u64..50_000_000,
        pb in 0u64..50_000_000,
        sa in 0.05f64..200.0,
        sb in 0.05f64..200.0,
    ) {
        let snap = |slot, pop, severe| ScenarioSnapshot {
            slot,
            params: ScenarioParameters::default(),
            mitigation: MitigationState::None,
            base: outcome(pop, pop / 2, severe),
            mitigated: outcome(pop, pop / 2, severe),
        };
        let a = snap(SnapshotSlot::A, pa, sa);
        let b = snap(SnapshotSlot::B, pb, sb);
        prop_assert_eq!(compare(&a, &b), -compare(&b, &a));
    }

    /// An explosion is live strictly before t0 + ttl and gone from then on.
    #[test]
    fn prop_explosion_expiry(
        t0 in 0u64..1_000_000,
        elapsed in 0u64..20_000,
    ) {
        let mut registry = ExplosionRegistry::default();
        let created = Duration::from_millis(t0);
        let id = registry.trigger(GeoCoord::default(), 10.0, ExplosionKind::Ground, created);
        let now = created + Duration::from_millis(elapsed);
        registry.sweep(now);

        let live = registry.get(id).is_some();
        prop_assert_eq!(live, elapsed < 6500);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Deaths never exceed population, and deflection never adds deaths.
    #[test]
    fn prop_casualties_bounded(
        seed in 0u64..1000,
        severe in 0.5f64..150.0,
        delta_v in 0.0f64..10.0,
        lead in 0.0f64..10.0,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = sample_exposure(GeoCoord::new(10.0, 20.0), 200.0, 1000, &mut rng);

        let est = casualty::estimate(&field, severe);
        prop_assert!(est.deaths <= est.population);

        let base = Outcome {
            population: est.population,
            deaths: est.deaths,
            radii: outcome(0, 0, severe).radii,
        };
        let strategy = MitigationState::Deflection { delta_v_mm_s: delta_v, lead_years: lead };
        let out = mitigation::apply(&strategy, &base, &field);
        prop_assert!(out.deaths <= base.deaths);
        prop_assert!(out.population <= base.population);
        prop_assert!(out.deaths <= out.population);
    }
}
