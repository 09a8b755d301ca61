//! Scenario derivation: parameters and strategy in, outcomes out.
//!
//! Every derived value is a function of its declared inputs:
//!
//! ```text
//! ScenarioParameters ──► DamageRadii ──► influence radius ──► ExposureField
//!          │                  │                                     │
//!          │                  └──────────► base Outcome ◄───────────┤
//! MitigationState ─────────────────────► mitigated Outcome ◄────────┘
//! ```
//!
//! The exposure field is the only expensive node and is regenerated only
//! when its own inputs (center, influence radius) change.

pub mod presets;

use bevy::prelude::*;

use crate::casualty;
use crate::config::EngineConfig;
use crate::exposure::{ExposureCache, ExposureField, influence_radius_km};
use crate::impact;
use crate::mitigation::{self, MitigationState};
use crate::snapshot::{SaveSnapshotEvent, SnapshotStore, save_snapshots};
use crate::types::{Outcome, ScenarioParameters, ScenarioSet};

pub use presets::{PRESETS, find_preset};

/// A named starting scenario.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Unique identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    pub params: ScenarioParameters,
    pub mitigation: MitigationState,
}

/// Latest derived values for the current parameters and strategy.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct ScenarioOutcome {
    /// Outcome with no mitigation.
    pub base: Outcome,
    /// Outcome after the active strategy.
    pub mitigated: Outcome,
    /// Radius the exposure field was sampled over (km).
    pub influence_radius_km: f64,
    /// Impactor kinetic energy (Mt TNT), for display.
    pub energy_mt: f64,
}

/// Base and mitigated outcomes for a consistent (params, field) pair.
///
/// Pure: `field` must already be sampled around `params.impact`.
pub fn evaluate(
    params: &ScenarioParameters,
    mitigation: &MitigationState,
    field: &ExposureField,
) -> (Outcome, Outcome) {
    let radii = impact::radii_for(params);
    let estimate = casualty::estimate(field, radii.severe_km);
    let base = Outcome {
        population: estimate.population,
        deaths: estimate.deaths,
        radii,
    };
    let mitigated = mitigation::apply(mitigation, &base, field);
    (base, mitigated)
}

/// Run the full chain, regenerating the exposure field only if needed.
pub fn recompute(
    params: &ScenarioParameters,
    mitigation: &MitigationState,
    cache: &mut ExposureCache,
    influence_floor_km: f64,
) -> ScenarioOutcome {
    let radii = impact::radii_for(params);
    let influence = influence_radius_km(&radii, influence_floor_km);
    let (field, regenerated) = cache.ensure(params.impact, influence);
    if regenerated {
        debug!(
            "Regenerated exposure field: {} points over {:.0} km",
            field.len(),
            influence
        );
    }

    let (base, mitigated) = evaluate(params, mitigation, field);
    ScenarioOutcome {
        base,
        mitigated,
        influence_radius_km: influence,
        energy_mt: impact::kinetic_energy_mt(params.diameter_m, params.speed_kms),
    }
}

/// Event to replace the current parameters and strategy with a preset.
#[derive(Message, Clone, Debug)]
pub struct LoadPresetEvent {
    pub preset_id: String,
}

/// Apply preset requests.
fn handle_load_preset_event(
    mut events: MessageReader<LoadPresetEvent>,
    mut params: ResMut<ScenarioParameters>,
    mut mitigation: ResMut<MitigationState>,
) {
    for event in events.read() {
        let Some(preset) = find_preset(&event.preset_id) else {
            warn!("Unknown preset ID: {}", event.preset_id);
            continue;
        };

        info!("Loading preset: {} ({})", preset.name, preset.id);
        *params = preset.params;
        *mitigation = preset.mitigation;
    }
}

/// Recompute derived values. Only scheduled when an input changed.
fn recompute_scenario(
    params: Res<ScenarioParameters>,
    mitigation: Res<MitigationState>,
    config: Res<EngineConfig>,
    mut cache: ResMut<ExposureCache>,
    mut outcome: ResMut<ScenarioOutcome>,
) {
    *outcome = recompute(&params, &mitigation, &mut cache, config.influence_floor_km);
    debug!(
        "Recomputed scenario ({}): base {} deaths, mitigated {} deaths",
        mitigation.label(),
        outcome.base.deaths,
        outcome.mitigated.deaths
    );
}

/// Plugin providing the scenario pipeline and A/B snapshots.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>();
        let config = app.world().resource::<EngineConfig>().clone();

        app.init_resource::<ScenarioParameters>()
            .init_resource::<MitigationState>()
            .init_resource::<ScenarioOutcome>()
            .init_resource::<SnapshotStore>()
            .insert_resource(ExposureCache::new(
                config.exposure_seed,
                config.exposure_samples,
            ))
            .add_message::<LoadPresetEvent>()
            .add_message::<SaveSnapshotEvent>()
            .configure_sets(
                Update,
                (ScenarioSet::Input, ScenarioSet::Recompute, ScenarioSet::Capture).chain(),
            )
            .add_systems(Update, handle_load_preset_event.in_set(ScenarioSet::Input))
            .add_systems(
                Update,
                recompute_scenario
                    .in_set(ScenarioSet::Recompute)
                    .run_if(
                        resource_changed::<ScenarioParameters>
                            .or(resource_changed::<MitigationState>),
                    ),
            )
            .add_systems(Update, save_snapshots.in_set(ScenarioSet::Capture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::MIN_INFLUENCE_RADIUS_KM;

    #[test]
    fn test_reference_scenario_without_mitigation() {
        let mut cache = ExposureCache::default();
        let out = recompute(
            &ScenarioParameters::default(),
            &MitigationState::None,
            &mut cache,
            MIN_INFLUENCE_RADIUS_KM,
        );

        assert!(out.base.radii.is_ordered());
        assert!(out.base.radii.severe_km < out.base.radii.major_km);
        assert!(out.base.radii.major_km < out.base.radii.light_km);
        assert!(out.base.population > 0);
        assert!(out.base.deaths > 0);
        assert!(out.base.deaths <= out.base.population);
        assert_eq!(out.mitigated, out.base);
        assert_eq!(out.influence_radius_km, MIN_INFLUENCE_RADIUS_KM);
    }

    #[test]
    fn test_reference_scenario_with_deflection() {
        let mut cache = ExposureCache::default();
        let params = ScenarioParameters::default();
        let deflection = MitigationState::Deflection {
            delta_v_mm_s: 2.0,
            lead_years: 2.0,
        };
        let out = recompute(&params, &deflection, &mut cache, MIN_INFLUENCE_RADIUS_KM);

        assert!(out.mitigated.radii.severe_km < out.base.radii.severe_km);
        assert!(out.mitigated.radii.major_km < out.base.radii.major_km);
        assert!(out.mitigated.radii.light_km < out.base.radii.light_km);
        assert!(out.mitigated.deaths < out.base.deaths);
        assert!(out.mitigated.population <= out.base.population);
    }

    #[test]
    fn test_mitigation_change_reuses_field() {
        let mut cache = ExposureCache::default();
        let params = ScenarioParameters::default();
        recompute(&params, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);
        recompute(
            &params,
            &MitigationState::Evacuation {
                radius_km: 3.0,
                coverage_pct: 50.0,
            },
            &mut cache,
            MIN_INFLUENCE_RADIUS_KM,
        );
        assert_eq!(cache.generations(), 1);

        // Moving ground zero invalidates the field
        let moved = ScenarioParameters {
            impact: crate::types::GeoCoord::new(10.0, 10.0),
            ..params
        };
        recompute(&moved, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);
        assert_eq!(cache.generations(), 2);
    }

    #[test]
    fn test_recompute_depends_only_on_inputs() {
        let mut cache = ExposureCache::default();
        let params = ScenarioParameters::default();
        let widened = ScenarioParameters {
            diameter_m: 3000.0,
            ..params
        };

        let first = recompute(&params, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);
        let wide = recompute(&widened, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);
        assert!(wide.influence_radius_km > first.influence_radius_km);
        let again = recompute(&params, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);

        assert_eq!(cache.generations(), 3);
        assert_eq!(again, first);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut cache = ExposureCache::default();
        let params = ScenarioParameters::default();
        let (field, _) = cache.ensure(params.impact, MIN_INFLUENCE_RADIUS_KM);
        let field = field.clone();

        let strategy = MitigationState::Evacuation {
            radius_km: 4.0,
            coverage_pct: 80.0,
        };
        assert_eq!(
            evaluate(&params, &strategy, &field),
            evaluate(&params, &strategy, &field)
        );
    }

    #[test]
    fn test_large_impactor_widens_influence() {
        let mut cache = ExposureCache::default();
        let params = ScenarioParameters {
            diameter_m: 5000.0,
            ..ScenarioParameters::default()
        };
        let out = recompute(&params, &MitigationState::None, &mut cache, MIN_INFLUENCE_RADIUS_KM);
        assert!(out.influence_radius_km > MIN_INFLUENCE_RADIUS_KM);
        assert_eq!(out.influence_radius_km, out.base.radii.light_km * 1.5);
    }
}
