//! Impact Explorer - headless scenario runner
//!
//! Loads the reference scenario, compares it with a deflected variant and
//! plays out a single explosion event, logging everything along the way.

use std::thread;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use impact_explorer::ImpactExplorerPlugin;
use impact_explorer::charts::{intensity_curve, outcome_bars};
use impact_explorer::config::EngineConfig;
use impact_explorer::explosion::{ExplosionKind, ExplosionRegistry, TriggerExplosionEvent};
use impact_explorer::mitigation::MitigationState;
use impact_explorer::scenario::{LoadPresetEvent, ScenarioOutcome};
use impact_explorer::snapshot::{SaveSnapshotEvent, SnapshotSlot, SnapshotStore};
use impact_explorer::types::ScenarioParameters;

/// Real time between frames while waiting for explosions to expire.
const FRAME: Duration = Duration::from_millis(100);

/// Give up waiting for the sweep after this many frames.
const MAX_FRAMES: usize = 200;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        // Insert config before the engine plugin reads it
        .insert_resource(EngineConfig::from_env_or_default())
        .add_plugins(ImpactExplorerPlugin);

    // Scenario A: reference impact, no mitigation
    app.world_mut().write_message(LoadPresetEvent {
        preset_id: "reference".to_string(),
    });
    app.update();
    report(app.world());
    app.world_mut()
        .write_message(SaveSnapshotEvent { slot: SnapshotSlot::A });
    app.update();

    // Scenario B: same impactor, deflected
    *app.world_mut().resource_mut::<MitigationState>() = MitigationState::Deflection {
        delta_v_mm_s: 2.0,
        lead_years: 2.0,
    };
    app.update();
    report(app.world());
    app.world_mut()
        .write_message(SaveSnapshotEvent { slot: SnapshotSlot::B });
    app.update();

    match app.world().resource::<SnapshotStore>().comparison() {
        Some(delta) => info!(
            "B - A: population {:+}, deaths {:+}, radii {:+.2} / {:+.2} / {:+.2} km",
            delta.population, delta.deaths, delta.severe_km, delta.major_km, delta.light_km
        ),
        None => warn!("Comparison incomplete"),
    }

    // Detonate at ground zero and wait for the ring to expire
    let params = *app.world().resource::<ScenarioParameters>();
    app.world_mut().write_message(TriggerExplosionEvent {
        center: params.impact,
        diameter_km: params.diameter_m / 1000.0 * 50.0,
        kind: ExplosionKind::Airburst,
    });
    app.update();
    info!(
        "{} explosion(s) live",
        app.world().resource::<ExplosionRegistry>().len()
    );

    for _ in 0..MAX_FRAMES {
        thread::sleep(FRAME);
        app.update();
        if app.world().resource::<ExplosionRegistry>().is_empty() {
            info!("All explosions expired");
            return;
        }
    }
    warn!("Explosions still live after {} frames", MAX_FRAMES);
}

fn report(world: &World) {
    let outcome = world.resource::<ScenarioOutcome>();
    let mitigation = world.resource::<MitigationState>();
    let radii = outcome.mitigated.radii;

    info!(
        "[{}] {:.0} Mt, radii {:.2} / {:.2} / {:.2} km",
        mitigation.label(),
        outcome.energy_mt,
        radii.severe_km,
        radii.major_km,
        radii.light_km
    );
    for series in outcome_bars(&outcome.base, &outcome.mitigated) {
        info!(
            "  {:<8} base {:>12}  mitigated {:>12}",
            series.name, series.base, series.mitigated
        );
    }
    if let Some(edge) = intensity_curve(radii.light_km).last() {
        info!(
            "  at {:.1} km: blast {:.2}, thermal {:.2}",
            edge.distance_km, edge.blast, edge.thermal
        );
    }
}
