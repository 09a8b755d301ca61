//! Common test utilities for integration tests.
#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use impact_explorer::ImpactExplorerPlugin;
use impact_explorer::config::EngineConfig;
use impact_explorer::exposure::{ExposureCache, ExposureField};
use impact_explorer::types::{GeoCoord, ScenarioParameters};

/// Frame length used by headless apps with a manual clock.
pub const FRAME: Duration = Duration::from_millis(100);

/// Minimal headless app running the full engine with a smaller exposure
/// field to keep tests fast.
pub fn engine_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(EngineConfig {
            exposure_samples: 2000,
            ..EngineConfig::default()
        })
        .add_plugins(ImpactExplorerPlugin);
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Exposure field for the reference scenario with the default seed.
pub fn reference_field() -> ExposureField {
    let params = ScenarioParameters::default();
    let mut cache = ExposureCache::default();
    let (field, _) = cache.ensure(params.impact, 200.0);
    field.clone()
}

/// Parameters for the reference impactor at another location.
pub fn reference_at(lat: f64, lng: f64) -> ScenarioParameters {
    ScenarioParameters {
        impact: GeoCoord::new(lat, lng),
        ..ScenarioParameters::default()
    }
}
