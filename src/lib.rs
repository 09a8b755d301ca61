//! Impact Explorer - Asteroid Impact Scenario Engine
//!
//! A library crate computing damage radii, exposed population and casualties
//! for hypothetical asteroid impacts, with deflection and evacuation
//! mitigation, transient explosion events and A/B scenario comparison.

use bevy::prelude::*;

pub mod boundaries;
pub mod casualty;
pub mod charts;
pub mod config;
pub mod explosion;
pub mod exposure;
pub mod geometry;
pub mod impact;
pub mod mitigation;
pub mod scenario;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod proptest_engine;

use boundaries::BoundariesPlugin;
use config::EngineConfig;
use explosion::ExplosionPlugin;
use scenario::ScenarioPlugin;

/// Everything the engine needs, in dependency order.
///
/// Insert an [`EngineConfig`] before adding this plugin to override the
/// defaults.
pub struct ImpactExplorerPlugin;

impl Plugin for ImpactExplorerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .add_plugins((ScenarioPlugin, ExplosionPlugin, BoundariesPlugin));
    }
}
