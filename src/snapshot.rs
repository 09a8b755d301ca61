//! Saved A/B scenarios and their comparison.

use std::ops::Neg;

use bevy::prelude::*;

use crate::mitigation::MitigationState;
use crate::scenario::ScenarioOutcome;
use crate::types::{Outcome, ScenarioParameters};

/// One of the two comparison slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotSlot {
    A,
    B,
}

impl SnapshotSlot {
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotSlot::A => "A",
            SnapshotSlot::B => "B",
        }
    }
}

/// Full scenario state captured at save time.
///
/// The store only hands out shared references, so a saved snapshot is never
/// mutated; saving again into the same slot replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioSnapshot {
    pub slot: SnapshotSlot,
    pub params: ScenarioParameters,
    pub mitigation: MitigationState,
    pub base: Outcome,
    pub mitigated: Outcome,
}

/// Signed difference B − A of the mitigated outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComparisonDelta {
    pub population: i64,
    pub deaths: i64,
    pub severe_km: f64,
    pub major_km: f64,
    pub light_km: f64,
}

impl Neg for ComparisonDelta {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            population: -self.population,
            deaths: -self.deaths,
            severe_km: -self.severe_km,
            major_km: -self.major_km,
            light_km: -self.light_km,
        }
    }
}

/// Compare two snapshots field by field (B − A) on their mitigated outcomes.
pub fn compare(a: &ScenarioSnapshot, b: &ScenarioSnapshot) -> ComparisonDelta {
    let (a, b) = (&a.mitigated, &b.mitigated);
    ComparisonDelta {
        population: b.population as i64 - a.population as i64,
        deaths: b.deaths as i64 - a.deaths as i64,
        severe_km: b.radii.severe_km - a.radii.severe_km,
        major_km: b.radii.major_km - a.radii.major_km,
        light_km: b.radii.light_km - a.radii.light_km,
    }
}

/// The two snapshot slots.
#[derive(Resource, Debug, Default)]
pub struct SnapshotStore {
    a: Option<ScenarioSnapshot>,
    b: Option<ScenarioSnapshot>,
}

impl SnapshotStore {
    /// Store a snapshot in its slot, returning the one it replaced.
    pub fn save(&mut self, snapshot: ScenarioSnapshot) -> Option<ScenarioSnapshot> {
        let slot = match snapshot.slot {
            SnapshotSlot::A => &mut self.a,
            SnapshotSlot::B => &mut self.b,
        };
        slot.replace(snapshot)
    }

    pub fn get(&self, slot: SnapshotSlot) -> Option<&ScenarioSnapshot> {
        match slot {
            SnapshotSlot::A => self.a.as_ref(),
            SnapshotSlot::B => self.b.as_ref(),
        }
    }

    /// B − A, or `None` until both slots are filled.
    pub fn comparison(&self) -> Option<ComparisonDelta> {
        Some(compare(self.a.as_ref()?, self.b.as_ref()?))
    }

    pub fn clear(&mut self) {
        self.a = None;
        self.b = None;
    }
}

/// Request to capture the current scenario into a slot.
#[derive(Message, Clone, Copy, Debug)]
pub struct SaveSnapshotEvent {
    pub slot: SnapshotSlot,
}

/// Capture the current parameters, strategy and outcomes on request.
pub fn save_snapshots(
    mut events: MessageReader<SaveSnapshotEvent>,
    params: Res<ScenarioParameters>,
    mitigation: Res<MitigationState>,
    outcome: Res<ScenarioOutcome>,
    mut store: ResMut<SnapshotStore>,
) {
    for event in events.read() {
        let snapshot = ScenarioSnapshot {
            slot: event.slot,
            params: *params,
            mitigation: *mitigation,
            base: outcome.base,
            mitigated: outcome.mitigated,
        };
        let replaced = store.save(snapshot).is_some();
        info!(
            "Saved scenario {} ({}, {} deaths){}",
            event.slot.label(),
            mitigation.label(),
            outcome.mitigated.deaths,
            if replaced { ", replacing previous" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DamageRadii;

    fn snapshot(
        slot: SnapshotSlot,
        population: u64,
        deaths: u64,
        severe_km: f64,
    ) -> ScenarioSnapshot {
        let mitigated = Outcome {
            population,
            deaths,
            radii: DamageRadii {
                severe_km,
                major_km: severe_km * 2.2,
                light_km: severe_km * 5.0,
            },
        };
        ScenarioSnapshot {
            slot,
            params: ScenarioParameters::default(),
            mitigation: MitigationState::None,
            base: mitigated,
            mitigated,
        }
    }

    #[test]
    fn test_compare_is_b_minus_a() {
        let a = snapshot(SnapshotSlot::A, 1_000, 400, 5.0);
        let b = snapshot(SnapshotSlot::B, 600, 500, 4.0);
        let delta = compare(&a, &b);
        assert_eq!(delta.population, -400);
        assert_eq!(delta.deaths, 100);
        assert_eq!(delta.severe_km, -1.0);
        assert!((delta.light_km - (-5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_compare_uses_mitigated_outcome() {
        let mut a = snapshot(SnapshotSlot::A, 1_000, 400, 5.0);
        a.base.deaths = 9_999;
        let b = snapshot(SnapshotSlot::B, 1_000, 400, 5.0);
        assert_eq!(compare(&a, &b), ComparisonDelta::default());
    }

    #[test]
    fn test_anti_symmetry() {
        let a = snapshot(SnapshotSlot::A, 12_345, 678, 3.3);
        let b = snapshot(SnapshotSlot::B, 9_876, 5_432, 7.1);
        assert_eq!(compare(&a, &b), -compare(&b, &a));
    }

    #[test]
    fn test_comparison_requires_both_slots() {
        let mut store = SnapshotStore::default();
        assert!(store.comparison().is_none());

        store.save(snapshot(SnapshotSlot::A, 10, 1, 1.0));
        assert!(store.comparison().is_none());

        store.save(snapshot(SnapshotSlot::B, 20, 2, 2.0));
        let delta = store.comparison().expect("both slots filled");
        assert_eq!(delta.population, 10);

        store.clear();
        assert!(store.comparison().is_none());
    }

    #[test]
    fn test_save_replaces_same_slot() {
        let mut store = SnapshotStore::default();
        assert!(store.save(snapshot(SnapshotSlot::A, 10, 1, 1.0)).is_none());

        let replaced = store
            .save(snapshot(SnapshotSlot::A, 30, 3, 1.5))
            .expect("previous snapshot returned");
        assert_eq!(replaced.mitigated.population, 10);
        assert_eq!(store.get(SnapshotSlot::A).expect("saved").mitigated.population, 30);
        assert!(store.get(SnapshotSlot::B).is_none());
    }
}
