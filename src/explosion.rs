//! Transient explosion ring events.
//!
//! Explosions are triggered on demand and expire on their own after a fixed
//! time-to-live. They are independent of the persistent impact rings.
//!
//! Expired events are removed by a periodic sweep. The sweep timer only
//! exists while at least one event is live: it is started by the first
//! trigger and dropped as soon as a sweep leaves the registry empty.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::types::GeoCoord;

/// Lifetime of an explosion event.
pub const EXPLOSION_TTL: Duration = Duration::from_millis(6500);

/// Interval between sweeps while events are live.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(500);

/// Live events kept before the oldest is evicted.
pub const MAX_LIVE_EXPLOSIONS: usize = 32;

/// Smallest ring radius (km).
pub const MIN_EXPLOSION_RADIUS_KM: f64 = 1.0;

/// Where the detonation happens. Only affects rendering style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosionKind {
    Ground,
    Airburst,
    Water,
}

/// Render style for an explosion kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionStyle {
    /// Color at the ring's leading edge.
    pub core: Color,
    /// Color the ring fades to.
    pub fade: Color,
    /// Ring expansion speed in radii per second.
    pub propagation_speed: f32,
}

impl ExplosionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExplosionKind::Ground => "Ground",
            ExplosionKind::Airburst => "Airburst",
            ExplosionKind::Water => "Water",
        }
    }

    pub fn style(&self) -> ExplosionStyle {
        match self {
            ExplosionKind::Ground => ExplosionStyle {
                core: Color::srgb(1.0, 0.55, 0.1),
                fade: Color::srgba(0.6, 0.1, 0.05, 0.0),
                propagation_speed: 1.0,
            },
            ExplosionKind::Airburst => ExplosionStyle {
                core: Color::srgb(1.0, 0.95, 0.6),
                fade: Color::srgba(1.0, 0.5, 0.2, 0.0),
                propagation_speed: 1.6,
            },
            ExplosionKind::Water => ExplosionStyle {
                core: Color::srgb(0.6, 0.85, 1.0),
                fade: Color::srgba(0.1, 0.3, 0.8, 0.0),
                propagation_speed: 0.7,
            },
        }
    }
}

/// Unique token identifying an explosion event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExplosionId(pub u64);

/// A live explosion ring.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionEvent {
    pub id: ExplosionId,
    pub center: GeoCoord,
    pub radius_km: f64,
    pub kind: ExplosionKind,
    /// Elapsed app time at creation.
    pub created_at: Duration,
    pub ttl: Duration,
}

impl ExplosionEvent {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.age(now) >= self.ttl
    }

    /// Animation progress in [0, 1].
    pub fn progress(&self, now: Duration) -> f32 {
        if self.ttl.is_zero() {
            return 1.0;
        }
        (self.age(now).as_secs_f32() / self.ttl.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn style(&self) -> ExplosionStyle {
        self.kind.style()
    }
}

/// All live explosion events, oldest first.
#[derive(Resource, Debug)]
pub struct ExplosionRegistry {
    events: VecDeque<ExplosionEvent>,
    next_id: u64,
    ttl: Duration,
    capacity: usize,
}

impl Default for ExplosionRegistry {
    fn default() -> Self {
        Self::new(EXPLOSION_TTL, MAX_LIVE_EXPLOSIONS)
    }
}

impl ExplosionRegistry {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            next_id: 0,
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Register a new explosion. At capacity the oldest event is evicted.
    pub fn trigger(
        &mut self,
        center: GeoCoord,
        diameter_km: f64,
        kind: ExplosionKind,
        now: Duration,
    ) -> ExplosionId {
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }

        let id = ExplosionId(self.next_id);
        self.next_id += 1;
        self.events.push_back(ExplosionEvent {
            id,
            center,
            radius_km: (diameter_km * 0.5).max(MIN_EXPLOSION_RADIUS_KM),
            kind,
            created_at: now,
            ttl: self.ttl,
        });
        id
    }

    /// Drop every event whose age has reached its TTL. Returns how many
    /// were removed.
    pub fn sweep(&mut self, now: Duration) -> usize {
        let before = self.events.len();
        self.events.retain(|e| !e.is_expired(now));
        before - self.events.len()
    }

    pub fn live(&self) -> impl Iterator<Item = &ExplosionEvent> {
        self.events.iter()
    }

    pub fn get(&self, id: ExplosionId) -> Option<&ExplosionEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// The periodic sweep task. `None` while stopped.
#[derive(Resource, Debug)]
pub struct ExplosionSweep {
    timer: Option<Timer>,
    interval: Duration,
}

impl Default for ExplosionSweep {
    fn default() -> Self {
        Self::new(SWEEP_INTERVAL)
    }
}

impl ExplosionSweep {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: None,
            interval,
        }
    }

    /// Start ticking. No-op if already running.
    pub fn start(&mut self) {
        if self.timer.is_none() {
            self.timer = Some(Timer::new(self.interval, TimerMode::Repeating));
        }
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Advance the timer. Returns true when a sweep is due.
    pub fn tick(&mut self, delta: Duration) -> bool {
        match self.timer.as_mut() {
            Some(timer) => timer.tick(delta).just_finished(),
            None => false,
        }
    }
}

/// Request to spawn an explosion ring.
#[derive(Message, Clone, Debug)]
pub struct TriggerExplosionEvent {
    pub center: GeoCoord,
    pub diameter_km: f64,
    pub kind: ExplosionKind,
}

/// Register requested explosions and make sure the sweep is running.
pub fn handle_trigger_events(
    mut events: MessageReader<TriggerExplosionEvent>,
    mut registry: ResMut<ExplosionRegistry>,
    mut sweep: ResMut<ExplosionSweep>,
    time: Res<Time>,
) {
    for event in events.read() {
        let id = registry.trigger(event.center, event.diameter_km, event.kind, time.elapsed());
        debug!(
            "{} explosion {:?} at ({:.3}, {:.3}), {} live",
            event.kind.name(),
            id,
            event.center.lat,
            event.center.lng,
            registry.len()
        );
        sweep.start();
    }
}

/// Run condition: the sweep timer exists.
pub fn sweep_running(sweep: Res<ExplosionSweep>) -> bool {
    sweep.is_running()
}

/// Remove expired explosions every sweep interval; stop once none remain.
pub fn sweep_expired_explosions(
    mut registry: ResMut<ExplosionRegistry>,
    mut sweep: ResMut<ExplosionSweep>,
    time: Res<Time>,
) {
    if !sweep.tick(time.delta()) {
        return;
    }

    let removed = registry.sweep(time.elapsed());
    if removed > 0 {
        debug!("Swept {} expired explosion(s), {} live", removed, registry.len());
    }
    if registry.is_empty() {
        sweep.stop();
        debug!("No live explosions, sweep stopped");
    }
}

/// Plugin providing explosion events and their expiry sweep.
pub struct ExplosionPlugin;

impl Plugin for ExplosionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>();
        let config = app.world().resource::<EngineConfig>().clone();

        app.add_message::<TriggerExplosionEvent>()
            .insert_resource(ExplosionRegistry::new(
                config.explosion_ttl(),
                config.max_live_explosions,
            ))
            .insert_resource(ExplosionSweep::new(config.sweep_interval()))
            .add_systems(
                Update,
                (
                    handle_trigger_events,
                    sweep_expired_explosions.run_if(sweep_running),
                )
                    .chain(),
            );
    }
}
