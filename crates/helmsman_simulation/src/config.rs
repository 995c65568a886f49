//! Simulation configuration (RON)
//!
//! Все поля опциональны в файле: отсутствующие берутся из `Default`.
//!
//! ```ron
//! (
//!     tick_hz: 60.0,
//!     seed: 42,
//!     log_level: Info,
//!     steering: (arrival_radius: 8.0),
//!     fire_control: (lock_on_cue: Some("lock_on")),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fire_control::CombatTargetingState;
use crate::logger::LogLevel;
use crate::shared::{DEFAULT_BULLET_MASK, DEFAULT_OBSTRUCTED_MASK};
use crate::steering::SteeringState;

/// Root config resource
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// FixedUpdate частота (Hz)
    pub tick_hz: f64,
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Порог логгера
    pub log_level: LogLevel,
    pub steering: SteeringDefaults,
    pub fire_control: FireControlDefaults,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            log_level: LogLevel::Debug,
            steering: SteeringDefaults::default(),
            fire_control: FireControlDefaults::default(),
        }
    }
}

impl SimulationConfig {
    pub const FALLBACK_TICK_HZ: f64 = 60.0;

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Длительность одного fixed тика
    ///
    /// Мусор в конфиге (0, отрицательное, NaN, inf, частота выше 1 GHz)
    /// → 60 Hz: `Time<Fixed>` паникует на нулевом timestep.
    pub fn tick_duration(&self) -> std::time::Duration {
        let fallback = std::time::Duration::from_secs_f64(1.0 / Self::FALLBACK_TICK_HZ);
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return fallback;
        }

        std::time::Duration::try_from_secs_f64(1.0 / self.tick_hz)
            .ok()
            .filter(|duration| !duration.is_zero())
            .unwrap_or(fallback)
    }
}

/// Autopilot defaults (planner использует при startup)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringDefaults {
    pub arrival_radius: f32,
    pub max_rotation_rate: f32,
    pub avoid_collisions: bool,
}

impl Default for SteeringDefaults {
    fn default() -> Self {
        Self {
            arrival_radius: SteeringState::DEFAULT_ARRIVAL_RADIUS,
            max_rotation_rate: SteeringState::DEFAULT_MAX_ROTATION_RATE,
            avoid_collisions: true,
        }
    }
}

/// Fire-control defaults для новых боевых приказов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireControlDefaults {
    pub shoot_delay: f32,
    pub rotation_speed: f32,
    pub accuracy_threshold: f32,
    pub obstructed_mask: u32,
    pub bullet_mask: u32,
    pub lock_on_cue: Option<String>,
}

impl Default for FireControlDefaults {
    fn default() -> Self {
        Self {
            shoot_delay: CombatTargetingState::DEFAULT_SHOOT_DELAY,
            rotation_speed: CombatTargetingState::DEFAULT_ROTATION_SPEED,
            accuracy_threshold: CombatTargetingState::DEFAULT_ACCURACY_THRESHOLD,
            obstructed_mask: DEFAULT_OBSTRUCTED_MASK,
            bullet_mask: DEFAULT_BULLET_MASK,
            lock_on_cue: None,
        }
    }
}

impl FireControlDefaults {
    /// Применить defaults к свежему CombatTargetingState
    pub fn apply(&self, state: &mut CombatTargetingState) {
        state.shoot_delay = self.shoot_delay.max(0.0);
        state.rotation_speed = self.rotation_speed.max(0.0);
        state.accuracy_threshold = self.accuracy_threshold.max(0.0);
        state.obstructed_mask = self.obstructed_mask;
        state.bullet_mask = self.bullet_mask;
        state.lock_on_cue = self.lock_on_cue.clone();
    }
}
