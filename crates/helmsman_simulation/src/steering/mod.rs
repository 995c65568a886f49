//! Steering domain: autopilot для NPC кораблей
//!
//! Содержит:
//! - SteeringState / SteeringStatus (per-agent record, живёт в AgentOrders)
//! - compute_input (control law: braking distance, strafe, rotation)
//! - run_autopilot (system → ShipInput)
//! - SteeringArrived (event)

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod systems;


pub use components::*;
pub use controller::*;
pub use events::*;
pub use systems::*;

/// Autopilot Plugin
///
/// Регистрирует run_autopilot в FixedUpdate (SimulationSet::Autopilot).
pub struct AutopilotPlugin;

impl Plugin for AutopilotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SteeringArrived>();

        app.add_systems(
            FixedUpdate,
            run_autopilot.in_set(crate::SimulationSet::Autopilot),
        );
    }
}
