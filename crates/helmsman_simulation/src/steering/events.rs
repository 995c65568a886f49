//! Steering events

use bevy::prelude::*;

use crate::components::MapCoordinates;

/// Event: autopilot reached its target (Moving → InRange edge)
///
/// Генерируется `run_autopilot` один раз на переход.
/// Читается planner'ом (MoveToOperator → Finished).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SteeringArrived {
    pub entity: Entity,
    pub target: MapCoordinates,
}
