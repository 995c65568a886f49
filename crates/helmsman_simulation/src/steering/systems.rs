//! Autopilot systems.

use bevy::prelude::*;

use super::components::SteeringStatus;
use super::controller::{compute_input, BodyKinematics};
use super::events::SteeringArrived;
use crate::components::{AgentOrders, MapId, ShipBody, ThrustProfile};
use crate::physics::ShipInput;

/// System: SteeringState + body state → ShipInput (каждый fixed tick)
///
/// - Нет steering приказа → ShipInput не трогаем (им владеет planner shutdown)
/// - Контроллер вернул `None` → COAST (корабль дрейфует)
/// - Переход Moving → InRange → `SteeringArrived`
pub fn run_autopilot(
    mut ships: Query<(
        Entity,
        &mut AgentOrders,
        &MapId,
        &Transform,
        &ShipBody,
        Option<&ThrustProfile>,
        &mut ShipInput,
    )>,
    mut arrived: EventWriter<SteeringArrived>,
) {
    for (entity, mut orders, map, transform, body, thrust, mut input) in ships.iter_mut() {
        let Some(steering) = orders.steering.as_mut() else {
            continue;
        };

        let previous = steering.status;
        let kinematics = BodyKinematics::from_components(*map, transform, body);

        // Нет ThrustProfile → управлять нечем
        let command = match thrust {
            Some(thrust) => compute_input(steering, &kinematics, thrust),
            None => None,
        };
        *input = command.unwrap_or(ShipInput::COAST);

        if previous == steering.status {
            continue;
        }

        match steering.status {
            SteeringStatus::InRange => {
                crate::logger::log(&format!(
                    "🛬 Autopilot {:?}: in range of {:?} ({:.1}m, speed {:.2})",
                    entity,
                    steering.target.position,
                    steering.last_distance,
                    kinematics.speed()
                ));
                arrived.write(SteeringArrived {
                    entity,
                    target: steering.target,
                });
            }
            SteeringStatus::Moving => {
                crate::logger::log(&format!(
                    "🚀 Autopilot {:?}: moving to {:?} ({:.1}m)",
                    entity, steering.target.position, steering.last_distance
                ));
            }
        }
    }
}
