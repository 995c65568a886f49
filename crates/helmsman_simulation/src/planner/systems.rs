//! Planner executor systems: Blackboard → AgentOrders.

use bevy::prelude::*;
use rand::Rng;

use super::blackboard::{Blackboard, NavigationGoal};
use super::operator::{MoveToOperator, OperatorStatus};
use crate::components::{AgentOrders, MapCoordinates, MapId};
use crate::config::SimulationConfig;
use crate::fire_control::{CombatTargetingState, UNOCCLUDED_COOLDOWN};
use crate::physics::ShipInput;
use crate::DeterministicRng;

/// System: navigation goal → steering (MoveToOperator lifecycle)
///
/// Каждый тик:
/// - нет goal → shutdown (если steering был)
/// - goal есть, steering нет, задача не завершена → startup
/// - update → OperatorStatus в blackboard; Finished/Failed → shutdown
pub fn apply_navigation_goals(
    mut agents: Query<(Entity, &mut Blackboard, &mut AgentOrders, &MapId, &mut ShipInput)>,
    positions: Query<(&MapId, &Transform)>,
    config: Res<SimulationConfig>,
) {
    for (entity, mut blackboard, mut orders, map, mut input) in agents.iter_mut() {
        let Some(goal) = blackboard.navigation else {
            if orders.steering.is_some() {
                MoveToOperator::shutdown(&mut orders, &mut input);
            }
            blackboard.active_revision = None;
            continue;
        };

        if blackboard.move_status.is_terminal() {
            continue;
        }

        // Follow: позиция цели на этот тик
        let goal_position = match goal {
            NavigationGoal::Coordinates(coordinates) => Some(coordinates),
            NavigationGoal::Entity(target) => positions
                .get(target)
                .ok()
                .map(|(target_map, transform)| {
                    MapCoordinates::from_transform(*target_map, transform)
                }),
        };

        // Новый set_navigation (другие arrival settings) → полный restart
        if orders.steering.is_none() || blackboard.needs_startup() {
            let Some(start) = goal_position else {
                finish(entity, &mut blackboard, &mut orders, &mut input, OperatorStatus::Failed);
                continue;
            };
            MoveToOperator::startup(&mut orders, start, &blackboard.arrival, &config.steering);
            blackboard.active_revision = Some(blackboard.navigation_revision);
            crate::logger::log(&format!(
                "🧭 MoveTo {:?}: startup → {:?} (map {:?})",
                entity, start.position, start.map
            ));
        }

        let status = MoveToOperator::update(&mut orders, *map, goal_position);
        if status.is_terminal() {
            finish(entity, &mut blackboard, &mut orders, &mut input, status);
        }
    }
}

fn finish(
    entity: Entity,
    blackboard: &mut Blackboard,
    orders: &mut AgentOrders,
    input: &mut ShipInput,
    status: OperatorStatus,
) {
    blackboard.move_status = status;

    match status {
        OperatorStatus::Finished => {
            crate::logger::log(&format!("✅ MoveTo {:?}: finished", entity));
        }
        _ => {
            crate::logger::log_warning(&format!(
                "MoveTo {:?}: failed (goal {:?} unreachable)",
                entity, blackboard.navigation
            ));
        }
    }

    if blackboard.clear_on_arrival || status == OperatorStatus::Failed {
        blackboard.clear_navigation();
    }
    blackboard.active_revision = None;
    MoveToOperator::shutdown(orders, input);
}

/// System: attack target → CombatTargetingState
///
/// Новый боевой приказ получает случайную фазу LOS таймера из
/// `DeterministicRng`, чтобы raycast'ы агентов не совпадали по тикам.
pub fn apply_combat_orders(
    mut agents: Query<(Entity, &Blackboard, &mut AgentOrders)>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, blackboard, mut orders) in agents.iter_mut() {
        let Some(target) = blackboard.attack_target else {
            if orders.combat.is_some() {
                orders.combat = None;
                crate::logger::log(&format!("FireControl {:?}: order withdrawn", entity));
            }
            continue;
        };

        match orders.combat.as_mut() {
            Some(combat) => {
                combat.retarget(Some(target));
                combat.weapon = blackboard.weapon;
            }
            None => {
                let phase = rng.rng.gen_range(0.0..UNOCCLUDED_COOLDOWN);
                let mut combat = CombatTargetingState::new(target)
                    .with_weapon(blackboard.weapon)
                    .with_los_phase(phase);
                config.fire_control.apply(&mut combat);

                crate::logger::log(&format!(
                    "⚔️ FireControl {:?}: engage {:?} (LOS phase {:.3}s)",
                    entity, target, phase
                ));
                orders.combat = Some(combat);
            }
        }
    }
}
