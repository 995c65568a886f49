//! Planner handoff: typed blackboard между planner и controllers
//!
//! Planner (HTN/FSM, внешний) пишет `Blackboard`; эти системы переводят его в
//! `AgentOrders`:
//! - navigation goal → MoveToOperator → SteeringState
//! - attack target → CombatTargetingState (LOS phase из DeterministicRng)

use bevy::prelude::*;

pub mod blackboard;
pub mod operator;
pub mod systems;

pub use blackboard::*;
pub use operator::*;
pub use systems::*;

/// Planner Plugin
///
/// FixedUpdate (SimulationSet::Planning), до autopilot и fire control.
pub struct PlannerPlugin;

impl Plugin for PlannerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Blackboard>();

        app.add_systems(
            FixedUpdate,
            (apply_navigation_goals, apply_combat_orders)
                .chain()
                .in_set(crate::SimulationSet::Planning),
        );
    }
}
