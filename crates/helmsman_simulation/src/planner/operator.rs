//! MoveTo primitive operator
//!
//! Lifecycle (HTN primitive task):
//! - startup: SteeringState из goal + arrival settings
//! - update: статус steering → OperatorStatus
//! - shutdown: снять steering, обнулить ShipInput

use bevy::prelude::*;

use super::blackboard::ArrivalSettings;
use crate::components::{AgentOrders, MapCoordinates, MapId};
use crate::config::SteeringDefaults;
use crate::physics::ShipInput;
use crate::steering::SteeringState;

/// Outcome of one operator update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum OperatorStatus {
    #[default]
    Continuing,
    Finished,
    Failed,
}

impl OperatorStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OperatorStatus::Continuing)
    }
}

pub struct MoveToOperator;

impl MoveToOperator {
    pub fn startup(
        orders: &mut AgentOrders,
        target: MapCoordinates,
        arrival: &ArrivalSettings,
        defaults: &SteeringDefaults,
    ) {
        let state = SteeringState::new(target)
            .with_arrival_radius(arrival.range.unwrap_or(defaults.arrival_radius))
            .with_max_arrival_speed(arrival.max_arrival_speed)
            .with_max_rotation_rate(defaults.max_rotation_rate)
            .with_rotation_offset(arrival.rotation_offset)
            .with_avoid_collisions(defaults.avoid_collisions);

        orders.steering = Some(state);
    }

    /// `goal`: актуальная позиция цели (None → followed entity исчез).
    ///
    /// Цель на другой карте → Failed (autopilot туда не долетит).
    pub fn update(
        orders: &mut AgentOrders,
        agent_map: MapId,
        goal: Option<MapCoordinates>,
    ) -> OperatorStatus {
        let Some(steering) = orders.steering.as_mut() else {
            return OperatorStatus::Failed;
        };

        let Some(goal) = goal else {
            return OperatorStatus::Failed;
        };

        if goal.map != agent_map {
            return OperatorStatus::Failed;
        }

        steering.retarget(goal);

        if steering.is_in_range() {
            OperatorStatus::Finished
        } else {
            OperatorStatus::Continuing
        }
    }

    pub fn shutdown(orders: &mut AgentOrders, input: &mut ShipInput) {
        orders.steering = None;
        *input = ShipInput::COAST;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steering::SteeringStatus;

    const MAP: MapId = MapId(1);

    fn coords(x: f32, y: f32) -> MapCoordinates {
        MapCoordinates::new(MAP, Vec2::new(x, y))
    }

    #[test]
    fn test_startup_applies_settings() {
        let mut orders = AgentOrders::default();
        let arrival = ArrivalSettings {
            range: None,
            max_arrival_speed: Some(0.1),
            rotation_offset: 0.5,
        };

        let defaults = SteeringDefaults::default();
        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &arrival, &defaults);

        let steering = orders.steering.expect("steering started");
        assert_eq!(steering.arrival_radius, SteeringState::DEFAULT_ARRIVAL_RADIUS);
        assert_eq!(steering.max_arrival_speed, Some(0.1));
        assert_eq!(steering.target_rotation_offset, 0.5);
        assert_eq!(steering.status, SteeringStatus::Moving);
    }

    #[test]
    fn test_startup_carries_avoid_collisions_hint() {
        let mut orders = AgentOrders::default();
        let defaults = SteeringDefaults {
            avoid_collisions: false,
            ..default()
        };

        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &default(), &defaults);

        assert_eq!(orders.steering.map(|s| s.avoid_collisions), Some(false));
    }

    #[test]
    fn test_update_maps_status() {
        let mut orders = AgentOrders::default();
        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &default(), &default());

        assert_eq!(
            MoveToOperator::update(&mut orders, MAP, Some(coords(10.0, 0.0))),
            OperatorStatus::Continuing
        );

        if let Some(steering) = orders.steering.as_mut() {
            steering.status = SteeringStatus::InRange;
        }
        assert_eq!(
            MoveToOperator::update(&mut orders, MAP, Some(coords(10.0, 0.0))),
            OperatorStatus::Finished
        );
    }

    #[test]
    fn test_moved_goal_resets_arrival() {
        let mut orders = AgentOrders::default();
        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &default(), &default());
        if let Some(steering) = orders.steering.as_mut() {
            steering.status = SteeringStatus::InRange;
        }

        let status = MoveToOperator::update(&mut orders, MAP, Some(coords(30.0, 0.0)));

        assert_eq!(status, OperatorStatus::Continuing);
        assert_eq!(orders.steering.map(|s| s.target), Some(coords(30.0, 0.0)));
    }

    #[test]
    fn test_update_fails_without_goal_or_on_other_map() {
        let mut orders = AgentOrders::default();
        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &default(), &default());

        assert_eq!(MoveToOperator::update(&mut orders, MAP, None), OperatorStatus::Failed);

        let elsewhere = MapCoordinates::new(MapId(2), Vec2::ZERO);
        assert_eq!(
            MoveToOperator::update(&mut orders, MAP, Some(elsewhere)),
            OperatorStatus::Failed
        );
    }

    #[test]
    fn test_shutdown_clears_steering_and_input() {
        let mut orders = AgentOrders::default();
        MoveToOperator::startup(&mut orders, coords(10.0, 0.0), &default(), &default());
        let mut input = ShipInput::FULL_BRAKE;

        MoveToOperator::shutdown(&mut orders, &mut input);

        assert!(orders.steering.is_none());
        assert_eq!(input, ShipInput::COAST);
        let status = MoveToOperator::update(&mut orders, MAP, Some(coords(10.0, 0.0)));
        assert_eq!(status, OperatorStatus::Failed);
    }
}
