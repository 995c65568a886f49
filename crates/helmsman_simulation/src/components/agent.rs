//! Agent orders: what the autopilot and fire control are currently doing.
//!
//! Оба состояния: явные optional поля одного компонента, а не маркеры,
//! которые вешаются/снимаются в рантайме. Нет приказа = `None`.

use bevy::prelude::*;

use crate::fire_control::CombatTargetingState;
use crate::steering::SteeringState;

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AgentOrders {
    pub steering: Option<SteeringState>,
    pub combat: Option<CombatTargetingState>,
}

/// Read-only view of which controllers are active for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    Idle,
    Steering,
    Combat,
    SteeringAndCombat,
}

impl AgentOrders {
    pub fn mode(&self) -> AgentMode {
        match (self.steering.is_some(), self.combat.is_some()) {
            (false, false) => AgentMode::Idle,
            (true, false) => AgentMode::Steering,
            (false, true) => AgentMode::Combat,
            (true, true) => AgentMode::SteeringAndCombat,
        }
    }

    /// Отменить все приказы (planner снял задачу)
    pub fn clear(&mut self) {
        self.steering = None;
        self.combat = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{MapCoordinates, MapId};

    #[test]
    fn test_default_is_idle() {
        assert_eq!(AgentOrders::default().mode(), AgentMode::Idle);
    }

    #[test]
    fn test_mode_reflects_optional_fields() {
        let mut orders = AgentOrders {
            steering: Some(SteeringState::new(MapCoordinates::new(MapId(0), Vec2::X))),
            combat: None,
        };
        assert_eq!(orders.mode(), AgentMode::Steering);

        orders.combat = Some(CombatTargetingState::new(Entity::PLACEHOLDER));
        assert_eq!(orders.mode(), AgentMode::SteeringAndCombat);

        orders.steering = None;
        assert_eq!(orders.mode(), AgentMode::Combat);

        orders.clear();
        assert_eq!(orders.mode(), AgentMode::Idle);
    }
}
