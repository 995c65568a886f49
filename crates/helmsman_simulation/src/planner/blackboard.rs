//! Typed planner/executor handoff.

use bevy::prelude::*;

use super::operator::OperatorStatus;
use crate::components::MapCoordinates;

/// Куда лететь: фиксированная точка или за entity
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum NavigationGoal {
    Coordinates(MapCoordinates),
    /// Follow: позиция цели перечитывается каждый тик
    Entity(Entity),
}

/// Arrival parameters for the current navigation goal.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ArrivalSettings {
    /// None → `SteeringDefaults::arrival_radius`
    pub range: Option<f32>,
    /// Some → остановиться (speed ≤ value) перед Finished
    pub max_arrival_speed: Option<f32>,
    pub rotation_offset: f32,
}

impl Default for ArrivalSettings {
    fn default() -> Self {
        Self {
            range: None,
            max_arrival_speed: None,
            rotation_offset: 0.0,
        }
    }
}

/// Planner blackboard (один на агента).
///
/// Planner пишет goal/attack_target, executor-системы пишут `move_status`.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Blackboard {
    pub navigation: Option<NavigationGoal>,
    pub arrival: ArrivalSettings,
    /// Снять goal после Finished (иначе follow продолжается)
    pub clear_on_arrival: bool,
    pub move_status: OperatorStatus,
    /// Растёт на каждый `set_navigation`; executor перезапускает MoveTo при смене
    pub navigation_revision: u32,
    /// Revision, с которой запущен текущий steering (None → не запущен)
    pub active_revision: Option<u32>,

    pub attack_target: Option<Entity>,
    /// Gun entity; None → сам агент
    pub weapon: Option<Entity>,
}

impl Blackboard {
    /// Новая навигационная задача
    pub fn set_navigation(&mut self, goal: NavigationGoal, arrival: ArrivalSettings) {
        self.navigation = Some(goal);
        self.arrival = arrival;
        self.move_status = OperatorStatus::Continuing;
        self.navigation_revision = self.navigation_revision.wrapping_add(1);
    }

    pub fn clear_navigation(&mut self) {
        self.navigation = None;
    }

    /// Steering запущен не с текущими arrival settings
    pub fn needs_startup(&self) -> bool {
        self.active_revision != Some(self.navigation_revision)
    }

    pub fn set_attack(&mut self, target: Entity, weapon: Option<Entity>) {
        self.attack_target = Some(target);
        self.weapon = weapon;
    }

    pub fn clear_attack(&mut self) {
        self.attack_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MapId;

    fn goal(x: f32) -> NavigationGoal {
        NavigationGoal::Coordinates(MapCoordinates::new(MapId(0), Vec2::new(x, 0.0)))
    }

    #[test]
    fn test_set_navigation_bumps_revision() {
        let mut blackboard = Blackboard::default();
        assert!(blackboard.needs_startup());

        blackboard.set_navigation(goal(10.0), ArrivalSettings::default());
        blackboard.active_revision = Some(blackboard.navigation_revision);
        assert!(!blackboard.needs_startup());

        blackboard.set_navigation(
            goal(10.0),
            ArrivalSettings {
                range: Some(50.0),
                ..default()
            },
        );
        assert!(blackboard.needs_startup());
        assert_eq!(blackboard.move_status, OperatorStatus::Continuing);
    }
}
