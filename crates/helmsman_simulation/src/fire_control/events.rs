//! Fire-control events (ECS → weapon actuator / cosmetics / movement layer)

use bevy::prelude::*;

use crate::components::MapId;

/// Event: навести оружие на цель
///
/// Отправляется перед каждым `ShootCommand`: оружие должно знать цель, чтобы
/// не "перелетать" лежачие/подбитые цели.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SetWeaponTarget {
    pub weapon: Entity,
    pub target: Entity,
}

/// Event: попытка выстрела по координатам (lead point)
///
/// Обрабатывается `process_shoot_commands` (ammo, next_fire).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShootCommand {
    pub shooter: Entity,
    pub weapon: Entity,
    pub target: Entity,
    pub map: MapId,
    pub aim_point: Vec2,
}

/// Event: выстрел состоялся (для визуалов/снарядов)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShotFired {
    pub shooter: Entity,
    pub weapon: Entity,
    pub target: Entity,
    pub aim_point: Vec2,
    pub projectile_speed: f32,
}

/// Event: цель только что появилась в прицеле (LOS false → true)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TargetAcquired {
    pub shooter: Entity,
    pub target: Entity,
    pub cue: String,
}

/// Event: цель не видна: movement layer должен сменить позицию
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RepositionRequest {
    pub shooter: Entity,
    pub target: Entity,
}
