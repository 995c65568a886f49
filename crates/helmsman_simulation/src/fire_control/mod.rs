//! Fire-control domain: NPC ranged targeting
//!
//! Содержит:
//! - CombatTargetingState / CombatStatus (per-agent record, живёт в AgentOrders)
//! - fire_control_tick (LOS cache, lead prediction, aiming, shoot timing)
//! - LineOfSight backends (rapier raycast, headless SightObstacles)
//! - Gun + weapon actuator systems (ammo, cooldown, recharge)
//! - Events: SetWeaponTarget, ShootCommand, ShotFired, TargetAcquired, RepositionRequest

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod line_of_sight;
pub mod systems;
pub mod weapon;


pub use components::*;
pub use controller::*;
pub use events::*;
pub use line_of_sight::*;
pub use systems::*;
pub use weapon::*;

/// Fire Control Plugin
///
/// Порядок в FixedUpdate:
/// 1. FireControl: run_fire_control → orient_turrets
/// 2. Weapons: apply_weapon_targets → process_shoot_commands → recharge_guns
pub struct FireControlPlugin;

impl Plugin for FireControlPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Gun>()
            .register_type::<SightPassthrough>()
            .register_type::<SightObstacles>();

        app.add_event::<SetWeaponTarget>()
            .add_event::<ShootCommand>()
            .add_event::<ShotFired>()
            .add_event::<TargetAcquired>()
            .add_event::<RepositionRequest>();

        app.add_systems(
            FixedUpdate,
            (run_fire_control, orient_turrets)
                .chain()
                .in_set(crate::SimulationSet::FireControl),
        );

        app.add_systems(
            FixedUpdate,
            (apply_weapon_targets, process_shoot_commands, recharge_guns)
                .chain()
                .in_set(crate::SimulationSet::Weapons),
        );
    }
}
