//! Fire-control systems: ECS → snapshot → `fire_control_tick` → events.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, ReadRapierContext};

use super::components::{CombatStatus, SightPassthrough};
use super::controller::{
    fire_control_tick, FireControlInput, ShooterSnapshot, TargetSnapshot, WeaponSnapshot,
};
use super::events::{RepositionRequest, SetWeaponTarget, ShootCommand, TargetAcquired};
use super::line_of_sight::{
    rapier_line_of_sight, ObstacleSight, SightFn, SightObstacles, SightQuery,
};
use super::weapon::Gun;
use crate::components::{AgentOrders, MapId, ShipBody};
use crate::shared::yaw_rotation;

/// System: fire control для всех агентов с боевым приказом
///
/// LOS backend:
/// - есть RapierContext → raycast по коллайдерам
/// - нет → `SightObstacles` (или "всё видно", если resource не вставлен)
pub fn run_fire_control(
    mut agents: Query<(Entity, &mut AgentOrders, &MapId, &Transform)>,
    targets: Query<(&MapId, &Transform, &ShipBody)>,
    guns: Query<&Gun>,
    rapier: ReadRapierContext,
    colliders: Query<(Option<&CollisionGroups>, Has<SightPassthrough>)>,
    obstacles: Option<Res<SightObstacles>>,
    time: Res<Time<Fixed>>,
    mut acquired: EventWriter<TargetAcquired>,
    mut reposition: EventWriter<RepositionRequest>,
    mut set_target: EventWriter<SetWeaponTarget>,
    mut shoot: EventWriter<ShootCommand>,
) {
    let frame_time = time.delta_secs();
    let now = time.elapsed_secs_f64();
    let rapier_context = rapier.single().ok();

    for (entity, mut orders, map, transform) in agents.iter_mut() {
        let Some(state) = orders.combat.as_mut() else {
            continue;
        };

        let weapon_entity = state.weapon_entity(entity);
        let weapon = guns.get(weapon_entity).ok().map(|gun| WeaponSnapshot {
            entity: weapon_entity,
            shots_available: gun.shots_available(),
            can_recharge: gun.can_recharge(),
            ready: gun.is_ready(now),
            projectile_speed: gun.projectile_speed,
            range: gun.range,
        });

        // Нет transform/body у цели → TargetUnreachable внутри tick
        let target = state.target.and_then(|target| {
            let (target_map, target_transform, body) = targets.get(target).ok()?;
            Some(TargetSnapshot {
                entity: target,
                map: *target_map,
                position: target_transform.translation.truncate(),
                velocity: body.linear_velocity,
            })
        });

        let input = FireControlInput {
            shooter: ShooterSnapshot {
                entity,
                map: *map,
                position: transform.translation.truncate(),
            },
            weapon,
            target,
            frame_time,
        };

        let previous = state.status;
        let decision = match rapier_context.as_ref() {
            Some(context) => {
                let mut sight =
                    SightFn(|query: &SightQuery| rapier_line_of_sight(context, &colliders, query));
                fire_control_tick(state, &input, &mut sight)
            }
            None => {
                let mut sight = ObstacleSight::new(obstacles.as_deref());
                fire_control_tick(state, &input, &mut sight)
            }
        };

        if previous != state.status {
            log_status_change(entity, state.target, previous, state.status);
        }

        let Some(target_entity) = state.target else {
            continue;
        };

        if decision.lock_on {
            if let Some(cue) = state.lock_on_cue.clone() {
                acquired.write(TargetAcquired {
                    shooter: entity,
                    target: target_entity,
                    cue,
                });
            }
        }

        if decision.request_reposition {
            reposition.write(RepositionRequest {
                shooter: entity,
                target: target_entity,
            });
        }

        if let Some(order) = decision.fire {
            // Сначала цель оружию (поправка против "перелёта" лежачих целей)
            set_target.write(SetWeaponTarget {
                weapon: order.weapon,
                target: order.target,
            });
            shoot.write(ShootCommand {
                shooter: entity,
                weapon: order.weapon,
                target: order.target,
                map: *map,
                aim_point: order.aim_point,
            });
        }
    }
}

fn log_status_change(
    entity: Entity,
    target: Option<Entity>,
    previous: CombatStatus,
    status: CombatStatus,
) {
    match status {
        CombatStatus::Normal => crate::logger::log(&format!(
            "🎯 FireControl {:?}: target {:?} in sight ({:?} → Normal)",
            entity, target, previous
        )),
        CombatStatus::NoWeapon => crate::logger::log_warning(&format!(
            "FireControl {:?}: no weapon ({:?} → NoWeapon)",
            entity, previous
        )),
        _ => crate::logger::log(&format!(
            "FireControl {:?}: {:?} → {:?} (target {:?})",
            entity, previous, status, target
        )),
    }
}

/// System: прицел → Transform турели
///
/// - Отдельный weapon entity → крутим его (world-space mount)
/// - Оружие = сам агент → крутим корпус, только если им не управляет autopilot
pub fn orient_turrets(
    agents: Query<(Entity, &AgentOrders)>,
    mut transforms: Query<&mut Transform>,
) {
    for (entity, orders) in agents.iter() {
        let Some(combat) = orders.combat.as_ref() else {
            continue;
        };

        let mount = combat.weapon_entity(entity);
        if mount == entity && orders.steering.is_some() {
            continue;
        }

        let Ok(mut transform) = transforms.get_mut(mount) else {
            continue;
        };

        let rotation = yaw_rotation(combat.aim_heading);
        if transform.rotation != rotation {
            transform.rotation = rotation;
        }
    }
}
