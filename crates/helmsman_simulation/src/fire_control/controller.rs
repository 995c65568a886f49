//! Fire-control law
//!
//! Один тик на вооружённого агента:
//! weapon → target → map → ammo → LOS cache → shoot delay → lead → aim → cooldown → fire
//!
//! Чистая функция над snapshot'ами: ECS системы (`systems.rs`) собирают
//! input, применяют `FireDecision` (events) и ничего не решают сами.

use bevy::prelude::*;

use super::components::{CombatStatus, CombatTargetingState, UNOCCLUDED_COOLDOWN};
use super::line_of_sight::{LineOfSight, SightQuery};
use crate::components::MapId;
use crate::shared::{heading_for, rotate_towards, shortest_angular_distance};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShooterSnapshot {
    pub entity: Entity,
    pub map: MapId,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub entity: Entity,
    pub map: MapId,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Ammo/readiness view of the gun (weapon/ammo provider).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSnapshot {
    pub entity: Entity,
    pub shots_available: u32,
    pub can_recharge: bool,
    /// `next_fire` уже прошёл
    pub ready: bool,
    pub projectile_speed: f32,
    pub range: f32,
}

/// Everything one fire-control tick reads.
///
/// `weapon: None` → у агента нет оружия; `target: None` → цель задана, но
/// у неё нет transform/body (despawn, ещё не заспавнена).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireControlInput {
    pub shooter: ShooterSnapshot,
    pub weapon: Option<WeaponSnapshot>,
    pub target: Option<TargetSnapshot>,
    pub frame_time: f32,
}

/// "Set target + shoot at coordinates" for the weapon actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub weapon: Entity,
    pub target: Entity,
    pub aim_point: Vec2,
}

/// Side effects of one tick (статус уже записан в state).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireDecision {
    /// LOS false → true и настроен cue
    pub lock_on: bool,
    /// Цель не видна: movement layer должен перестроиться
    pub request_reposition: bool,
    pub fire: Option<FireOrder>,
}

/// First-order lead: `target + velocity × (distance / projectile_speed)`.
///
/// Projectile speed ~0 → hitscan, целимся в текущую позицию.
pub fn predict_aim_point(
    shooter: Vec2,
    target_position: Vec2,
    target_velocity: Vec2,
    projectile_speed: f32,
) -> Vec2 {
    if projectile_speed <= f32::EPSILON {
        return target_position;
    }
    let flight_time = shooter.distance(target_position) / projectile_speed;
    target_position + target_velocity * flight_time
}

/// Поворот прицела к точке с ограниченной скоростью
fn aim_at(state: &mut CombatTargetingState, origin: Vec2, point: Vec2, frame_time: f32) {
    let offset = point - origin;
    if offset.length_squared() <= f32::EPSILON {
        return;
    }
    let desired = heading_for(offset);
    let max_step = state.rotation_speed.max(0.0) * frame_time.max(0.0);
    state.aim_heading = rotate_towards(state.aim_heading, desired, max_step);
}

/// LOS cache: resample once the countdown runs out
fn update_line_of_sight(
    state: &mut CombatTargetingState,
    input: &FireControlInput,
    weapon: &WeaponSnapshot,
    target: &TargetSnapshot,
    sight: &mut dyn LineOfSight,
) {
    state.los_accumulator -= input.frame_time;
    if state.los_accumulator > 0.0 {
        return;
    }
    state.los_accumulator += UNOCCLUDED_COOLDOWN;
    // Длинный кадр (hitch): не догоняем raycast'ами каждый тик
    if state.los_accumulator <= 0.0 {
        state.los_accumulator = UNOCCLUDED_COOLDOWN;
    }

    // Дальше дальности оружия: не видим, raycast не нужен
    if input.shooter.position.distance(target.position) > weapon.range {
        state.target_in_los = false;
        return;
    }

    state.target_in_los = sight.is_unobstructed(&SightQuery {
        map: input.shooter.map,
        shooter: input.shooter.entity,
        target: target.entity,
        origin: input.shooter.position,
        target_position: target.position,
        obstructed_mask: state.obstructed_mask,
        bullet_mask: state.bullet_mask,
    });
}

/// One fire-control tick.
///
/// Mutates only `state`; returns the commands to issue this tick.
pub fn fire_control_tick(
    state: &mut CombatTargetingState,
    input: &FireControlInput,
    sight: &mut dyn LineOfSight,
) -> FireDecision {
    let mut decision = FireDecision::default();

    let Some(weapon) = input.weapon else {
        state.status = CombatStatus::NoWeapon;
        state.reset_shooting();
        return decision;
    };

    let Some(target_entity) = state.target else {
        // Нет приказа
        state.status = CombatStatus::Unspecified;
        state.reset_shooting();
        return decision;
    };

    let Some(target) = input.target.filter(|t| t.entity == target_entity) else {
        state.status = CombatStatus::TargetUnreachable;
        return decision;
    };

    if target.map != input.shooter.map {
        state.status = CombatStatus::TargetUnreachable;
        return decision;
    }

    if weapon.shots_available == 0 {
        if !weapon.can_recharge {
            state.status = CombatStatus::Unspecified;
            state.reset_shooting();
            return decision;
        }
        // Ждём перезарядку, но турель продолжает следить за целью
        aim_at(state, input.shooter.position, target.position, input.frame_time);
        return decision;
    }

    let was_in_sight = state.target_in_los;
    update_line_of_sight(state, input, &weapon, &target, sight);

    if !state.target_in_los {
        state.status = CombatStatus::NotInSight;
        state.reset_shooting();
        decision.request_reposition = true;
        return decision;
    }

    state.status = CombatStatus::Normal;
    decision.lock_on = !was_in_sight && state.lock_on_cue.is_some();

    state.shoot_accumulator += input.frame_time;

    let aim_point = predict_aim_point(
        input.shooter.position,
        target.position,
        target.velocity,
        weapon.projectile_speed,
    );
    aim_at(state, input.shooter.position, aim_point, input.frame_time);

    if state.shoot_accumulator < state.shoot_delay {
        return decision;
    }

    let desired = heading_for(aim_point - input.shooter.position);
    if shortest_angular_distance(state.aim_heading, desired).abs() > state.accuracy_threshold {
        return decision;
    }

    if !weapon.ready {
        return decision;
    }

    decision.fire = Some(FireOrder {
        weapon: weapon.entity,
        target: target.entity,
        aim_point,
    });
    decision
}
