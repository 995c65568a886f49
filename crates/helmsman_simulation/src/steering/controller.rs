//! Autopilot control law
//!
//! Kinematic braking-distance prediction, без path planning:
//! - угловое торможение: ω² / (2α)
//! - линейное торможение: v² / (2·a_brake)
//! - strafe = направление на цель + коррекция, гасящая боковую скорость
//!
//! Heading convention: local +Y forward (см. `shared::angles`).

use bevy::prelude::*;

use super::components::{SteeringState, SteeringStatus};
use crate::components::{MapId, ShipBody, ThrustProfile};
use crate::physics::ShipInput;
use crate::shared::{
    heading_for, reflect_about, shortest_angular_distance, to_local, wrap_angle, yaw_of,
    ROTATION_DEAD_ZONE,
};

/// Multiplier applied to directional thrust when braking.
pub const BRAKE_COEFFICIENT: f32 = 1.5;

/// Physics snapshot of one controlled body for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyKinematics {
    pub map: MapId,
    pub position: Vec2,
    /// World yaw, rad
    pub heading: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
}

impl BodyKinematics {
    pub fn from_components(map: MapId, transform: &Transform, body: &ShipBody) -> Self {
        Self {
            map,
            position: transform.translation.truncate(),
            heading: yaw_of(transform.rotation),
            linear_velocity: body.linear_velocity,
            angular_velocity: body.angular_velocity,
        }
    }

    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }
}

/// Heading change needed to stop the current spin at max angular accel.
///
/// Signed by the spin direction; zero when the body cannot rotate.
pub fn angular_braking_delta(angular_velocity: f32, angular_accel: f32) -> f32 {
    if angular_accel <= f32::EPSILON {
        return 0.0;
    }
    angular_velocity * angular_velocity / (2.0 * angular_accel) * angular_velocity.signum()
}

/// Distance covered while braking from `speed` at `brake_accel`.
///
/// Zero acceleration → 0 (нет данных для прогноза, не ∞).
pub fn braking_path(speed: f32, brake_accel: f32) -> f32 {
    if brake_accel <= f32::EPSILON {
        return 0.0;
    }
    speed * speed / (2.0 * brake_accel)
}

/// Rotation input in {-1, 0, 1} that drives `heading` to `desired_heading`.
///
/// Учитывает, сколько ещё провернёмся при торможении текущего вращения,
/// и dead-zone против дрожания около нуля.
pub fn rotation_input(
    heading: f32,
    angular_velocity: f32,
    angular_accel: f32,
    desired_heading: f32,
) -> f32 {
    let stopping_heading = heading + angular_braking_delta(angular_velocity, angular_accel);
    let error = shortest_angular_distance(stopping_heading, desired_heading);

    if error.abs() < ROTATION_DEAD_ZONE {
        0.0
    } else {
        error.signum()
    }
}

/// World-space strafe: direct line to target plus a term that cancels the
/// velocity component perpendicular to that line (doubled).
///
/// `target_dir` должен быть единичным (или нулевым).
pub fn strafe_direction(target_dir: Vec2, linear_velocity: Vec2) -> Vec2 {
    let mut strafe = target_dir;

    // Нулевая скорость → направление не определено, коррекцию пропускаем
    if let Some(velocity_dir) = linear_velocity.try_normalize() {
        strafe += reflect_about(velocity_dir, target_dir) - velocity_dir;
    }

    strafe.clamp_length_max(1.0)
}

/// One tick of the autopilot.
///
/// Returns `None` when no input is possible: target on another map, or the
/// hull lacks mass/thrust. Caller treats `None` as "let the body coast".
/// Updates `state.status` and `state.last_distance`.
pub fn compute_input(
    state: &mut SteeringState,
    body: &BodyKinematics,
    thrust: &ThrustProfile,
) -> Option<ShipInput> {
    if !thrust.is_operational() {
        return None;
    }

    // Другая карта: недостижимо, статус не трогаем
    if state.target.map != body.map {
        return None;
    }

    let to_target = state.target.position - body.position;
    let distance = to_target.length();
    state.last_distance = distance;

    let desired_heading = wrap_angle(heading_for(to_target) + state.target_rotation_offset);
    let speed = body.speed();

    if distance <= state.arrival_radius {
        let Some(max_speed) = state.max_arrival_speed else {
            // Торможение не требуется: долетели
            state.status = SteeringStatus::InRange;
            return Some(ShipInput::COAST);
        };

        let settled = speed <= max_speed && body.angular_velocity.abs() < state.max_rotation_rate;
        state.status = if settled {
            SteeringStatus::InRange
        } else {
            SteeringStatus::Moving
        };

        return Some(ShipInput::FULL_BRAKE);
    }

    state.status = SteeringStatus::Moving;

    let rotation = rotation_input(
        body.heading,
        body.angular_velocity,
        thrust.max_angular_accel(),
        desired_heading,
    );

    // Тормозим тягой, направленной против текущей скорости (в local space)
    let against_velocity = to_local(-body.linear_velocity, body.heading);
    let brake_accel = thrust.max_linear_accel(against_velocity) * BRAKE_COEFFICIENT;
    let path = braking_path(speed, brake_accel);

    if state.braking_required() && path + state.arrival_radius > distance {
        return Some(ShipInput {
            strafe: Vec2::ZERO,
            rotation,
            brake: 1.0,
        });
    }

    let target_dir = to_target.try_normalize().unwrap_or(Vec2::ZERO);
    let strafe_world = strafe_direction(target_dir, body.linear_velocity);

    Some(ShipInput {
        strafe: to_local(strafe_world, body.heading),
        rotation,
        brake: 0.0,
    })
}
