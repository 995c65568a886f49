//! Headless ship mover
//!
//! Архитектура:
//! - Steering пишет `ShipInput` (high-level intent: strafe/rotation/brake)
//! - Эта система конвертирует intent → ускорения по `ThrustProfile`
//! - Velocity интегрируем сами (position += velocity * dt)
//!
//! В игре эту роль играет внешний physics integrator; здесь: детерминированная
//! замена для headless симуляции и тестов. Fixed timestep (60Hz).

use bevy::prelude::*;

use crate::components::{ShipBody, ThrustProfile};
use crate::shared::{to_local, to_world, yaw_of, yaw_rotation};
use crate::steering::BRAKE_COEFFICIENT;

/// Movement command for one ship, written once per tick by the autopilot.
///
/// - `strafe`: ship-local translation intent, length ≤ 1 (+Y = forward)
/// - `rotation`: [-1, 1], положительное: против часовой
/// - `brake`: [0, 1]
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShipInput {
    pub strafe: Vec2,
    pub rotation: f32,
    pub brake: f32,
}

impl ShipInput {
    /// No thrust at all: корабль дрейфует
    pub const COAST: Self = Self {
        strafe: Vec2::ZERO,
        rotation: 0.0,
        brake: 0.0,
    };

    /// Zero translation, zero rotation, full brake
    pub const FULL_BRAKE: Self = Self {
        strafe: Vec2::ZERO,
        rotation: 0.0,
        brake: 1.0,
    };

    pub fn is_finite(&self) -> bool {
        self.strafe.is_finite() && self.rotation.is_finite() && self.brake.is_finite()
    }
}

/// Apply one tick of `input` to `body` (velocities only).
///
/// `heading`: текущий yaw корабля (нужен для local → world).
pub fn apply_ship_input(
    input: &ShipInput,
    profile: &ThrustProfile,
    heading: f32,
    body: &mut ShipBody,
    delta: f32,
) {
    if !profile.is_operational() {
        return;
    }

    // Rotation: gyros либо разгоняют, либо тормозят вращение
    let angular_accel = profile.max_angular_accel();
    body.angular_velocity += input.rotation.clamp(-1.0, 1.0) * angular_accel * delta;

    // Strafe: тяга вдоль local направления (длина strafe = доля тяги)
    let throttle = input.strafe.length().min(1.0);
    if throttle > f32::EPSILON {
        let accel = profile.max_linear_accel(input.strafe) * throttle;
        let world_dir = to_world(input.strafe.normalize(), heading);
        body.linear_velocity += world_dir * accel * delta;
    }

    let brake = input.brake.clamp(0.0, 1.0);
    if brake > 0.0 {
        // Линейное торможение: тяга против текущей скорости
        let speed = body.linear_velocity.length();
        if speed > f32::EPSILON {
            let local_against = to_local(-body.linear_velocity, heading);
            let decel = profile.max_linear_accel(local_against) * BRAKE_COEFFICIENT * brake;
            let new_speed = (speed - decel * delta).max(0.0);
            body.linear_velocity *= new_speed / speed;
        }

        // Угловое торможение, только если rotation не задан
        if input.rotation == 0.0 {
            let omega = body.angular_velocity;
            let step = angular_accel * brake * delta;
            body.angular_velocity = if omega.abs() <= step {
                0.0
            } else {
                omega - step * omega.signum()
            };
        }
    }
}

/// System: ShipInput → ShipBody velocity
pub fn apply_ship_inputs(
    mut query: Query<(&ShipInput, &ThrustProfile, &Transform, &mut ShipBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, profile, transform, mut body) in query.iter_mut() {
        let heading = yaw_of(transform.rotation);
        apply_ship_input(input, profile, heading, &mut body, delta);
    }
}

/// System: интеграция velocity → Transform
///
/// Напрямую применяет ShipBody к Transform (translation XY + yaw).
pub fn integrate_ship_bodies(
    mut query: Query<(&ShipBody, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.linear_velocity.extend(0.0) * delta;

        if body.angular_velocity != 0.0 {
            let yaw = yaw_of(transform.rotation) + body.angular_velocity * delta;
            transform.rotation = yaw_rotation(yaw);
        }
    }
}

/// Plugin для headless mover
///
/// Регистрирует системы в FixedUpdate; запускать ПОСЛЕ autopilot
/// (см. `SimulationPlugin`).
pub struct ShipMotionPlugin;

impl Plugin for ShipMotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (apply_ship_inputs, integrate_ship_bodies)
                .chain()
                .in_set(crate::SimulationSet::Motion),
        );
    }
}

/// Spawn helper для корабля с полным набором физических компонентов
pub fn spawn_ship(
    commands: &mut Commands,
    map: crate::components::MapId,
    position: Vec2,
    heading: f32,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position.extend(0.0)).with_rotation(yaw_rotation(heading)),
            map,
            ShipBody::default(),
            ThrustProfile::default(),
            ShipInput::default(),
        ))
        .id()
}
