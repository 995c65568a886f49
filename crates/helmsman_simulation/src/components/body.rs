//! Ship body components: velocities and thrust capability.

use bevy::prelude::*;

/// Linear/angular velocity of a ship (world space, XY plane).
///
/// Position и rotation живут в `Transform` (yaw вокруг +Z).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShipBody {
    /// m/s, world space
    pub linear_velocity: Vec2,
    /// rad/s, положительное значение: против часовой
    pub angular_velocity: f32,
}

impl ShipBody {
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }
}

/// Thrust capability of a hull, per local axis (+Y is forward).
///
/// Отсутствие массы или тяги = "no input possible": контроллер вернёт `None`
/// и корабль дрейфует.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ThrustProfile {
    /// kg
    pub mass: f32,
    /// N along local +Y
    pub forward_thrust: f32,
    /// N along local -Y
    pub reverse_thrust: f32,
    /// N along local -X / +X
    pub lateral_thrust: f32,
    /// rad/s² max angular acceleration (gyroscopes)
    pub angular_acceleration: f32,
}

impl Default for ThrustProfile {
    fn default() -> Self {
        Self {
            mass: 1000.0,
            forward_thrust: 20_000.0,
            reverse_thrust: 10_000.0,
            lateral_thrust: 8_000.0,
            angular_acceleration: 2.0,
        }
    }
}

impl ThrustProfile {
    /// Корпус способен управляться (есть масса и хоть какая-то тяга)?
    pub fn is_operational(&self) -> bool {
        self.mass > f32::EPSILON
            && (self.forward_thrust > 0.0
                || self.reverse_thrust > 0.0
                || self.lateral_thrust > 0.0
                || self.angular_acceleration > 0.0)
    }

    /// Max linear acceleration along a ship-local direction (m/s²).
    ///
    /// Thrusters are box-limited per axis, so the reachable acceleration along
    /// `local_dir` is bounded by whichever axis saturates first. Zero direction
    /// or zero mass → 0.
    pub fn max_linear_accel(&self, local_dir: Vec2) -> f32 {
        if self.mass <= f32::EPSILON {
            return 0.0;
        }

        let Some(dir) = local_dir.try_normalize() else {
            return 0.0;
        };

        let axis_x = self.lateral_thrust;
        let axis_y = if dir.y >= 0.0 {
            self.forward_thrust
        } else {
            self.reverse_thrust
        };

        let mut thrust = f32::INFINITY;
        if dir.x.abs() > f32::EPSILON {
            thrust = thrust.min(axis_x / dir.x.abs());
        }
        if dir.y.abs() > f32::EPSILON {
            thrust = thrust.min(axis_y / dir.y.abs());
        }

        if thrust.is_finite() {
            (thrust / self.mass).max(0.0)
        } else {
            0.0
        }
    }

    pub fn max_angular_accel(&self) -> f32 {
        self.angular_acceleration.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_accel() {
        let profile = ThrustProfile::default();
        assert_eq!(profile.max_linear_accel(Vec2::Y), 20.0);
        assert_eq!(profile.max_linear_accel(Vec2::NEG_Y), 10.0);
        assert_eq!(profile.max_linear_accel(Vec2::X), 8.0);
    }

    #[test]
    fn test_diagonal_accel_limited_by_weaker_axis() {
        let profile = ThrustProfile::default();
        let accel = profile.max_linear_accel(Vec2::new(1.0, 1.0));
        // lateral 8000 / (1/√2) ≈ 11314 < forward 20000 / (1/√2)
        assert!((accel - 8.0 * std::f32::consts::SQRT_2).abs() < 1e-3, "accel = {}", accel);
    }

    #[test]
    fn test_zero_direction_and_mass() {
        let profile = ThrustProfile::default();
        assert_eq!(profile.max_linear_accel(Vec2::ZERO), 0.0);

        let massless = ThrustProfile { mass: 0.0, ..default() };
        assert_eq!(massless.max_linear_accel(Vec2::Y), 0.0);
        assert!(!massless.is_operational());
    }

    #[test]
    fn test_no_thrust_not_operational() {
        let dead = ThrustProfile {
            forward_thrust: 0.0,
            reverse_thrust: 0.0,
            lateral_thrust: 0.0,
            angular_acceleration: 0.0,
            ..default()
        };
        assert!(!dead.is_operational());
        assert!(ThrustProfile::default().is_operational());
    }
}
