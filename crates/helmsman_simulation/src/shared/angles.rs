//! Heading math shared by steering and weapon aiming.
//!
//! Convention: ship forward is local **+Y**. World heading `0` faces +Y,
//! positive headings rotate counter-clockwise about +Z. `heading_for` and
//! `heading_vector` are exact inverses, so a ship with heading
//! `heading_for(d)` points along `d`. Weapon mounts use the same convention.

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Dead-zone under which a heading error produces no rotation input.
pub const ROTATION_DEAD_ZONE: f32 = 0.01;

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
pub fn shortest_angular_distance(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

/// Normalise an angle into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    shortest_angular_distance(0.0, angle)
}

/// World heading that makes the local +Y axis point along `direction`.
///
/// Zero vector → heading 0 (atan2(0, 0) == 0).
pub fn heading_for(direction: Vec2) -> f32 {
    (-direction.x).atan2(direction.y)
}

/// Unit forward vector (local +Y) of a body with the given world heading.
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(-heading.sin(), heading.cos())
}

/// World → body-local (rotate by `-heading`).
pub fn to_local(world: Vec2, heading: f32) -> Vec2 {
    Vec2::from_angle(-heading).rotate(world)
}

/// Body-local → world (rotate by `heading`).
pub fn to_world(local: Vec2, heading: f32) -> Vec2 {
    Vec2::from_angle(heading).rotate(local)
}

/// Mirror `v` about the line spanned by unit vector `axis`.
///
/// Компонента вдоль `axis` сохраняется, перпендикулярная меняет знак.
pub fn reflect_about(v: Vec2, axis: Vec2) -> Vec2 {
    2.0 * v.dot(axis) * axis - v
}

/// Yaw (rotation about +Z) of a planar transform.
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::ZYX);
    yaw
}

/// Rotation quaternion for a planar yaw.
pub fn yaw_rotation(heading: f32) -> Quat {
    Quat::from_rotation_z(heading)
}

/// Move `current` toward `target` by at most `max_step` radians (shortest way).
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = shortest_angular_distance(current, target);
    if diff.abs() <= max_step {
        wrap_angle(target)
    } else {
        wrap_angle(current + max_step.max(0.0) * diff.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_shortest_distance_wraps_across_zero() {
        let d = shortest_angular_distance(0.0, TAU - 0.01);
        assert!((d + 0.01).abs() < EPS, "d = {}", d);
    }

    #[test]
    fn test_shortest_distance_range() {
        let samples = [-7.0_f32, -PI, -1.0, 0.0, 0.5, PI, 3.5, 9.0, 20.0];
        for &a in &samples {
            for &b in &samples {
                let d = shortest_angular_distance(a, b);
                assert!(d > -PI - EPS && d <= PI + EPS, "a={} b={} d={}", a, b, d);
            }
        }
    }

    #[test]
    fn test_half_turn_is_positive_pi() {
        let d = shortest_angular_distance(0.0, PI);
        assert!((d - PI).abs() < EPS);
    }

    #[test]
    fn test_heading_round_trip() {
        for &dir in &[Vec2::Y, Vec2::X, Vec2::NEG_X, Vec2::NEG_Y, Vec2::new(3.0, -4.0)] {
            let back = heading_vector(heading_for(dir));
            assert!((back - dir.normalize()).length() < EPS, "dir={:?} back={:?}", dir, back);
        }
    }

    #[test]
    fn test_heading_forward_is_plus_y() {
        assert!(heading_for(Vec2::Y).abs() < EPS);
        // +X справа от носа → поворот по часовой (-π/2)
        assert!((heading_for(Vec2::X) + PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_local_world_conversion() {
        let heading = PI / 2.0; // нос смотрит в -X
        let local = to_local(Vec2::NEG_X, heading);
        assert!((local - Vec2::Y).length() < EPS, "local = {:?}", local);
        let world = to_world(Vec2::Y, heading);
        assert!((world - Vec2::NEG_X).length() < EPS);
    }

    #[test]
    fn test_reflect_cancels_perpendicular() {
        let r = reflect_about(Vec2::new(1.0, 1.0), Vec2::X);
        assert!((r - Vec2::new(1.0, -1.0)).length() < EPS);
    }

    #[test]
    fn test_yaw_round_trip() {
        let yaw = yaw_of(yaw_rotation(1.2));
        assert!((yaw - 1.2).abs() < EPS);
    }

    #[test]
    fn test_rotate_towards_caps_step() {
        let next = rotate_towards(0.0, 1.0, 0.25);
        assert!((next - 0.25).abs() < EPS);
        let snapped = rotate_towards(0.0, 0.1, 0.25);
        assert!((snapped - 0.1).abs() < EPS);
        // Кратчайший путь через ±π
        let wrapped = rotate_towards(3.0, -3.0, 0.1);
        assert!((wrapped - 3.1).abs() < EPS, "wrapped = {}", wrapped);
    }
}
