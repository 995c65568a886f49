//! Line-of-Sight (LOS) backends
//!
//! Fire control спрашивает "видна ли цель?" через трейт `LineOfSight`:
//! - `rapier_line_of_sight`: raycast по rapier коллайдерам (если есть RapierContext)
//! - `ObstacleSight`: headless круги-препятствия (`SightObstacles` resource)
//!
//! Правила одинаковые для обоих:
//! - луч видит только коллайдеры из `obstructed_mask`
//! - коллайдеры, не пересекающиеся с `bullet_mask`, игнорируются
//! - `SightPassthrough` коллайдеры игнорируются
//! - стрелок не блокирует сам себя; попадание в саму цель = цель видна

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group, QueryFilter, RapierContext};

use super::components::SightPassthrough;
use crate::components::MapId;
use crate::shared::blocks_sight;

/// One unobstructed-path question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightQuery {
    pub map: MapId,
    pub shooter: Entity,
    pub target: Entity,
    pub origin: Vec2,
    pub target_position: Vec2,
    pub obstructed_mask: u32,
    pub bullet_mask: u32,
}

/// Unobstructed-line-of-sight provider.
///
/// `&mut self`: реализации могут кэшировать или считать вызовы.
pub trait LineOfSight {
    fn is_unobstructed(&mut self, query: &SightQuery) -> bool;
}

/// Closure adapter (rapier backend, тестовые моки)
pub struct SightFn<F>(pub F);

impl<F: FnMut(&SightQuery) -> bool> LineOfSight for SightFn<F> {
    fn is_unobstructed(&mut self, query: &SightQuery) -> bool {
        (self.0)(query)
    }
}

// ============================================================================
// Headless backend
// ============================================================================

/// Circular sight blocker for headless simulation.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SightBlocker {
    /// Entity этого препятствия (если есть): чтобы не блокировать стрелка/цель
    pub entity: Option<Entity>,
    pub map: MapId,
    pub center: Vec2,
    pub radius: f32,
    /// Collision layers (см. `shared::collision_layers`)
    pub layers: u32,
    pub passthrough: bool,
}

impl SightBlocker {
    pub fn new(map: MapId, center: Vec2, radius: f32, layers: u32) -> Self {
        Self {
            entity: None,
            map,
            center,
            radius,
            layers,
            passthrough: false,
        }
    }

    /// Пересекает ли отрезок `from → to` круг
    pub fn intersects_segment(&self, from: Vec2, to: Vec2) -> bool {
        let segment = to - from;
        let length_sq = segment.length_squared();

        let t = if length_sq > f32::EPSILON {
            ((self.center - from).dot(segment) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let closest = from + segment * t;
        closest.distance_squared(self.center) < self.radius * self.radius
    }
}

/// Resource: sight blockers for maps without rapier colliders.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct SightObstacles {
    pub blockers: Vec<SightBlocker>,
}

impl SightObstacles {
    pub fn add(&mut self, blocker: SightBlocker) {
        self.blockers.push(blocker);
    }
}

/// `LineOfSight` over an optional `SightObstacles` (None → всё видно).
pub struct ObstacleSight<'a> {
    obstacles: Option<&'a SightObstacles>,
}

impl<'a> ObstacleSight<'a> {
    pub fn new(obstacles: Option<&'a SightObstacles>) -> Self {
        Self { obstacles }
    }
}

impl LineOfSight for ObstacleSight<'_> {
    fn is_unobstructed(&mut self, query: &SightQuery) -> bool {
        let Some(obstacles) = self.obstacles else {
            return true;
        };

        !obstacles.blockers.iter().any(|blocker| {
            blocker.map == query.map
                && !blocker.passthrough
                && blocker.entity != Some(query.shooter)
                && blocker.entity != Some(query.target)
                && blocks_sight(blocker.layers, query.obstructed_mask, query.bullet_mask)
                && blocker.intersects_segment(query.origin, query.target_position)
        })
    }
}

// ============================================================================
// Rapier backend
// ============================================================================

/// Raycast shooter → target through rapier colliders (plane z = 0).
///
/// Returns true если луч ни во что не попал или первым попал в саму цель.
pub fn rapier_line_of_sight(
    context: &RapierContext,
    colliders: &Query<(Option<&CollisionGroups>, Has<SightPassthrough>)>,
    query: &SightQuery,
) -> bool {
    let offset = query.target_position - query.origin;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return true;
    }
    let direction = offset / distance;

    let shooter = query.shooter;
    let bullet_mask = query.bullet_mask;

    // false → коллайдер игнорируется лучом
    let predicate = |entity: Entity| -> bool {
        if entity == shooter {
            return false;
        }
        let Ok((groups, passthrough)) = colliders.get(entity) else {
            return true;
        };
        if passthrough {
            return false;
        }
        // Без CollisionGroups коллайдер во всех слоях
        groups.is_none_or(|groups| groups.memberships.bits() & bullet_mask != 0)
    };

    let filter = QueryFilter::new()
        .groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(query.obstructed_mask),
        ))
        .predicate(&predicate);

    match context.cast_ray(
        query.origin.extend(0.0),
        direction.extend(0.0),
        distance,
        true,
        filter,
    ) {
        None => true,
        Some((hit, _)) => hit == query.target,
    }
}
