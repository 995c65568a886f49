//! World positioning компоненты: MapId, MapCoordinates

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Map / world region the entity lives in.
///
/// Entities on different maps never see or reach each other.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub struct MapId(pub u32);

/// Position on a specific map (world space, XY plane).
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct MapCoordinates {
    pub map: MapId,
    pub position: Vec2,
}

impl MapCoordinates {
    pub fn new(map: MapId, position: Vec2) -> Self {
        Self { map, position }
    }

    /// Distance to `other`, `None` across maps.
    pub fn distance(&self, other: &MapCoordinates) -> Option<f32> {
        (self.map == other.map).then(|| self.position.distance(other.position))
    }

    /// Coordinates of an entity from its Transform (XY plane).
    pub fn from_transform(map: MapId, transform: &Transform) -> Self {
        Self {
            map,
            position: transform.translation.truncate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_map() {
        let a = MapCoordinates::new(MapId(1), Vec2::ZERO);
        let b = MapCoordinates::new(MapId(1), Vec2::new(3.0, 4.0));
        assert_eq!(a.distance(&b), Some(5.0));
    }

    #[test]
    fn test_distance_across_maps_is_none() {
        let a = MapCoordinates::new(MapId(1), Vec2::ZERO);
        let b = MapCoordinates::new(MapId(2), Vec2::ZERO);
        assert_eq!(a.distance(&b), None);
    }

    #[test]
    fn test_from_transform_drops_z() {
        let t = Transform::from_xyz(2.0, -1.0, 7.0);
        let c = MapCoordinates::from_transform(MapId(3), &t);
        assert_eq!(c.position, Vec2::new(2.0, -1.0));
        assert_eq!(c.map, MapId(3));
    }
}
