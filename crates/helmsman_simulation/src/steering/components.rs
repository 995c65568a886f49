//! Steering components: per-agent autopilot state.

use bevy::prelude::*;

use crate::components::MapCoordinates;

/// Autopilot status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum SteeringStatus {
    /// Летим к цели (или тормозим в радиусе, если нужна остановка)
    #[default]
    Moving,
    /// Цель достигнута (и, если требуется, корабль остановлен)
    InRange,
}

/// Per-agent steering record.
///
/// Инвариант: `status == InRange` ⇔ последняя дистанция ≤ `arrival_radius`
/// И (`max_arrival_speed` не задан ИЛИ скорость ≤ него) И (торможение не
/// требуется ИЛИ |ω| < `max_rotation_rate`).
///
/// Меняется только planner'ом (target) и autopilot'ом (status, last_distance).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SteeringState {
    /// Куда летим (карта + world position)
    pub target: MapCoordinates,
    /// Метры: ближе этого: "in range"
    pub arrival_radius: f32,
    /// Если задан: нужно ещё и затормозить ниже этой скорости (m/s)
    pub max_arrival_speed: Option<f32>,
    /// rad/s: ниже этого вращение считается успокоившимся
    pub max_rotation_rate: f32,
    /// Hint для внешнего physics integrator (avoidance). Headless
    /// `ShipMotionPlugin` его не читает: в нём нет коллизий между кораблями.
    pub avoid_collisions: bool,
    /// Смещение желаемого курса относительно направления на цель (rad)
    pub target_rotation_offset: f32,
    pub status: SteeringStatus,
    /// Дистанция на последнем тике контроллера
    pub last_distance: f32,
}

impl SteeringState {
    pub const DEFAULT_ARRIVAL_RADIUS: f32 = 5.0;
    pub const DEFAULT_MAX_ROTATION_RATE: f32 = 0.1;

    pub fn new(target: MapCoordinates) -> Self {
        Self {
            target,
            arrival_radius: Self::DEFAULT_ARRIVAL_RADIUS,
            max_arrival_speed: None,
            max_rotation_rate: Self::DEFAULT_MAX_ROTATION_RATE,
            avoid_collisions: true,
            target_rotation_offset: 0.0,
            status: SteeringStatus::Moving,
            last_distance: f32::INFINITY,
        }
    }

    pub fn with_arrival_radius(mut self, radius: f32) -> Self {
        self.arrival_radius = radius.max(0.0);
        self
    }

    pub fn with_max_arrival_speed(mut self, speed: Option<f32>) -> Self {
        self.max_arrival_speed = speed.map(|s| s.max(0.0));
        self
    }

    pub fn with_max_rotation_rate(mut self, rate: f32) -> Self {
        self.max_rotation_rate = rate.max(0.0);
        self
    }

    pub fn with_rotation_offset(mut self, offset: f32) -> Self {
        self.target_rotation_offset = offset;
        self
    }

    pub fn with_avoid_collisions(mut self, avoid: bool) -> Self {
        self.avoid_collisions = avoid;
        self
    }

    /// Planner выставил новую цель → снова Moving
    pub fn retarget(&mut self, target: MapCoordinates) {
        if self.target != target {
            self.target = target;
            self.status = SteeringStatus::Moving;
        }
    }

    pub fn braking_required(&self) -> bool {
        self.max_arrival_speed.is_some()
    }

    pub fn is_in_range(&self) -> bool {
        self.status == SteeringStatus::InRange
    }
}
