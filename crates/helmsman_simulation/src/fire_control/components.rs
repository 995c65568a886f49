//! Fire-control components: per-agent targeting state and markers.

use bevy::prelude::*;

use crate::shared::{DEFAULT_BULLET_MASK, DEFAULT_OBSTRUCTED_MASK};

/// Seconds between line-of-sight resamples.
pub const UNOCCLUDED_COOLDOWN: f32 = 0.2;

/// Fire-control status (пересчитывается каждый тик, не "залипает")
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum CombatStatus {
    /// Оружие есть, но стрелять нечем/некуда (нет приказа, пустой магазин)
    #[default]
    Unspecified,
    /// Нет оружия: ждём, пока появится
    NoWeapon,
    /// Цель без transform/body или на другой карте
    TargetUnreachable,
    /// Цель не видна: movement layer должен перестроиться
    NotInSight,
    /// Можно целиться и стрелять
    Normal,
}

/// Per-agent fire-control record.
///
/// `target`: слабая ссылка: агент не владеет целью, цель может исчезнуть
/// в любой тик (→ `TargetUnreachable`).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct CombatTargetingState {
    pub target: Option<Entity>,
    /// Gun entity; `None` → сам агент (турель)
    pub weapon: Option<Entity>,
    pub status: CombatStatus,

    // === Line-of-sight cache ===
    /// Результат последнего raycast
    pub target_in_los: bool,
    /// Обратный отсчёт до следующего raycast (секунды)
    pub los_accumulator: f32,
    /// Слои, блокирующие взгляд
    pub obstructed_mask: u32,
    /// Слои, блокирующие пули (остальное игнорируется при LOS)
    pub bullet_mask: u32,

    // === Shoot timing ===
    /// Сколько цель непрерывно в прицеле (секунды)
    pub shoot_accumulator: f32,
    /// Минимум времени на цели перед первым выстрелом
    pub shoot_delay: f32,

    // === Aiming ===
    /// World heading of the weapon mount (local +Y forward convention)
    pub aim_heading: f32,
    /// rad/s
    pub rotation_speed: f32,
    /// rad: насколько точно нужно навестись для выстрела
    pub accuracy_threshold: f32,

    /// Cosmetic cue id (звук/вспышка) при захвате цели
    pub lock_on_cue: Option<String>,
}

impl CombatTargetingState {
    pub const DEFAULT_SHOOT_DELAY: f32 = 0.2;
    pub const DEFAULT_ROTATION_SPEED: f32 = std::f32::consts::PI;
    pub const DEFAULT_ACCURACY_THRESHOLD: f32 = 0.05;

    pub fn new(target: Entity) -> Self {
        Self {
            target: Some(target),
            weapon: None,
            status: CombatStatus::Unspecified,
            target_in_los: false,
            los_accumulator: 0.0,
            obstructed_mask: DEFAULT_OBSTRUCTED_MASK,
            bullet_mask: DEFAULT_BULLET_MASK,
            shoot_accumulator: 0.0,
            shoot_delay: Self::DEFAULT_SHOOT_DELAY,
            aim_heading: 0.0,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
            accuracy_threshold: Self::DEFAULT_ACCURACY_THRESHOLD,
            lock_on_cue: None,
        }
    }

    pub fn with_weapon(mut self, weapon: Option<Entity>) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_los_phase(mut self, phase: f32) -> Self {
        self.los_accumulator = phase.clamp(0.0, UNOCCLUDED_COOLDOWN);
        self
    }

    /// Новая цель: LOS кэш и прицеливание начинаются заново
    pub fn retarget(&mut self, target: Option<Entity>) {
        if self.target == target {
            return;
        }
        self.target = target;
        self.target_in_los = false;
        self.shoot_accumulator = 0.0;
    }

    /// Сбросить "время на цели" (потеряли цель/оружие/патроны)
    pub fn reset_shooting(&mut self) {
        self.shoot_accumulator = 0.0;
    }

    /// Weapon entity для агента (None → сам агент)
    pub fn weapon_entity(&self, agent: Entity) -> Entity {
        self.weapon.unwrap_or(agent)
    }
}

/// Marker: collider that never hides anything ("always a valid target").
///
/// LOS raycast пропускает такие коллайдеры насквозь.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SightPassthrough;
