//! Gun component and weapon actuator systems.
//!
//! Архитектура:
//! - Fire control решает "хочу стрелять" → SetWeaponTarget + ShootCommand
//! - Эти системы владеют ammo/cooldown state (единый writer на оружие)

use bevy::prelude::*;

use super::events::{SetWeaponTarget, ShootCommand, ShotFired};

/// Ranged weapon state.
///
/// `next_fire`: simulation time (секунды, `Time<Fixed>::elapsed`), раньше
/// которого оружие не стреляет.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Gun {
    pub ammo: u32,
    pub capacity: u32,
    /// Ammo per shot
    pub fire_cost: u32,
    /// Shots per second
    pub fire_rate: f32,
    pub next_fire: f64,
    /// m/s (0 → hitscan, без упреждения)
    pub projectile_speed: f32,
    /// Дальность (метры): дальше: цель "не видна"
    pub range: f32,
    /// Some(interval) → батарея: +1 ammo каждые `interval` секунд
    pub recharge_interval: Option<f32>,
    pub recharge_timer: f32,
    /// Текущая цель (SetWeaponTarget)
    pub target: Option<Entity>,
}

impl Default for Gun {
    fn default() -> Self {
        Self::kinetic_turret()
    }
}

impl Gun {
    /// Кинетическая турель: магазин, без перезарядки
    pub fn kinetic_turret() -> Self {
        Self {
            ammo: 30,
            capacity: 30,
            fire_cost: 1,
            fire_rate: 2.0,
            next_fire: 0.0,
            projectile_speed: 20.0,
            range: 60.0,
            recharge_interval: None,
            recharge_timer: 0.0,
            target: None,
        }
    }

    /// Лазер: батарея с перезарядкой, снаряд быстрый
    pub fn laser_turret() -> Self {
        Self {
            ammo: 10,
            capacity: 10,
            fire_cost: 1,
            fire_rate: 1.0,
            next_fire: 0.0,
            projectile_speed: 80.0,
            range: 40.0,
            recharge_interval: Some(1.5),
            recharge_timer: 0.0,
            target: None,
        }
    }

    pub fn can_recharge(&self) -> bool {
        self.recharge_interval.is_some()
    }

    /// Сколько выстрелов осталось
    pub fn shots_available(&self) -> u32 {
        self.ammo / self.fire_cost.max(1)
    }

    pub fn is_ready(&self, now: f64) -> bool {
        self.next_fire <= now
    }

    /// Seconds between shots (0 fire rate → never again this session)
    pub fn fire_interval(&self) -> f64 {
        if self.fire_rate > f32::EPSILON {
            1.0 / self.fire_rate as f64
        } else {
            f64::INFINITY
        }
    }

    /// Списать ammo и запланировать следующий выстрел.
    ///
    /// Returns false (ничего не меняя) если не готово или пусто.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if !self.is_ready(now) || self.shots_available() == 0 {
            return false;
        }
        self.ammo -= self.fire_cost.max(1);
        self.next_fire = now + self.fire_interval();
        true
    }

    /// Батарея: накапливаем время, +1 ammo за интервал
    pub fn recharge(&mut self, delta: f32) {
        let Some(interval) = self.recharge_interval else {
            return;
        };

        if self.ammo >= self.capacity || interval <= f32::EPSILON {
            self.recharge_timer = 0.0;
            return;
        }

        self.recharge_timer += delta;
        while self.recharge_timer >= interval && self.ammo < self.capacity {
            self.recharge_timer -= interval;
            self.ammo += 1;
        }

        if self.ammo >= self.capacity {
            self.recharge_timer = 0.0;
        }
    }
}

/// System: SetWeaponTarget → Gun.target
pub fn apply_weapon_targets(
    mut events: EventReader<SetWeaponTarget>,
    mut guns: Query<&mut Gun>,
) {
    for event in events.read() {
        let Ok(mut gun) = guns.get_mut(event.weapon) else {
            continue;
        };

        if gun.target != Some(event.target) {
            gun.target = Some(event.target);
        }
    }
}

/// System: ShootCommand → ammo/cooldown → ShotFired
///
/// Оружие может отказать (не готово/пусто): fire control повторит в
/// следующий тик, состояние не меняется.
pub fn process_shoot_commands(
    mut commands: EventReader<ShootCommand>,
    mut guns: Query<&mut Gun>,
    time: Res<Time<Fixed>>,
    mut fired: EventWriter<ShotFired>,
) {
    let now = time.elapsed_secs_f64();

    for command in commands.read() {
        let Ok(mut gun) = guns.get_mut(command.weapon) else {
            crate::logger::log_warning(&format!(
                "ShootCommand rejected: weapon {:?} has no Gun",
                command.weapon
            ));
            continue;
        };

        if !gun.try_fire(now) {
            continue;
        }

        crate::logger::log(&format!(
            "🔫 {:?} fires {:?} at {:?} (aim {:?}, ammo left {})",
            command.shooter, command.weapon, command.target, command.aim_point, gun.ammo
        ));

        fired.write(ShotFired {
            shooter: command.shooter,
            weapon: command.weapon,
            target: command.target,
            aim_point: command.aim_point,
            projectile_speed: gun.projectile_speed,
        });
    }
}

/// System: перезарядка батарей
pub fn recharge_guns(mut guns: Query<&mut Gun>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut gun in guns.iter_mut() {
        if gun.can_recharge() && gun.ammo < gun.capacity {
            gun.recharge(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_fire_consumes_ammo_and_schedules() {
        let mut gun = Gun::kinetic_turret();
        assert!(gun.try_fire(1.0));
        assert_eq!(gun.ammo, 29);
        assert_eq!(gun.next_fire, 1.5);

        // Cooldown ещё идёт
        assert!(!gun.try_fire(1.25));
        assert_eq!(gun.ammo, 29);

        assert!(gun.try_fire(1.5));
        assert_eq!(gun.ammo, 28);
    }

    #[test]
    fn test_empty_gun_refuses() {
        let mut gun = Gun {
            ammo: 0,
            ..Gun::kinetic_turret()
        };
        assert_eq!(gun.shots_available(), 0);
        assert!(!gun.try_fire(10.0));
    }

    #[test]
    fn test_fire_cost_limits_shots() {
        let gun = Gun {
            ammo: 5,
            fire_cost: 2,
            ..Gun::laser_turret()
        };
        assert_eq!(gun.shots_available(), 2);
    }

    #[test]
    fn test_recharge_adds_ammo_per_interval() {
        let mut gun = Gun {
            ammo: 0,
            ..Gun::laser_turret()
        };

        gun.recharge(1.0);
        assert_eq!(gun.ammo, 0);

        gun.recharge(1.0); // 2.0s накоплено → +1 (остаток 0.5)
        assert_eq!(gun.ammo, 1);
        assert!((gun.recharge_timer - 0.5).abs() < 1e-5);

        gun.recharge(3.0);
        assert_eq!(gun.ammo, 3);
    }

    #[test]
    fn test_recharge_stops_at_capacity() {
        let mut gun = Gun {
            ammo: 9,
            ..Gun::laser_turret()
        };
        gun.recharge(100.0);
        assert_eq!(gun.ammo, gun.capacity);
        assert_eq!(gun.recharge_timer, 0.0);
    }

    #[test]
    fn test_kinetic_does_not_recharge() {
        let mut gun = Gun {
            ammo: 0,
            ..Gun::kinetic_turret()
        };
        assert!(!gun.can_recharge());
        gun.recharge(100.0);
        assert_eq!(gun.ammo, 0);
    }
}
