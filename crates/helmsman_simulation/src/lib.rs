//! Helmsman Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: autopilot и fire control для NPC кораблей.
//!
//! Поток данных за один fixed tick:
//! 1. Planning: Blackboard → AgentOrders (steering / combat)
//! 2. Autopilot: SteeringState + ShipBody → ShipInput
//! 3. FireControl: CombatTargetingState + LOS → SetWeaponTarget / ShootCommand
//! 4. Weapons: ammo, cooldown, recharge
//! 5. Motion: ShipInput → ShipBody → Transform (headless mover)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod fire_control;
pub mod logger;
pub mod physics;
pub mod planner;
pub mod shared;
pub mod steering;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{FireControlDefaults, SimulationConfig, SteeringDefaults};
pub use fire_control::{
    fire_control_tick, predict_aim_point, CombatStatus, CombatTargetingState, FireControlPlugin,
    Gun, LineOfSight, ShootCommand, SightBlocker, SightObstacles, UNOCCLUDED_COOLDOWN,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use physics::{spawn_ship, ShipInput, ShipMotionPlugin};
pub use planner::{ArrivalSettings, Blackboard, NavigationGoal, OperatorStatus, PlannerPlugin};
pub use steering::{
    compute_input, AutopilotPlugin, SteeringArrived, SteeringState, SteeringStatus,
    BRAKE_COEFFICIENT,
};

/// Порядок подсистем внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Planning,
    Autopilot,
    FireControl,
    Weapons,
    Motion,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `SimulationConfig` берётся из World, если уже вставлен (например, из RON),
/// иначе используется default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(config.tick_duration()))
            .insert_resource(config)
            .register_type::<AgentOrders>()
            .register_type::<MapId>()
            .register_type::<ShipBody>()
            .register_type::<ThrustProfile>()
            .register_type::<ShipInput>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Planning,
                SimulationSet::Autopilot,
                SimulationSet::FireControl,
                SimulationSet::Weapons,
                SimulationSet::Motion,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((
            PlannerPlugin,
            AutopilotPlugin,
            FireControlPlugin,
            ShipMotionPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` = ровно один fixed tick (ManualDuration).
/// Исключение: первый update только инициализирует часы, fixed tick не идёт.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(SimulationConfig {
        seed,
        ..default()
    })
}

pub fn create_headless_app_with_config(config: SimulationConfig) -> App {
    let mut app = App::new();
    init_logger();
    logger::set_log_level(config.log_level);

    let tick = config.tick_duration();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(config.seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
