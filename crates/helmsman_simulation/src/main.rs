//! Headless симуляция Helmsman
//!
//! Запускает Bevy App без рендера: охотник летит к точке и обстреливает дрон.
//! Опционально: путь к RON конфигу первым аргументом.

use bevy::prelude::*;
use helmsman_simulation::shared::LAYER_IMPASSABLE;
use helmsman_simulation::{
    create_headless_app_with_config, init_logger, log_error, log_info, spawn_ship, AgentOrders,
    ArrivalSettings, Blackboard, Gun, MapCoordinates, MapId, NavigationGoal, ShipBody,
    SightBlocker, SightObstacles, SimulationConfig,
};

fn load_config() -> SimulationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            log_error(&format!("Config {}: {}; using defaults", path, err));
            return SimulationConfig::default();
        }
    };

    match SimulationConfig::from_ron(&text) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Config {}: {}; using defaults", path, err));
            SimulationConfig::default()
        }
    }
}

fn main() {
    init_logger();
    let config = load_config();
    println!("Starting Helmsman headless simulation (seed: {})", config.seed);

    let mut app = create_headless_app_with_config(config);
    let map = MapId(0);

    let (hunter, drone) = {
        let world = app.world_mut();
        let mut commands = world.commands();

        let drone = spawn_ship(&mut commands, map, Vec2::new(60.0, 40.0), 0.0);
        let hunter = spawn_ship(&mut commands, map, Vec2::ZERO, 0.0);

        (hunter, drone)
    };
    app.world_mut().flush();

    // Астероид между стартом и дроном: первые секунды цель не видна
    app.world_mut().insert_resource(SightObstacles {
        blockers: vec![SightBlocker::new(map, Vec2::new(20.0, 14.0), 4.0, LAYER_IMPASSABLE)],
    });

    let mut hunter_board = Blackboard::default();
    hunter_board.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(map, Vec2::new(100.0, 0.0))),
        ArrivalSettings {
            max_arrival_speed: Some(0.1),
            ..default()
        },
    );
    hunter_board.set_attack(drone, None);
    app.world_mut()
        .entity_mut(hunter)
        .insert((hunter_board, AgentOrders::default(), Gun::kinetic_turret()));

    let mut drone_board = Blackboard::default();
    drone_board.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(map, Vec2::new(60.0, -60.0))),
        ArrivalSettings::default(),
    );
    app.world_mut()
        .entity_mut(drone)
        .insert((drone_board, AgentOrders::default()));

    // Запускаем 1200 тиков симуляции (20 секунд)
    for tick in 0..1200 {
        app.update();

        if tick % 120 == 0 {
            let world = app.world();
            let position = world.get::<Transform>(hunter).map(|t| t.translation.truncate());
            let speed = world.get::<ShipBody>(hunter).map(|b| b.speed());
            let ammo = world.get::<Gun>(hunter).map(|g| g.ammo);
            let status = world
                .get::<AgentOrders>(hunter)
                .and_then(|orders| orders.combat.as_ref().map(|c| c.status));

            log_info(&format!(
                "Tick {}: hunter at {:?}, speed {:?}, ammo {:?}, fire control {:?}",
                tick, position, speed, ammo, status
            ));
        }
    }

    println!("Simulation complete!");
}
