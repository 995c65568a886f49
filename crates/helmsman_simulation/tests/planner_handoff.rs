//! Blackboard → MoveToOperator → autopilot (полный headless App)

use bevy::prelude::*;
use helmsman_simulation::{
    create_headless_app, spawn_ship, AgentOrders, ArrivalSettings, Blackboard, MapCoordinates,
    MapId, NavigationGoal, OperatorStatus, ShipBody, ShipInput,
};

const MAP: MapId = MapId(0);

fn spawn_with_board(app: &mut App, position: Vec2, board: Blackboard) -> Entity {
    let ship = {
        let mut commands = app.world_mut().commands();
        spawn_ship(&mut commands, MAP, position, 0.0)
    };
    app.world_mut().flush();
    app.world_mut()
        .entity_mut(ship)
        .insert((board, AgentOrders::default()));
    ship
}

fn board(app: &App, ship: Entity) -> Blackboard {
    app.world()
        .get::<Blackboard>(ship)
        .cloned()
        .expect("ship has blackboard")
}

fn orders(app: &App, ship: Entity) -> AgentOrders {
    app.world()
        .get::<AgentOrders>(ship)
        .cloned()
        .expect("ship has orders")
}

#[test]
fn test_move_to_coordinates_finishes_and_clears() {
    let mut app = create_headless_app(3);

    let mut blackboard = Blackboard {
        clear_on_arrival: true,
        ..default()
    };
    blackboard.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(MAP, Vec2::new(40.0, 0.0))),
        ArrivalSettings {
            max_arrival_speed: Some(0.1),
            ..default()
        },
    );
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    app.update();
    app.update();
    assert!(orders(&app, ship).steering.is_some(), "operator startup creates steering");
    assert_eq!(board(&app, ship).move_status, OperatorStatus::Continuing);

    let mut finished = false;
    for _ in 0..3000 {
        app.update();
        if board(&app, ship).move_status == OperatorStatus::Finished {
            finished = true;
            break;
        }
    }

    assert!(finished, "MoveTo never finished");
    let blackboard = board(&app, ship);
    assert!(blackboard.navigation.is_none(), "clear_on_arrival drops the goal");
    assert!(orders(&app, ship).steering.is_none(), "shutdown drops steering");
    assert_eq!(*app.world().get::<ShipInput>(ship).expect("input"), ShipInput::COAST);

    let position = app
        .world()
        .get::<Transform>(ship)
        .map(|t| t.translation.truncate())
        .expect("transform");
    assert!(position.distance(Vec2::new(40.0, 0.0)) <= 5.0 + 0.5, "stopped at {:?}", position);
    let speed = app.world().get::<ShipBody>(ship).map(|b| b.speed()).expect("body");
    assert!(speed <= 0.2, "still moving at {}", speed);
}

#[test]
fn test_follow_entity_tracks_target_position() {
    let mut app = create_headless_app(3);

    let beacon = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, 30.0, 0.0), MAP))
        .id();

    let mut blackboard = Blackboard::default();
    blackboard.set_navigation(NavigationGoal::Entity(beacon), ArrivalSettings::default());
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    app.update();
    app.update();
    let target = orders(&app, ship).steering.map(|s| s.target);
    assert_eq!(target, Some(MapCoordinates::new(MAP, Vec2::new(0.0, 30.0))));

    // Маяк переехал: steering перенацелился
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(beacon) {
        transform.translation = Vec3::new(50.0, 0.0, 0.0);
    }
    app.update();

    let target = orders(&app, ship).steering.map(|s| s.target);
    assert_eq!(target, Some(MapCoordinates::new(MAP, Vec2::new(50.0, 0.0))));
}

#[test]
fn test_followed_entity_despawn_fails_operator() {
    let mut app = create_headless_app(3);

    let beacon = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, 300.0, 0.0), MAP))
        .id();

    let mut blackboard = Blackboard::default();
    blackboard.set_navigation(NavigationGoal::Entity(beacon), ArrivalSettings::default());
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    app.update();
    app.update();
    assert!(orders(&app, ship).steering.is_some());

    app.world_mut().despawn(beacon);
    app.update();

    assert_eq!(board(&app, ship).move_status, OperatorStatus::Failed);
    assert!(board(&app, ship).navigation.is_none());
    assert!(orders(&app, ship).steering.is_none());
}

#[test]
fn test_clearing_goal_stops_steering() {
    let mut app = create_headless_app(3);

    let mut blackboard = Blackboard::default();
    blackboard.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(MAP, Vec2::new(0.0, 500.0))),
        ArrivalSettings::default(),
    );
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    for _ in 0..10 {
        app.update();
    }
    assert!(orders(&app, ship).steering.is_some());

    if let Some(mut blackboard) = app.world_mut().get_mut::<Blackboard>(ship) {
        blackboard.clear_navigation();
    }
    app.update();

    assert!(orders(&app, ship).steering.is_none());
    assert_eq!(*app.world().get::<ShipInput>(ship).expect("input"), ShipInput::COAST);
}

#[test]
fn test_attack_order_creates_and_withdraws_combat() {
    let mut app = create_headless_app(3);
    let target = app.world_mut().spawn((Transform::default(), MAP)).id();

    let mut blackboard = Blackboard::default();
    blackboard.set_attack(target, None);
    let ship = spawn_with_board(&mut app, Vec2::new(10.0, 0.0), blackboard);

    app.update();
    app.update();

    let combat = orders(&app, ship).combat.expect("attack order creates combat state");
    assert_eq!(combat.target, Some(target));
    assert!(combat.los_accumulator >= 0.0);

    if let Some(mut blackboard) = app.world_mut().get_mut::<Blackboard>(ship) {
        blackboard.clear_attack();
    }
    app.update();

    assert!(orders(&app, ship).combat.is_none());
}

#[test]
fn test_new_navigation_goal_applies_new_arrival_settings() {
    let mut app = create_headless_app(3);

    let mut blackboard = Blackboard::default();
    blackboard.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(MAP, Vec2::new(0.0, 500.0))),
        ArrivalSettings {
            range: Some(5.0),
            ..default()
        },
    );
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    for _ in 0..5 {
        app.update();
    }
    let steering = orders(&app, ship).steering.expect("steering running");
    assert_eq!(steering.arrival_radius, 5.0);
    assert_eq!(steering.max_arrival_speed, None);

    // Планер сменил задачу на ходу: другой goal и другие arrival settings
    let new_goal = MapCoordinates::new(MAP, Vec2::new(-200.0, 0.0));
    if let Some(mut blackboard) = app.world_mut().get_mut::<Blackboard>(ship) {
        blackboard.set_navigation(
            NavigationGoal::Coordinates(new_goal),
            ArrivalSettings {
                range: Some(50.0),
                max_arrival_speed: Some(0.5),
                rotation_offset: 1.0,
            },
        );
    }
    app.update();
    app.update();

    let steering = orders(&app, ship).steering.expect("steering restarted");
    assert_eq!(steering.target, new_goal);
    assert_eq!(steering.arrival_radius, 50.0);
    assert_eq!(steering.max_arrival_speed, Some(0.5));
    assert_eq!(steering.target_rotation_offset, 1.0);
    assert_eq!(board(&app, ship).move_status, OperatorStatus::Continuing);
}

#[test]
fn test_same_goal_is_not_restarted_every_tick() {
    let mut app = create_headless_app(3);

    let mut blackboard = Blackboard::default();
    blackboard.set_navigation(
        NavigationGoal::Coordinates(MapCoordinates::new(MAP, Vec2::new(0.0, 500.0))),
        ArrivalSettings::default(),
    );
    let ship = spawn_with_board(&mut app, Vec2::ZERO, blackboard);

    for _ in 0..5 {
        app.update();
    }
    let revision = board(&app, ship).navigation_revision;
    app.update();

    assert_eq!(board(&app, ship).navigation_revision, revision);
    assert!(orders(&app, ship).steering.is_some());
    assert_eq!(board(&app, ship).active_revision, Some(board(&app, ship).navigation_revision));
}
