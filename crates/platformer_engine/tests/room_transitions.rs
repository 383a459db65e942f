//! Full-frame integration tests: camera notifications, player freezing and
//! frame ordering

use std::cell::RefCell;
use std::rc::Rc;

use platformer_engine::camera::CameraError;
use platformer_engine::config::ColliderConfig;
use platformer_engine::controller::ControllerSnapshot;
use platformer_engine::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Two side-by-side rooms over one long floor whose top is y = 0
fn two_room_level(spawn: Vec2) -> GameConfig {
    let mut config = GameConfig {
        rooms: vec![
            Room::new(Vec2::new(0.0, 5.0), Vec2::new(20.0, 10.0)),
            Room::new(Vec2::new(40.0, 5.0), Vec2::new(20.0, 10.0)),
        ],
        colliders: vec![ColliderConfig {
            center: Vec2::new(20.0, -1.0),
            half_extents: Vec2::new(50.0, 1.0),
            layer: LayerMask::ENVIRONMENT,
        }],
        ..GameConfig::default()
    };
    config.spawn.position = spawn;
    config
}

fn record_events(sim: &mut Simulation) -> Rc<RefCell<Vec<RoomEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    sim.camera_mut()
        .subscribe_all(Box::new(move |event: &RoomEvent| sink.borrow_mut().push(*event)));
    log
}

#[test]
fn test_player_frozen_for_whole_transition() {
    let mut sim = Simulation::new(two_room_level(Vec2::new(0.0, 0.5))).expect("simulation");
    let mut input = InputState::new();
    for _ in 0..10 {
        sim.frame(DT, &mut input);
    }

    // Mid-air in the second room: any update that ran would apply gravity
    sim.character_mut().body_mut().set_position(Vec2::new(30.0, 4.0));
    let before = sim.character().snapshot();

    let report = sim.frame(DT, &mut input);
    assert!(report.transitioning);
    assert!(report.frozen);
    assert_eq!(sim.character().snapshot(), before);

    let mut frames = 0;
    loop {
        input.set_axes(1.0, 1.0);
        input.press(Action::Jump);
        input.press(Action::Dash);
        let report = sim.frame(DT, &mut input);
        input.release(Action::Jump);
        input.release(Action::Dash);

        if !report.transitioning {
            break;
        }
        assert!(sim.character().is_frozen());
        assert_eq!(sim.character().snapshot(), before);

        frames += 1;
        assert!(frames < 10_000, "transition never finished");
    }

    // The frame that finished the transition already ran the player
    assert!(!sim.character().is_frozen());
    assert_eq!(sim.camera().current_room(), Some(1));
    assert_ne!(sim.character().snapshot(), before);
}

#[test]
fn test_walking_into_next_room_transitions_once() {
    let mut sim = Simulation::new(two_room_level(Vec2::new(15.0, 0.5))).expect("simulation");
    let events = record_events(&mut sim);
    let mut input = InputState::new();
    input.set_axes(1.0, 0.0);

    let mut frames = 0;
    while !sim.camera().is_transitioning() {
        sim.frame(DT, &mut input);
        frames += 1;
        assert!(frames < 600, "never reached the second room");
    }
    assert_eq!(
        events.borrow().as_slice(),
        &[RoomEvent::TransitionEnter { from: Some(0), to: Some(1) }]
    );

    let frozen_at = sim.character().body().position();
    while sim.camera().is_transitioning() {
        sim.frame(DT, &mut input);
        if sim.camera().is_transitioning() {
            assert_eq!(sim.character().body().position(), frozen_at);
        }
    }
    assert_eq!(events.borrow().len(), 2);
    assert_eq!(events.borrow()[1], RoomEvent::TransitionExit { room: Some(1) });

    for _ in 0..30 {
        sim.frame(DT, &mut input);
    }
    assert!(sim.character().body().position().x > frozen_at.x);
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn test_jump_through_simulation() {
    let mut sim = Simulation::new(two_room_level(Vec2::new(0.0, 0.5))).expect("simulation");
    let mut input = InputState::new();
    for _ in 0..10 {
        sim.frame(DT, &mut input);
    }
    assert!(sim.character().body().grounded());

    input.press(Action::Jump);
    let mut peak = 0.0_f32;
    for _ in 0..30 {
        sim.frame(DT, &mut input);
        peak = peak.max(sim.character().body().position().y);
    }
    assert!(peak > 2.0);
}

#[test]
fn test_second_simulation_on_thread_is_rejected() {
    let level = two_room_level(Vec2::new(0.0, 0.5));
    let first = Simulation::new(level.clone()).expect("simulation");

    let second = Simulation::new(level.clone());
    assert!(matches!(
        second,
        Err(SimulationError::Camera(CameraError::AlreadyConstructed))
    ));

    drop(first);
    assert!(Simulation::new(level).is_ok());
}

fn scripted_run() -> Vec<ControllerSnapshot> {
    let mut sim = Simulation::new(two_room_level(Vec2::new(0.0, 0.5))).expect("simulation");
    let mut input = InputState::new();
    let mut snapshots = Vec::new();

    for frame in 0..400_u32 {
        let horizontal = match frame / 50 {
            0 | 3 => 1.0,
            2 => -1.0,
            _ => 0.0,
        };
        input.set_axes(horizontal, 0.0);
        match frame % 37 {
            0 => input.press(Action::Jump),
            5 => input.release(Action::Jump),
            20 => input.press(Action::Dash),
            21 => input.release(Action::Dash),
            _ => {}
        }

        // Uneven frame times
        let dt = if frame % 3 == 0 { 1.0 / 30.0 } else { 1.0 / 90.0 };
        sim.frame(dt, &mut input);
        snapshots.push(sim.character().snapshot());
    }
    snapshots
}

#[test]
fn test_runs_are_deterministic() {
    let first = scripted_run();
    let second = scripted_run();
    assert_eq!(first, second);
}

#[test]
fn test_bundled_level_files_agree_and_load() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/config");
    let from_toml = GameConfig::load(&format!("{dir}/level.toml")).expect("level.toml");
    let from_ron = GameConfig::load(&format!("{dir}/level.ron")).expect("level.ron");
    assert_eq!(from_toml, from_ron);

    let sim = Simulation::new(from_toml).expect("simulation");
    assert!(sim.camera().current_room().is_some());
}
