//! Headless platformer runner
//!
//! Loads a level, replays a scripted input track at a fixed render rate and
//! logs what the player and the room camera do.
//!
//! Usage: `platformer [LEVEL_FILE] [SECONDS]`

mod script;

use platformer_engine::effects::EffectRecorder;
use platformer_engine::foundation::logging;
use platformer_engine::prelude::*;

use script::InputScript;

const DEFAULT_LEVEL: &str = "resources/config/level.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;
const REPORT_EVERY: u64 = 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level("info");

    let mut args = std::env::args().skip(1);
    let level = args.next().unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let mut script = InputScript::demo();
    let seconds = match args.next() {
        Some(text) => text.parse::<f32>()?,
        None => script.duration() + 2.0,
    };

    log::info!("Starting platformer on {level} for {seconds}s");

    let config = GameConfig::load(&level)?;
    let mut simulation = Simulation::with_effects(config, Box::new(EffectRecorder::new()))?;
    simulation
        .camera_mut()
        .subscribe_all(Box::new(|event: &RoomEvent| log::info!("Room event: {event:?}")));

    let mut input = InputState::new();
    let mut time = 0.0_f32;
    let mut frozen_frames = 0_u64;

    while time < seconds {
        script.apply_until(time, &mut input);
        let report = simulation.frame(FRAME_TIME, &mut input);
        time += FRAME_TIME;

        if report.frozen {
            frozen_frames += 1;
        }
        if simulation.frame_count() % REPORT_EVERY == 0 {
            report_state(&simulation, time);
        }
    }

    let body = simulation.character().body();
    log::info!(
        "Finished after {} frames / {} ticks; player at {:?} (grounded: {}), {} frames frozen, camera in room {:?}",
        simulation.frame_count(),
        simulation.tick_count(),
        body.position(),
        body.grounded(),
        frozen_frames,
        simulation.camera().current_room()
    );

    Ok(())
}

fn report_state(simulation: &Simulation, time: f32) {
    let character = simulation.character();
    let body = character.body();
    let camera = simulation.camera();
    log::info!(
        "t={:>5.2}s pos=({:>6.2}, {:>6.2}) vel=({:>6.2}, {:>6.2}) {:?}{} camera=({:.2}, {:.2}) room={:?}",
        time,
        body.position().x,
        body.position().y,
        body.velocity().x,
        body.velocity().y,
        character.mode(),
        if character.is_frozen() { " [frozen]" } else { "" },
        camera.position().x,
        camera.position().y,
        camera.current_room()
    );
}
