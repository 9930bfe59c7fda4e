//! Sightline headless demo
//!
//! Loads a scene (or the built-in demo), sweeps the FOV camera through a
//! full turn and logs every tick where the target is spotted or lost.
//!
//! Usage: `sightline [scene.json] [settings.json]`

use std::f32::consts::TAU;
use std::process::ExitCode;

use sightline::Settings;
use sightline::sim::{SceneDesc, SightState, TickInput, tick};

fn run() -> Result<(), sightline::Error> {
    let mut args = std::env::args().skip(1);
    let desc = match args.next() {
        Some(path) => SceneDesc::load(path)?,
        None => SceneDesc::demo(),
    };
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut state = SightState::new(&desc, settings)?;
    log::info!(
        "Scene ready: {} entities, target {}, visible at start: {}",
        state.scene.len(),
        state.los.target().index(),
        state.visible
    );

    let sweep_ticks = (TAU / state.settings.turn_step).ceil() as u64;
    let input = TickInput {
        camera_turn: 1.0,
        ..Default::default()
    };
    let mut visible_ticks = 0u64;
    for _ in 0..sweep_ticks {
        if tick(&mut state, &input) {
            visible_ticks += 1;
        }
    }

    println!(
        "Target visible on {} of {} ticks of a full camera sweep",
        visible_ticks, sweep_ticks
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Sightline (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
