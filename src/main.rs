//! Headless demo driver
//!
//! Runs a short scripted session through both modes at a fixed timestep and
//! logs the cues the simulation emits. Useful for eyeballing balance changes
//! without wiring up a front end.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use falling_feast::consts::SIM_DT;
use falling_feast::sim::{FrameInput, GameEvent, GameMode, GameState, tick};

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0x5eed);
    let mut state = GameState::new(seed);
    log::info!("seed {seed}");

    // A minute of food collecting, drifting back and forth
    run(&mut state, FrameInput {
        start_collecting: true,
        ..FrameInput::default()
    });
    for frame in 0..3600 {
        let drift_right = (frame / 120) % 2 == 0;
        run(&mut state, FrameInput {
            move_left: !drift_right,
            move_right: drift_right,
            ..FrameInput::default()
        });
    }
    log::info!(
        "collecting done: nutrition {:.0}, {} items still falling",
        state.player.nutrition,
        state.foods.len()
    );

    // Then a minute of fighting, firing at the wave every half second
    run(&mut state, FrameInput {
        to_title: true,
        ..FrameInput::default()
    });
    run(&mut state, FrameInput {
        start_fighting: true,
        ..FrameInput::default()
    });
    for frame in 0..3600 {
        let target = state
            .enemies
            .first()
            .map(|e| e.center())
            .unwrap_or(Vec2::new(500.0, 100.0));
        run(&mut state, FrameInput {
            fire: frame % 30 == 0,
            pointer: target,
            buy_buddy: frame == 600,
            buy_power_up: frame == 1200,
            ..FrameInput::default()
        });
        if state.mode == GameMode::Title {
            log::info!("run ended at frame {frame}");
            break;
        }
    }
    log::info!(
        "fighting done: level {:.2}, {} coins, {} enemies left",
        state.player.level,
        state.player.coins,
        state.enemies.len()
    );
}

fn run(state: &mut GameState, input: FrameInput) {
    tick(state, &input, SIM_DT);
    for event in state.drain_events() {
        match event {
            GameEvent::Fail => log::warn!("cue: {event:?}"),
            _ => log::debug!("cue: {event:?}"),
        }
    }
}
