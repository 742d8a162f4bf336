//! Robo Arena - headless match runner
//!
//! Run with: `cargo run --bin robo_arena -- [--tuning tuning.json] [--frames 3000]`
//!
//! Plays a scripted match between the two combatants at a fixed 16 ms
//! frame and prints the final status as JSON. Set `RUST_LOG=debug` to see
//! shots, hits and lock-on events.

use std::env;
use std::error::Error;

use robo_arena_engine::game::{Arena, Tuning};
use robo_arena_engine::input::{Action, ScriptedInput};
use tracing::info;

const FRAME_MS: u32 = 16;

struct Args {
    tuning: Option<String>,
    frames: usize,
}

fn parse_args() -> Args {
    let mut cfg = Args {
        tuning: None,
        frames: 3000,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tuning" if i + 1 < args.len() => {
                cfg.tuning = Some(args[i + 1].clone());
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                cfg.frames = args[i + 1].parse().unwrap_or(3000);
                i += 2;
            }
            _ => i += 1,
        }
    }
    cfg
}

/// Combatant 0 lands, walks toward the opponent firing, then hops the wall.
fn attacker_script() -> ScriptedInput {
    ScriptedInput::repeat(&[], 120)
        .then(&[Action::MoveForward, Action::Fire], 300)
        .then(&[Action::MoveForward, Action::Boost, Action::Fire], 60)
        .then(&[Action::Fire, Action::LookDown], 30)
        .then(&[Action::Fire], 600)
        .then(&[Action::MoveLeft, Action::TurnRight, Action::Fire], 300)
}

/// Combatant 1 lands, strafes behind the wall and returns fire.
fn defender_script() -> ScriptedInput {
    ScriptedInput::repeat(&[], 120)
        .then(&[Action::MoveRight, Action::Fire], 200)
        .then(&[Action::MoveLeft, Action::Fire], 200)
        .then(&[Action::Fire, Action::ZoomIn], 100)
        .then(&[Action::Fire], 700)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut arena = Arena::new(tuning)?;
    let mut attacker = attacker_script();
    let mut defender = defender_script();
    info!(frames = args.frames, frame_ms = FRAME_MS, "match started");

    let mut shots = [0usize; 2];
    let mut hits = [0usize; 2];
    for _ in 0..args.frames {
        let report = arena.step([attacker.next_frame(), defender.next_frame()], FRAME_MS);

        for i in 0..2 {
            shots[i] += report.shots[i];
            hits[i] += report.hits[i];
        }
        if report.terminate || report.match_over {
            break;
        }
    }

    info!(?shots, ?hits, "match summary");
    println!("{}", serde_json::to_string_pretty(&arena.status())?);
    Ok(())
}
