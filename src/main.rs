//! Twee Jump headless runner
//!
//! Plays one seeded session against an in-memory scene with a synthetic
//! tilt signal and prints a JSON line per frame.
//!
//! Usage: `twee-jump [config.json] [seed] [frames]`

use std::fs;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Serialize;

use twee_jump::audio::LogSink;
use twee_jump::consts::FRAME_DT;
use twee_jump::scene::HeadlessScene;
use twee_jump::sim::GameEvent;
use twee_jump::{AudioSettings, Game, SimConfig};

/// One line of the trace
#[derive(Debug, Serialize)]
struct FrameTrace {
    frame: u64,
    avatar_pos: Vec2,
    avatar_vel: Vec2,
    facing_right: bool,
    max_step: f32,
    placements: u64,
    events: Vec<GameEvent>,
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Twee Jump (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {path}"))?;
            SimConfig::from_json(&raw).with_context(|| format!("bad config {path}"))?
        }
        _ => SimConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s}"))?,
        None => 12345,
    };
    let frames: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid frame count {s}"))?,
        None => 1800,
    };

    let mut game = Game::new(
        config,
        AudioSettings::default(),
        HeadlessScene::new(),
        LogSink,
        seed,
    )
    .context("failed to set up scene")?;

    for frame in 0..frames {
        // Slow side-to-side sway, as if the device were rocked by hand
        let tilt = (frame as f32 * FRAME_DT * 1.3).sin() * 0.4;
        game.accelerate(tilt);
        let events = game.frame(FRAME_DT).context("scene sync failed")?;

        let state = game.state();
        let trace = FrameTrace {
            frame,
            avatar_pos: state.avatar.pos,
            avatar_vel: state.avatar.vel,
            facing_right: state.avatar.facing_right,
            max_step: state.field.scroll.max_step,
            placements: state.field.placement_count,
            events,
        };
        println!("{}", serde_json::to_string(&trace)?);

        if state.suspended() {
            log::info!("Session ended at frame {}", frame);
            break;
        }
    }

    Ok(())
}
