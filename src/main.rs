//! Scroll Defender entry point
//!
//! Headless driver: loads settings, builds assets once, then runs the
//! simulation at a fixed tick rate with the demo autopilot (or idle input),
//! rendering every frame into a command buffer. The last frame is rasterized
//! and summarized.

use std::time::{Duration, Instant};

use serde::Serialize;

use scroll_defender::input::{HeldButtons, InputLatch, autopilot};
use scroll_defender::renderer::{Framebuffer, Surface};
use scroll_defender::sim::{GamePhase, PlayerHit};
use scroll_defender::timestep::FixedTimestep;
use scroll_defender::{
    AudioManager, DrawCommand, Settings, Simulation, SoundEffect, initialize_assets,
};

/// End-of-run report printed as JSON
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    simulated_seconds: f32,
    score: u64,
    lives: u8,
    phase: &'static str,
    kills: u32,
    deaths: u32,
    game_overs: u32,
    restarts: u32,
    sounds_played: u32,
    last_frame_commands: usize,
    last_frame_lit_pixels: usize,
    last_frame_labels: Vec<String>,
}

fn phase_name(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Playing => "playing",
        GamePhase::Respawning => "respawning",
        GamePhase::GameOver => "game_over",
    }
}

fn load_settings() -> Settings {
    match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Settings::default()
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Scroll Defender (headless) starting...");

    let settings = load_settings();
    let assets = match initialize_assets() {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Asset setup failed: {}", e);
            std::process::exit(1);
        }
    };
    let mut audio = AudioManager::with_settings(&assets, &settings);

    let mut sim = match settings.seed {
        Some(seed) => Simulation::new(seed),
        None => Simulation::from_entropy(),
    };
    let mut latch = InputLatch::new();
    let mut clock = FixedTimestep::new(settings.tick_rate);
    let mut frame: Vec<DrawCommand> = Vec::with_capacity(256);

    let mut summary = RunSummary {
        seed: sim.state().seed,
        ticks: 0,
        simulated_seconds: 0.0,
        score: 0,
        lives: 0,
        phase: "playing",
        kills: 0,
        deaths: 0,
        game_overs: 0,
        restarts: 0,
        sounds_played: 0,
        last_frame_commands: 0,
        last_frame_lit_pixels: 0,
        last_frame_labels: Vec::new(),
    };

    let mut last = Instant::now();
    while summary.ticks < settings.run_ticks {
        let due = if settings.realtime {
            let now = Instant::now();
            let due = clock.advance(now.duration_since(last).as_secs_f32());
            last = now;
            if due == 0 {
                std::thread::sleep(Duration::from_secs_f32(clock.time_to_next_tick()));
                continue;
            }
            due
        } else {
            1
        };

        let remaining = settings.run_ticks - summary.ticks;
        for _ in 0..u64::from(due).min(remaining) {
            let held = if settings.autopilot {
                autopilot(sim.state())
            } else {
                HeldButtons::default()
            };
            let input = latch.snapshot(held);
            let outcome = sim.update(&input, &mut audio);

            summary.ticks += 1;
            summary.kills += outcome.kills;
            match outcome.player_hit {
                PlayerHit::None => {}
                PlayerHit::LifeLost => summary.deaths += 1,
                PlayerHit::Fatal => {
                    summary.deaths += 1;
                    summary.game_overs += 1;
                }
            }
            if outcome.restarted {
                summary.restarts += 1;
            }

            frame.clear();
            sim.draw(&mut frame);
        }
    }

    let state = sim.state();
    summary.score = state.score;
    summary.lives = state.player.lives;
    summary.phase = phase_name(state.phase);
    summary.sounds_played = SoundEffect::ALL.iter().map(|&e| audio.play_count(e)).sum();
    summary.simulated_seconds = summary.ticks as f32 * clock.dt();
    summary.last_frame_commands = frame.len();

    // Rasterize the final frame against the sprite bank
    let mut screen = Framebuffer::new(&assets.images);
    for cmd in frame {
        screen.submit(cmd);
    }
    summary.last_frame_lit_pixels = screen.lit_pixels();
    summary.last_frame_labels = screen.labels().iter().map(|l| l.text.clone()).collect();

    log::info!("Run finished after {} ticks", summary.ticks);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}
