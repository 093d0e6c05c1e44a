//! Samurai sprite main entry point.
//!
//! A 2D sprite character controller written in Rust using:
//! - **bevy_ecs** for the entity-component-system world and schedule
//! - **raylib** for the window, input and drawing (feature `window`)
//!
//! # Controls
//!
//! Arrows or A/D move, X attack, Z jump, C crouch/stand, 1/2/3 parry
//! middle/up/down, T thrust, S down attack.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features window
//! cargo run -- --headless 240
//! ```
//!
//! Without the `window` feature (or with `--headless`) the binary plays a
//! scripted sequence and logs the render snapshot.

#[cfg(feature = "window")]
mod window;

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use samurai_sprite::components::animation::AnimationId;
use samurai_sprite::events::input::{InputMessage, Key};
use samurai_sprite::game::Game;
use samurai_sprite::resources::gameconfig::GameConfig;

const DEMO_FRAMES: u32 = 240;
const DEMO_DT: f32 = 1.0 / 60.0;

/// Samurai sprite character controller
#[derive(Parser)]
#[command(version, about = "A 2D samurai sprite with an animation state machine")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Override the sprite sheet image from the configuration.
    #[arg(long, value_name = "PATH")]
    sprite_sheet: Option<PathBuf>,

    /// Write a configuration file with default values and exit.
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// Run the scripted demo for this many frames without a window.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write defaults and quit
    if let Some(path) = cli.write_default_config {
        if let Err(e) = GameConfig::new().save_to(&path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", path.display());
        return;
    }

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(sheet) = cli.sprite_sheet {
        config.sprite_sheet = sheet;
    }

    let game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    #[cfg(feature = "window")]
    let game = match cli.headless {
        None => return window::run(game),
        Some(_) => game,
    };

    run_headless(game, cli.headless.unwrap_or(DEMO_FRAMES));
}

/// Input fed to the headless demo at a given frame.
fn scripted_input(frame: u32) -> Option<InputMessage> {
    let key = |key, pressed| Some(InputMessage::Key { key, pressed });
    match frame {
        10 => key(Key::ArrowRight, true),
        50 => key(Key::X, true),
        51 => key(Key::X, false),
        90 => key(Key::ArrowRight, false),
        100 => key(Key::Z, true),
        101 => key(Key::Z, false),
        150 => key(Key::C, true),
        151 => key(Key::C, false),
        160 => key(Key::ArrowLeft, true),
        180 => key(Key::ArrowLeft, false),
        190 => key(Key::C, true),
        191 => key(Key::C, false),
        200 => Some(InputMessage::Request(AnimationId::UpParry)),
        _ => None,
    }
}

fn run_headless(mut game: Game, frames: u32) {
    info!("Running headless demo for {} frames", frames);
    let mut last = game.render();
    for frame in 0..frames {
        if let Some(msg) = scripted_input(frame) {
            game.send(msg);
        }
        game.tick(DEMO_DT);
        let snap = game.render();
        if snap.animation != last.animation || frame % 30 == 0 {
            info!(
                "[{:>5}ms] {:<11} frame={} sheet=({},{}) x={:.1} {:?} y+{:.1}",
                game.now_ms(),
                snap.animation.name(),
                snap.frame,
                snap.sprite_offset_x,
                snap.sprite_offset_y,
                snap.position_x,
                snap.facing,
                snap.vertical_offset
            );
        }
        last = snap;
    }
}
