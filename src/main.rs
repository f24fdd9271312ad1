//! Labyrinth Walk entry point
//!
//! Headless runner: generates a labyrinth, drives the walker with a scripted
//! keyboard at a simulated 60 fps and prints the final minimap.

use std::path::PathBuf;

use clap::Parser;
use labyrinth_walk::platform::{FrameClock, Key, VirtualKeyboard};
use labyrinth_walk::renderer::{FrameSink, Minimap};
use labyrinth_walk::sim::maze::dead_ends;
use labyrinth_walk::sim::{Cell, Probe};
use labyrinth_walk::{Session, Settings};

/// Simulated frame interval, in milliseconds
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Frames spent turning after the walker hits a wall
const TURN_FRAMES: u32 = 30;

#[derive(Parser, Debug)]
#[command(author, version, about = "Procedural labyrinth walker", long_about = None)]
struct Cli {
    /// Labyrinth side in cells (overrides the config file)
    #[arg(long)]
    side: Option<usize>,
    /// Maze seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Frames to simulate
    #[arg(long, default_value_t = 1800)]
    ticks: u32,
    /// Share of dead ends to open into loops, 0..=1 (overrides the config file)
    #[arg(long)]
    braid: Option<f32>,
    /// Settings JSON to load
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the effective settings to this path and continue
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> labyrinth_walk::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(side) = cli.side {
        settings.side = side;
    }
    if let Some(braid) = cli.braid {
        settings.braid = braid;
    }

    log::info!("Labyrinth Walk (native) starting...");
    let mut session = Session::generate(settings, cli.seed)?;
    if let Some(path) = &cli.save_config {
        session.settings().save(path)?;
    }
    println!(
        "{0}x{0} labyrinth, seed {1}: {2} open cells, {3} dead ends",
        session.grid().side(),
        session.seed(),
        session.grid().count(Cell::Open),
        dead_ends(session.grid())
    );
    let mut minimap = Minimap::new();
    let mut keyboard = VirtualKeyboard::new();
    let mut clock = FrameClock::new();
    let mut turning = 0u32;

    keyboard.key_down(Key::Up);
    for frame in 0..=cli.ticks {
        let dt = clock.advance(f64::from(frame) * FRAME_MS);
        let outcome = session.tick(&keyboard.intents(), dt);

        if turning > 0 {
            turning -= 1;
            if turning == 0 {
                keyboard.key_up(Key::Left);
            }
        } else if outcome.probes.is_blocked(Probe::Forward) {
            keyboard.key_down(Key::Left);
            turning = TURN_FRAMES;
        }

        if let Some(item) = outcome.collected {
            println!("frame {frame}: picked up item at ({}, {})", item.x, item.z);
        }
        minimap.present(&session.frame())?;
    }
    keyboard.release_all();

    println!("{}", minimap.last());
    println!("{}", Minimap::status_line(&session.frame()));
    println!(
        "Collected {} item(s) in {} frames ({} simulated ticks)",
        session.collected(),
        minimap.frames(),
        session.state().time_ticks
    );
    Ok(())
}
