//! Headless driver for the water simulation.
//!
//! Runs a scenario frame by frame: emitters queue edits, the edits are
//! applied at the step boundary, then the grid steps. Text frames go to
//! stdout, timings to the log.
//!
//! Run: cargo run -p water_runner --release -- --frame-every 50
//! Set RUST_LOG=debug for per-step timings.

mod emitter;
mod frame;
mod scenario;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use sim::EditQueue;

use crate::scenario::Scenario;

/// Compressible-water cellular automaton runner
#[derive(Parser, Debug)]
#[command(name = "water_runner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a water cellular-automaton scenario headless", long_about = None)]
struct Cli {
    /// Scenario JSON file. Defaults to the container scenario.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's step count
    #[arg(short = 'n', long)]
    steps: Option<usize>,

    /// Print a text frame every N steps (0 = final frame only)
    #[arg(short, long, default_value_t = 0)]
    frame_every: usize,

    /// Write the built-in container scenario to this path and exit
    #[arg(long)]
    write_reference: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(path) = &cli.write_reference {
        Scenario::reference().save_json(path)?;
        log::info!("wrote reference scenario to {}", path.display());
        return Ok(());
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load_json(path)?,
        None => Scenario::reference(),
    };
    let steps = cli.steps.unwrap_or(scenario.steps);

    let mut grid = scenario.build_grid()?;
    log::info!(
        "scenario '{}': {}x{} grid, {} emitters, {} steps",
        scenario.name,
        grid.width(),
        grid.height(),
        scenario.emitters.len(),
        steps
    );

    let mut queue = EditQueue::new();
    let mut total_step_time = Duration::ZERO;
    let mut total_drained = 0.0f64;

    for tick in 0..steps as u64 {
        for emitter in &scenario.emitters {
            emitter.emit(tick, &mut queue);
        }
        queue.drain_into(&mut grid);

        let start = Instant::now();
        grid.step();
        let elapsed = start.elapsed();
        total_step_time += elapsed;
        total_drained += grid.drained_last_step() as f64;
        log::debug!("frame {}: step took {} us", tick, elapsed.as_micros());

        if cli.frame_every > 0 && (tick + 1) % cli.frame_every as u64 == 0 {
            println!("frame {}", tick + 1);
            print!("{}", frame::render(&grid));
        }
    }

    if cli.frame_every == 0 {
        print!("{}", frame::render(&grid));
    }

    let mean_us = if steps > 0 {
        total_step_time.as_secs_f64() * 1e6 / steps as f64
    } else {
        0.0
    };
    log::info!(
        "done: mass {:.4}, {} water cells, drained {:.4}, mean step {:.1} us",
        grid.total_mass(),
        grid.water_cells(),
        total_drained,
        mean_us
    );
    Ok(())
}
