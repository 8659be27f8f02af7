/*
 * Steering Behaviors Demo
 *
 * Balloon-like boids wander around the canvas while seekers chase them,
 * followers patrol a loop of waypoints and a turret agent drifts about.
 * Left click throws an explosion of particles.
 *
 * Parameters can be loaded from a JSON file and adjusted in real time
 * with the sliders. `--ticks` runs the simulation without a window and
 * logs where everything ended up.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use steering::app::{self, model, update};
use steering::{SimulationParams, World};

#[derive(Parser, Debug)]
#[command(about = "2D steering behaviors demo")]
struct Args {
    /// JSON parameter file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many ticks without a window, then exit
    #[arg(long)]
    ticks: Option<u64>,
}

// load here to keep main clean
fn load_params(args: &Args) -> Result<SimulationParams> {
    let mut params = match &args.config {
        Some(path) => SimulationParams::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimulationParams::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    Ok(params)
}

fn run_headless(params: &SimulationParams, ticks: u64) -> Result<()> {
    let mut world = World::from_params(params).context("building world")?;
    for _ in 0..ticks {
        world.tick();
    }
    for (i, boid) in world.boids().iter().enumerate() {
        info!(index = i, position = %boid.position(), velocity = %boid.velocity(), "boid");
    }
    info!(ticks = world.ticks(), particles = world.particles().len(), "headless run finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let params = load_params(&args)?;

    if let Some(ticks) = args.ticks {
        return run_headless(&params, ticks);
    }

    app::set_startup_params(params);
    nannou::app(model).update(update).run();

    Ok(())
}
