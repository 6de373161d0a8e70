//! Simulation binary for the forager population.
//!
//! Loads configuration, builds a world (fresh or from a checkpoint), and
//! runs the day loop, writing a checkpoint at day zero and every
//! `days_per_checkpoint` days after.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `foragers-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the world RNG
//! 4. Generate the world, or restore it from `checkpoint.resume_from`
//! 5. Write the initial checkpoint
//! 6. Run the simulation loop
//! 7. Log the result

mod checkpoint;
mod error;

use std::path::Path;

use foragers_core::config::SimulationConfig;
use foragers_core::runner;
use foragers_core::World;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::checkpoint::CheckpointWriter;
use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config comes first so its log level can seed the filter.
    let (config, from_file) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("foragers-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        seed = config.world.seed,
        agents = config.world.agents,
        shelters = config.world.shelters,
        sites = config.world.sites,
        steps_per_day = config.time.steps_per_day,
        days = config.time.days,
        "Configuration loaded"
    );

    let mut world = build_world(config)?;

    let checkpoints = world.config().checkpoint.clone();
    checkpoint::write(&checkpoints.directory, 0, &world.snapshot())?;

    let days = world.config().time.days;
    let mut writer = CheckpointWriter::new(checkpoints.directory, checkpoints.days_per_checkpoint);
    let result = runner::run(&mut world, days, &mut writer).map_err(EngineError::from)?;

    info!(
        end_reason = ?result.end_reason,
        days_run = result.days_run,
        population = world.population(),
        "Simulation complete"
    );
    Ok(())
}

/// Load `foragers-config.yaml` from the working directory, falling back to
/// defaults when it does not exist. The flag reports whether a file was read.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new("foragers-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Generate a world from the configured seed, or restore one from the
/// configured checkpoint.
fn build_world(config: SimulationConfig) -> Result<World, EngineError> {
    let rng = StdRng::seed_from_u64(config.world.seed);
    let world = match config.checkpoint.resume_from.clone() {
        Some(path) => {
            info!(path = %path.display(), "Resuming from checkpoint");
            let record = checkpoint::read(&path)?;
            World::from_record(&record, config, rng)?
        }
        None => World::generate(config, rng)?,
    };
    Ok(world)
}
