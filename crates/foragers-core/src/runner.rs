//! Day-by-day simulation loop with a per-day callback.
//!
//! [`run`] drives [`World::run_day`] for a fixed number of days and hands
//! every [`DaySummary`] to a [`DayCallback`], which is where the engine
//! writes checkpoints. The run ends early if the population dies out.

use tracing::{info, warn};

use crate::error::SimulationError;
use crate::tick::DaySummary;
use crate::world::World;

/// Error type callbacks may return to abort a run.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimulationError,
    },

    /// The day callback asked to abort.
    #[error("day callback failed after day {day}: {source}")]
    Callback {
        /// The day that had just ended.
        day: u64,
        /// The error reported by the callback.
        source: CallbackError,
    },
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every requested day was simulated.
    DaysCompleted,
    /// No agents were left alive.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: EndReason,
    /// The last day summary, if any day completed.
    pub final_summary: Option<DaySummary>,
    /// Total number of days simulated.
    pub days_run: u64,
}

/// Callback invoked after each day completes.
pub trait DayCallback {
    /// Called after the day boundary with the summary and the freshly reset
    /// world.
    fn on_day_end(&mut self, summary: &DaySummary, world: &World) -> Result<(), CallbackError>;
}

/// A no-op day callback for testing.
pub struct NoOpCallback;

impl DayCallback for NoOpCallback {
    fn on_day_end(&mut self, _summary: &DaySummary, _world: &World) -> Result<(), CallbackError> {
        Ok(())
    }
}

/// Simulate up to `days` days.
///
/// # Errors
///
/// Returns [`RunnerError::Simulation`] if a step fails, or
/// [`RunnerError::Callback`] if the callback reports an error.
pub fn run(
    world: &mut World,
    days: u64,
    callback: &mut dyn DayCallback,
) -> Result<SimulationResult, RunnerError> {
    info!(
        days,
        steps_per_day = world.clock().steps_per_day(),
        population = world.population(),
        "Simulation starting"
    );

    let mut final_summary = None;
    let mut days_run: u64 = 0;
    let mut end_reason = EndReason::DaysCompleted;

    while days_run < days {
        let summary = world.run_day()?;
        days_run = days_run.saturating_add(1);
        callback
            .on_day_end(&summary, world)
            .map_err(|source| RunnerError::Callback {
                day: summary.day,
                source,
            })?;
        let extinct = summary.population == 0;
        final_summary = Some(summary);
        if extinct {
            warn!(days_run, "Population extinct, stopping early");
            end_reason = EndReason::Extinction;
            break;
        }
    }

    info!(days_run, ?end_reason, population = world.population(), "Simulation finished");
    Ok(SimulationResult {
        end_reason,
        final_summary,
        days_run,
    })
}
