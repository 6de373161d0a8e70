//! Step counter and the day it falls in.
//!
//! The step number is the single source of truth; the day, the step within
//! the day, and whether this is the last step of the day are all derived
//! from it.

use crate::config::TimeConfig;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Step counter would overflow.
    #[error("step counter overflow: cannot advance beyond u64::MAX")]
    StepOverflow,

    /// Invalid time configuration.
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Simulation clock counting steps from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldClock {
    /// Steps executed so far; the step about to run.
    step: u64,

    /// Steps in one day (at least 1).
    steps_per_day: u64,
}

impl WorldClock {
    /// Create a clock at step 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `steps_per_day` is zero.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        if config.steps_per_day == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "steps_per_day must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            step: 0,
            steps_per_day: config.steps_per_day,
        })
    }

    /// The step about to run.
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Steps in one day.
    pub const fn steps_per_day(&self) -> u64 {
        self.steps_per_day
    }

    /// Zero-based index of the current day.
    pub const fn day(&self) -> u64 {
        match self.step.checked_div(self.steps_per_day) {
            Some(day) => day,
            None => 0,
        }
    }

    /// Position of the current step within its day.
    pub const fn step_in_day(&self) -> u64 {
        match self.step.checked_rem(self.steps_per_day) {
            Some(step) => step,
            None => 0,
        }
    }

    /// Whether the current step is the last of its day.
    pub const fn is_day_end(&self) -> bool {
        self.step_in_day() == self.steps_per_day.saturating_sub(1)
    }

    /// Move to the next step.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::StepOverflow`] if the counter would overflow.
    pub const fn advance(&mut self) -> Result<u64, ClockError> {
        match self.step.checked_add(1) {
            Some(next) => {
                self.step = next;
                Ok(next)
            }
            None => Err(ClockError::StepOverflow),
        }
    }
}
