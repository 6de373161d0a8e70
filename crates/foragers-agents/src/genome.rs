//! Heritable genes and the metabolic cost they imply.
//!
//! A [`Genome`] is fixed for an agent's whole life. It can only be built
//! through [`Genome::new`], which rejects out-of-range values, so every
//! genome in the simulation is known to be well bounded.

use rand::Rng;

use crate::config::BehaviorConfig;
use crate::error::AgentError;

/// Inclusive range of the aggressiveness gene.
pub const AGGRESSIVENESS_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Inclusive range of the harvest fraction gene.
pub const HARVEST_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Inclusive range of the memory capacity gene.
pub const MEMORY_BOUNDS: (u32, u32) = (0, 20);

/// The three genes every agent carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genome {
    aggressiveness: f64,
    harvest_percent: f64,
    max_memory: u32,
}

impl Genome {
    /// Build a genome, validating every gene against its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidGenome`] naming the first gene that is
    /// out of range. NaN is always out of range.
    pub fn new(
        aggressiveness: f64,
        harvest_percent: f64,
        max_memory: u32,
    ) -> Result<Self, AgentError> {
        check_unit("aggressiveness", aggressiveness, AGGRESSIVENESS_BOUNDS)?;
        check_unit("harvest_percent", harvest_percent, HARVEST_BOUNDS)?;
        if !(MEMORY_BOUNDS.0..=MEMORY_BOUNDS.1).contains(&max_memory) {
            return Err(AgentError::InvalidGenome {
                gene: "max_memory",
                value: f64::from(max_memory),
                min: f64::from(MEMORY_BOUNDS.0),
                max: f64::from(MEMORY_BOUNDS.1),
            });
        }
        Ok(Self {
            aggressiveness,
            harvest_percent,
            max_memory,
        })
    }

    /// A genome for the founding population: aggressiveness and harvest
    /// fraction uniform in `[0, 1)`, memory capacity uniform over its range.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            aggressiveness: rng.random::<f64>(),
            harvest_percent: rng.random::<f64>(),
            max_memory: rng.random_range(MEMORY_BOUNDS.0..=MEMORY_BOUNDS.1),
        }
    }

    /// Probability weight of acting aggressively.
    pub const fn aggressiveness(&self) -> f64 {
        self.aggressiveness
    }

    /// Fraction of a site's daily stock taken per harvest.
    pub const fn harvest_percent(&self) -> f64 {
        self.harvest_percent
    }

    /// Number of entities the agent can remember.
    pub const fn max_memory(&self) -> u32 {
        self.max_memory
    }

    /// Daily calories these genes cost to maintain.
    pub fn base_expenditure(&self, config: &BehaviorConfig) -> f64 {
        self.aggressiveness.mul_add(
            config.max_aggression_calories,
            self.harvest_percent.mul_add(
                config.max_harvest_calories,
                f64::from(self.max_memory) * config.calories_per_memory,
            ),
        )
    }
}

fn check_unit(gene: &'static str, value: f64, bounds: (f64, f64)) -> Result<(), AgentError> {
    if (bounds.0..=bounds.1).contains(&value) {
        Ok(())
    } else {
        Err(AgentError::InvalidGenome {
            gene,
            value,
            min: bounds.0,
            max: bounds.1,
        })
    }
}
