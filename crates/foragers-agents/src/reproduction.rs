//! Sexual reproduction with crossover and mutation.
//!
//! A child's genes are the mean of its parents' genes plus uniform noise,
//! clamped back into bounds. The memory capacity is additionally rounded and
//! nudged by a small integer step. The child inherits a random sample of
//! its parents' combined memories, as many as its own capacity allows.

use foragers_types::{AgentId, EntityRef, MemoryTag};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::agent::Agent;
use crate::config::BehaviorConfig;
use crate::error::AgentError;
use crate::genome::{AGGRESSIVENESS_BOUNDS, Genome, HARVEST_BOUNDS, MEMORY_BOUNDS};

// ---------------------------------------------------------------------------
// Gene blending
// ---------------------------------------------------------------------------

/// Uniform noise in `[-half_width, +half_width]`.
fn noise(half_width: f64, rng: &mut impl Rng) -> f64 {
    rng.random::<f64>().mul_add(2.0, -1.0) * half_width
}

/// Mean of two unit-range genes plus noise, clamped into `bounds`.
fn blend_trait(a: f64, b: f64, half_width: f64, bounds: (f64, f64), rng: &mut impl Rng) -> f64 {
    let blended = f64::midpoint(a, b) + noise(half_width, rng);
    blended.clamp(bounds.0, bounds.1)
}

/// Mean of two memory capacities plus noise, rounded, nudged by an integer
/// step in `[-perturbation, perturbation]`, then clamped into bounds.
fn blend_memory(a: u32, b: u32, config: &BehaviorConfig, rng: &mut impl Rng) -> u32 {
    let blended = f64::midpoint(f64::from(a), f64::from(b)) + noise(config.memory_mutation, rng);
    #[allow(clippy::cast_possible_truncation)]
    let rounded = blended.round() as i64;
    let step = i64::from(config.memory_perturbation);
    let nudged = rounded.saturating_add(rng.random_range(-step..=step));
    let clamped = nudged.clamp(i64::from(MEMORY_BOUNDS.0), i64::from(MEMORY_BOUNDS.1));
    u32::try_from(clamped).unwrap_or(MEMORY_BOUNDS.0)
}

// ---------------------------------------------------------------------------
// Child construction
// ---------------------------------------------------------------------------

/// Produce a child of `parent_a` and `parent_b`.
///
/// The child starts at `parent_a`'s position with zero calories and fresh
/// daily state.
///
/// # Errors
///
/// Returns [`AgentError::InvalidGenome`] if the blended genes fail
/// validation, which clamping rules out in practice.
pub fn from_parents(
    id: AgentId,
    parent_a: &Agent,
    parent_b: &Agent,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> Result<Agent, AgentError> {
    let (ga, gb) = (parent_a.genome(), parent_b.genome());
    let genome = Genome::new(
        blend_trait(
            ga.aggressiveness(),
            gb.aggressiveness(),
            config.aggressiveness_mutation,
            AGGRESSIVENESS_BOUNDS,
            rng,
        ),
        blend_trait(
            ga.harvest_percent(),
            gb.harvest_percent(),
            config.harvest_mutation,
            HARVEST_BOUNDS,
            rng,
        ),
        blend_memory(ga.max_memory(), gb.max_memory(), config, rng),
    )?;

    let mut child = Agent::new(id, parent_a.pos, genome, config);

    let mut inherited: Vec<(EntityRef, MemoryTag)> = parent_a
        .memory
        .entries()
        .chain(parent_b.memory.entries())
        .collect();
    inherited.shuffle(rng);
    let keep = child.memory.capacity().min(inherited.len());
    for (key, tag) in inherited.into_iter().take(keep) {
        child.memory.insert(key, tag);
    }

    Ok(child)
}
