//! Error types for the foragers-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use foragers_types::AgentId;
use foragers_world::WorldError;

/// Errors that can occur during agent construction and interactions.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A gene value lies outside its allowed range.
    #[error("invalid genome: {gene} = {value} is outside [{min}, {max}]")]
    InvalidGenome {
        /// Name of the offending gene.
        gene: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// An agent handle did not resolve to a living agent.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// A shelter operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}
