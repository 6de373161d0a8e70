//! Error types for the `foragers-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use foragers_types::{AgentId, ShelterId};

/// Errors that can occur while manipulating world entities.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The shelter has no free slot for another occupant.
    #[error("shelter {shelter} is at capacity ({capacity})")]
    ShelterFull {
        /// The full shelter.
        shelter: ShelterId,
        /// Maximum capacity.
        capacity: u32,
    },

    /// The agent is not sleeping in the specified shelter.
    #[error("agent {agent} is not an occupant of shelter {shelter}")]
    NotAnOccupant {
        /// The agent.
        agent: AgentId,
        /// The shelter.
        shelter: ShelterId,
    },

    /// A spatial index was built with a non-positive or non-finite cell size.
    #[error("invalid spatial index cell size: {0}")]
    InvalidCellSize(f64),
}
