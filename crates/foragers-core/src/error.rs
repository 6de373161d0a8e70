//! Error types for world construction and the step loop.

use foragers_agents::AgentError;
use foragers_types::AgentId;
use foragers_world::WorldError;

use crate::clock::ClockError;
use crate::config::ConfigError;

/// Errors that can occur while building or stepping a world.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration is unusable.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An agent could not be built outside of any turn (generation, record
    /// loading).
    #[error("agent error: {source}")]
    AgentSetup {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// An agent's turn or birth failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent that caused the error.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },
}
