//! Error types for the simulation binary.
//!
//! [`EngineError`] is the top-level error type that wraps every failure
//! mode during startup, the run loop, and checkpoint I/O.

use std::path::PathBuf;

/// Top-level error for the simulation binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: foragers_core::config::ConfigError,
    },

    /// World construction failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: foragers_core::SimulationError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: foragers_core::runner::RunnerError,
    },

    /// A checkpoint file could not be read or written.
    #[error("checkpoint I/O failed for {}: {source}", path.display())]
    CheckpointIo {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A checkpoint file held malformed JSON, or a record failed to encode.
    #[error("checkpoint JSON error for {}: {source}", path.display())]
    CheckpointJson {
        /// The file involved.
        path: PathBuf,
        /// The underlying serde error.
        source: serde_json::Error,
    },
}
