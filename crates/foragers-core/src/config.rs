//! Configuration loading and typed config structures for the foragers
//! simulation.
//!
//! The canonical configuration lives in `foragers-config.yaml` in the
//! working directory. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads and validates the
//! file. Every field has a default, so an empty document (or no file at all)
//! yields the standard 100-agent, 1000-day run.

use std::path::{Path, PathBuf};

use foragers_agents::BehaviorConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `foragers-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed and world generation parameters.
    #[serde(default)]
    pub world: WorldConfig,

    /// Day length and run length.
    #[serde(default)]
    pub time: TimeConfig,

    /// Agent perception, decisions, metabolism and inheritance.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Checkpoint output and resume.
    #[serde(default)]
    pub checkpoint: CheckpointConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        let world = &self.world;
        if world.shelter_capacity_min > world.shelter_capacity_max {
            return invalid(format!(
                "world.shelter_capacity_min ({}) exceeds world.shelter_capacity_max ({})",
                world.shelter_capacity_min, world.shelter_capacity_max
            ));
        }
        if world.shelter_capacity_min == 0 {
            return invalid("world.shelter_capacity_min must be at least 1".to_owned());
        }
        if world.site_calories_min > world.site_calories_max {
            return invalid(format!(
                "world.site_calories_min ({}) exceeds world.site_calories_max ({})",
                world.site_calories_min, world.site_calories_max
            ));
        }
        if world.site_calories_step == 0 {
            return invalid("world.site_calories_step must be at least 1".to_owned());
        }
        if self.time.steps_per_day == 0 {
            return invalid("time.steps_per_day must be at least 1".to_owned());
        }
        if let Err(reason) = self.behavior.validate() {
            return invalid(format!("behavior: {reason}"));
        }
        Ok(())
    }
}

/// Seed and world generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Agents in the founding population.
    #[serde(default = "default_agents")]
    pub agents: u32,

    /// Number of shelters.
    #[serde(default = "default_shelters")]
    pub shelters: u32,

    /// Smallest shelter capacity (inclusive).
    #[serde(default = "default_shelter_capacity_min")]
    pub shelter_capacity_min: u32,

    /// Largest shelter capacity (inclusive).
    #[serde(default = "default_shelter_capacity_max")]
    pub shelter_capacity_max: u32,

    /// Number of resource sites.
    #[serde(default = "default_sites")]
    pub sites: u32,

    /// Smallest daily site stock (inclusive).
    #[serde(default = "default_site_calories_min")]
    pub site_calories_min: u32,

    /// Largest daily site stock (inclusive).
    #[serde(default = "default_site_calories_max")]
    pub site_calories_max: u32,

    /// Granularity of site stocks between min and max.
    #[serde(default = "default_site_calories_step")]
    pub site_calories_step: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            agents: default_agents(),
            shelters: default_shelters(),
            shelter_capacity_min: default_shelter_capacity_min(),
            shelter_capacity_max: default_shelter_capacity_max(),
            sites: default_sites(),
            site_calories_min: default_site_calories_min(),
            site_calories_max: default_site_calories_max(),
            site_calories_step: default_site_calories_step(),
        }
    }
}

/// Day length and run length.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Steps in one simulated day.
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u64,

    /// Days to simulate.
    #[serde(default = "default_days")]
    pub days: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            steps_per_day: default_steps_per_day(),
            days: default_days(),
        }
    }
}

/// Checkpoint output and resume.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckpointConfig {
    /// Directory checkpoint files are written to.
    #[serde(default = "default_checkpoint_directory")]
    pub directory: PathBuf,

    /// Days between checkpoints. Zero disables periodic checkpoints; the
    /// initial checkpoint is always written.
    #[serde(default = "default_days_per_checkpoint")]
    pub days_per_checkpoint: u64,

    /// Checkpoint file to rebuild the world from instead of generating one.
    #[serde(default)]
    pub resume_from: Option<PathBuf>,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            directory: default_checkpoint_directory(),
            days_per_checkpoint: default_days_per_checkpoint(),
            resume_from: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_agents() -> u32 {
    100
}

const fn default_shelters() -> u32 {
    50
}

const fn default_shelter_capacity_min() -> u32 {
    3
}

const fn default_shelter_capacity_max() -> u32 {
    7
}

const fn default_sites() -> u32 {
    150
}

const fn default_site_calories_min() -> u32 {
    400
}

const fn default_site_calories_max() -> u32 {
    800
}

const fn default_site_calories_step() -> u32 {
    50
}

const fn default_steps_per_day() -> u64 {
    500
}

const fn default_days() -> u64 {
    1000
}

fn default_checkpoint_directory() -> PathBuf {
    PathBuf::from("checkpoints")
}

const fn default_days_per_checkpoint() -> u64 {
    25
}

fn default_log_level() -> String {
    "info".to_owned()
}
