//! Plain serializable records for checkpointing world state.
//!
//! Records carry only what is needed to rebuild an entity: position plus its
//! fixed parameters. Runtime state (calories, memory, occupancy) is not part
//! of a record and starts fresh when a world is rebuilt.

use serde::{Deserialize, Serialize};

/// Persisted form of a shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Maximum number of occupants.
    pub max_capacity: u32,
}

/// Persisted form of a resource site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Daily calorie stock.
    pub max_calories: u32,
}

/// Persisted form of an agent: position and genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Aggressiveness gene.
    pub aggressiveness: f64,
    /// Harvest fraction gene.
    pub harvest_percent: f64,
    /// Memory capacity gene.
    pub max_memory: u32,
}

/// A full world checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    /// All shelters.
    pub shelters: Vec<ShelterRecord>,
    /// All resource sites.
    pub resource_sites: Vec<SiteRecord>,
    /// All living agents.
    pub agents: Vec<AgentRecord>,
}
