//! Agent genes, memory, decisions, and interactions for the foragers
//! simulation.
//!
//! This crate contains the logic layer for agents -- everything that operates
//! on agent state without owning the world. It sits between
//! `foragers-world` (sites, shelters, indexing) and `foragers-core` (the
//! world arena and step loop).
//!
//! # Modules
//!
//! - [`agent`] -- Runtime state and the survival rule ([`Agent`])
//! - [`config`] -- Tunable behaviour parameters ([`BehaviorConfig`])
//! - [`decision`] -- The Wander / `GoTo` / Sleep state machine
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`genome`] -- Bounded genes and their calorie cost ([`Genome`])
//! - [`interaction`] -- Harvesting, shelter contention, share or steal
//! - [`memory`] -- Bounded FIFO memory ([`Memory`])
//! - [`reproduction`] -- Crossover and mutation

pub mod agent;
pub mod config;
pub mod decision;
pub mod error;
pub mod genome;
pub mod interaction;
pub mod memory;
pub mod reproduction;

// Re-export primary types at crate root for convenience.
pub use agent::Agent;
pub use config::BehaviorConfig;
pub use decision::{EntityLocator, act, day_phase};
pub use error::AgentError;
pub use genome::{AGGRESSIVENESS_BOUNDS, Genome, HARVEST_BOUNDS, MEMORY_BOUNDS};
pub use interaction::{PeerOutcome, ShelterOutcome, enter_shelter, harvest, share_or_steal};
pub use memory::Memory;
pub use reproduction::from_parents;
