//! Resource sites, shelters, and spatial indexing for the foragers simulation.
//!
//! This crate models the passive parts of the world: the food sources agents
//! harvest, the shelters they compete to sleep in, and the grid index used to
//! find what is near an agent.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world operations.
//! - [`resource`] -- [`ResourceSite`] with daily renewing stock.
//! - [`shelter`] -- [`Shelter`] occupancy bookkeeping.
//! - [`spatial`] -- [`SpatialIndex`], a uniform grid for neighbour queries.

pub mod error;
pub mod resource;
pub mod shelter;
pub mod spatial;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use resource::ResourceSite;
pub use shelter::Shelter;
pub use spatial::SpatialIndex;
