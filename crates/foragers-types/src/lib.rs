//! Shared type definitions for the foragers simulation.
//!
//! This crate is the single source of truth for the small vocabulary every
//! other crate speaks: map coordinates, entity handles, state enums and the
//! checkpoint records.
//!
//! # Modules
//!
//! - [`ids`] -- Typed integer handles and the per-world [`IdSequence`]
//! - [`position`] -- Clamped map coordinates and movement primitives
//! - [`enums`] -- [`EntityRef`], action states, memory tags, day phases
//! - [`entity`] -- The [`Entity`] capability trait
//! - [`perception`] -- Per-step view and interaction sets
//! - [`records`] -- Serializable checkpoint records

pub mod entity;
pub mod enums;
pub mod ids;
pub mod perception;
pub mod position;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use entity::Entity;
pub use enums::{ActionState, DayPhase, EntityKind, EntityRef, MemoryTag};
pub use ids::{AgentId, IdSequence, ShelterId, SiteId};
pub use perception::Perception;
pub use position::{DISTANCE_PER_STEP, MAP_SIZE, Position};
pub use records::{AgentRecord, ShelterRecord, SiteRecord, WorldRecord};
