//! World arena, step loop, and orchestration for the foragers simulation.
//!
//! This crate owns the world and the loop that drives it: every step each
//! agent perceives, decides and interacts; every day ends with a survival
//! check, reproduction in shelters and a reset.
//!
//! # Modules
//!
//! - [`clock`] -- Step counter with day and step-in-day derivation.
//! - [`config`] -- Configuration loading from `foragers-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`SimulationError`] for world construction and stepping.
//! - [`perception`] -- Per-agent perception assembly from the spatial indexes.
//! - [`runner`] -- Day loop with a per-day callback.
//! - [`tick`] -- The step loop and the day boundary.
//! - [`world`] -- The [`World`] arena, generation and checkpoint records.

pub mod clock;
pub mod config;
pub mod error;
pub mod perception;
pub mod runner;
pub mod tick;
pub mod world;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use tick::DaySummary;
pub use world::World;
