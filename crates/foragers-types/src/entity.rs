//! The capability set shared by every simulated entity.

use crate::enums::EntityRef;
use crate::position::Position;

/// Something that lives on the map and takes part in the day cycle.
///
/// Resource sites, shelters and agents all implement this trait. The world
/// uses it for perception (identity and position) and for the day boundary
/// (reset).
pub trait Entity {
    /// Tagged handle identifying this entity.
    fn entity_ref(&self) -> EntityRef;

    /// Current position on the map.
    fn position(&self) -> Position;

    /// Prepare for the next day. Called once per entity at every day boundary.
    fn reset(&mut self);
}
