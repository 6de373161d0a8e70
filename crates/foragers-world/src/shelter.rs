//! Shelters: capacity-limited sleeping places.
//!
//! A [`Shelter`] only tracks *who* sleeps inside it. Agent state changes on
//! admission or eviction (sleeping, snapping to the shelter position) belong
//! to the contention protocol in `foragers-agents`; this type enforces the
//! one invariant it owns: occupancy never exceeds `max_capacity`.

use std::collections::BTreeSet;

use foragers_types::{AgentId, Entity, EntityRef, Position, ShelterId, ShelterRecord};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::debug;

use crate::error::WorldError;

/// A cave that agents must reach by evening to survive the night.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelter {
    id: ShelterId,
    pos: Position,
    max_capacity: u32,
    occupants: BTreeSet<AgentId>,
}

impl Shelter {
    /// Create an empty shelter.
    pub const fn new(id: ShelterId, pos: Position, max_capacity: u32) -> Self {
        Self {
            id,
            pos,
            max_capacity,
            occupants: BTreeSet::new(),
        }
    }

    /// Identifier.
    pub const fn id(&self) -> ShelterId {
        self.id
    }

    /// Maximum number of occupants.
    pub const fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Agents currently sleeping here, in ascending id order.
    pub const fn occupants(&self) -> &BTreeSet<AgentId> {
        &self.occupants
    }

    /// Number of current occupants.
    pub fn occupancy(&self) -> usize {
        self.occupants.len()
    }

    /// Whether `agent` is sleeping here.
    pub fn contains(&self, agent: AgentId) -> bool {
        self.occupants.contains(&agent)
    }

    /// Whether no further agent can be admitted.
    pub fn is_full(&self) -> bool {
        usize::try_from(self.max_capacity).is_ok_and(|cap| self.occupants.len() >= cap)
    }

    /// Add `agent` to the occupants.
    ///
    /// Admitting an agent that is already inside is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ShelterFull`] if there is no free slot.
    pub fn admit(&mut self, agent: AgentId) -> Result<(), WorldError> {
        if self.occupants.contains(&agent) {
            return Ok(());
        }
        if self.is_full() {
            return Err(WorldError::ShelterFull {
                shelter: self.id,
                capacity: self.max_capacity,
            });
        }
        self.occupants.insert(agent);
        Ok(())
    }

    /// Remove `agent` from the occupants.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotAnOccupant`] if the agent is not inside.
    pub fn evict(&mut self, agent: AgentId) -> Result<(), WorldError> {
        if self.occupants.remove(&agent) {
            debug!(shelter = %self.id, agent = %agent, "Occupant evicted");
            Ok(())
        } else {
            Err(WorldError::NotAnOccupant {
                agent,
                shelter: self.id,
            })
        }
    }

    /// A uniformly random occupant, or `None` when empty.
    pub fn random_occupant(&self, rng: &mut impl Rng) -> Option<AgentId> {
        self.occupants.iter().copied().choose(rng)
    }

    /// Keep only the occupants for which `keep` returns `true`.
    pub fn retain_occupants(&mut self, mut keep: impl FnMut(AgentId) -> bool) {
        self.occupants.retain(|id| keep(*id));
    }

    /// Persisted form of this shelter.
    pub const fn to_record(&self) -> ShelterRecord {
        ShelterRecord {
            x: self.pos.x(),
            y: self.pos.y(),
            max_capacity: self.max_capacity,
        }
    }

    /// Rebuild an empty shelter from its record under a freshly issued id.
    pub fn from_record(id: ShelterId, record: &ShelterRecord) -> Self {
        Self::new(id, Position::new(record.x, record.y), record.max_capacity)
    }
}

impl Entity for Shelter {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Shelter(self.id)
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn reset(&mut self) {
        self.occupants.clear();
    }
}
