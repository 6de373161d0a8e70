//! Perception payload handed to an agent each step.
//!
//! The world assembles one [`Perception`] per agent per step from the spatial
//! indexes: everything within vision radius goes into `view`, and the subset
//! within interaction radius also goes into `interact`. The acting agent is
//! never part of its own perception.

use std::collections::BTreeSet;

use crate::enums::EntityRef;

/// What an agent can see and reach on a given step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Perception {
    /// Entities strictly within vision radius.
    pub view: BTreeSet<EntityRef>,
    /// Entities strictly within interaction radius. Always a subset of `view`
    /// when the interaction radius does not exceed the vision radius.
    pub interact: BTreeSet<EntityRef>,
}

impl Perception {
    /// An empty perception.
    pub const fn new() -> Self {
        Self {
            view: BTreeSet::new(),
            interact: BTreeSet::new(),
        }
    }

    /// Record an entity at `distance`, sorting it into the right sets.
    pub fn observe(
        &mut self,
        entity: EntityRef,
        distance: f64,
        vision_radius: f64,
        interaction_radius: f64,
    ) {
        if distance < vision_radius {
            self.view.insert(entity);
        }
        if distance < interaction_radius {
            self.interact.insert(entity);
        }
    }

    /// Whether `entity` is close enough to interact with.
    pub fn can_reach(&self, entity: EntityRef) -> bool {
        self.interact.contains(&entity)
    }
}
