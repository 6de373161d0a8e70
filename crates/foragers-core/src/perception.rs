//! Per-agent perception assembly from the spatial indexes.
//!
//! Both indexes are queried around the agent's position. Each candidate is
//! resolved to its current position and sorted into the view and interact
//! sets by exact distance. The agent never perceives itself.

use foragers_agents::{BehaviorConfig, EntityLocator};
use foragers_types::{AgentId, EntityRef, Perception, Position};
use foragers_world::SpatialIndex;

/// Build the perception of agent `subject` standing at `pos`.
pub fn assemble(
    subject: AgentId,
    pos: Position,
    places: &SpatialIndex<EntityRef>,
    agents: &SpatialIndex<AgentId>,
    locator: &impl EntityLocator,
    config: &BehaviorConfig,
) -> Perception {
    let mut perception = Perception::new();
    let nearby_agents = agents
        .candidates(pos)
        .into_iter()
        .filter(|id| *id != subject)
        .map(EntityRef::Agent);
    for entity in places.candidates(pos).into_iter().chain(nearby_agents) {
        if let Some(other) = locator.position_of(entity) {
            perception.observe(
                entity,
                pos.distance_to(other),
                config.vision_radius,
                config.interaction_radius,
            );
        }
    }
    perception
}
