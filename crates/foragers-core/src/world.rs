//! The world arena: every entity, the id sequence, the random source and
//! the spatial indexes.
//!
//! Entities live in ordered maps keyed by their typed ids, so iteration
//! order (and with it every random draw) is fixed for a given seed. Goals,
//! memories and shelter occupants refer to entities only through those ids.

use std::collections::BTreeMap;

use foragers_agents::{Agent, EntityLocator, Genome};
use foragers_types::{
    AgentId, Entity, EntityRef, IdSequence, Perception, Position, ShelterId, SiteId, WorldRecord,
};
use foragers_world::{ResourceSite, Shelter, SpatialIndex};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::info;

use crate::clock::WorldClock;
use crate::config::{SimulationConfig, WorldConfig};
use crate::error::SimulationError;
use crate::perception;

/// Complete mutable simulation state.
#[derive(Debug)]
pub struct World {
    pub(crate) config: SimulationConfig,
    pub(crate) ids: IdSequence,
    pub(crate) rng: StdRng,
    pub(crate) clock: WorldClock,
    pub(crate) agents: BTreeMap<AgentId, Agent>,
    pub(crate) shelters: BTreeMap<ShelterId, Shelter>,
    pub(crate) sites: BTreeMap<SiteId, ResourceSite>,
    /// Shelters and sites; built once, never moves.
    pub(crate) places: SpatialIndex<EntityRef>,
    /// Agents; rebuilt at every step and day boundary, updated after each
    /// turn.
    pub(crate) agent_index: SpatialIndex<AgentId>,
}

impl World {
    /// Generate a fresh random world from the `world` section of `config`.
    ///
    /// Shelters come first, then resource sites, then agents, each at a
    /// uniformly random position.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration is invalid.
    pub fn generate(config: SimulationConfig, rng: StdRng) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut world = Self::empty(config, rng)?;
        let params = world.config.world.clone();

        for _ in 0..params.shelters {
            let pos = Position::random(&mut world.rng);
            let capacity = world
                .rng
                .random_range(params.shelter_capacity_min..=params.shelter_capacity_max);
            let id = world.ids.next_shelter();
            world.shelters.insert(id, Shelter::new(id, pos, capacity));
        }
        for _ in 0..params.sites {
            let pos = Position::random(&mut world.rng);
            let calories = random_site_stock(&params, &mut world.rng);
            let id = world.ids.next_site();
            world.sites.insert(id, ResourceSite::new(id, pos, calories));
        }
        for _ in 0..params.agents {
            let pos = Position::random(&mut world.rng);
            let genome = Genome::random(&mut world.rng);
            let id = world.ids.next_agent();
            world
                .agents
                .insert(id, Agent::new(id, pos, genome, &world.config.behavior));
        }

        world.index_places();
        world.index_agents();
        info!(
            shelters = world.shelters.len(),
            sites = world.sites.len(),
            agents = world.agents.len(),
            "World generated"
        );
        Ok(world)
    }

    /// Rebuild a world from a checkpoint record.
    ///
    /// Entities get fresh ids in record order. Agents start with empty
    /// memory and fresh daily state.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if the configuration is invalid,
    /// or [`SimulationError::AgentSetup`] if a record holds an invalid
    /// genome.
    pub fn from_record(
        record: &WorldRecord,
        config: SimulationConfig,
        rng: StdRng,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut world = Self::empty(config, rng)?;
        for shelter in &record.shelters {
            let id = world.ids.next_shelter();
            world.shelters.insert(id, Shelter::from_record(id, shelter));
        }
        for site in &record.resource_sites {
            let id = world.ids.next_site();
            world.sites.insert(id, ResourceSite::from_record(id, site));
        }
        for agent in &record.agents {
            let id = world.ids.next_agent();
            let agent = Agent::from_record(id, agent, &world.config.behavior)?;
            world.agents.insert(id, agent);
        }
        world.index_places();
        world.index_agents();
        info!(
            shelters = world.shelters.len(),
            sites = world.sites.len(),
            agents = world.agents.len(),
            "World restored from record"
        );
        Ok(world)
    }

    fn empty(config: SimulationConfig, rng: StdRng) -> Result<Self, SimulationError> {
        let clock = WorldClock::new(&config.time)?;
        let places = SpatialIndex::new(config.behavior.vision_radius)?;
        let agent_index = SpatialIndex::new(config.behavior.vision_radius)?;
        Ok(Self {
            config,
            ids: IdSequence::new(),
            rng,
            clock,
            agents: BTreeMap::new(),
            shelters: BTreeMap::new(),
            sites: BTreeMap::new(),
            places,
            agent_index,
        })
    }

    fn index_places(&mut self) {
        self.places.clear();
        for shelter in self.shelters.values() {
            self.places.insert(shelter.entity_ref(), shelter.position());
        }
        for site in self.sites.values() {
            self.places.insert(site.entity_ref(), site.position());
        }
    }

    pub(crate) fn index_agents(&mut self) {
        self.agent_index.clear();
        for agent in self.agents.values() {
            self.agent_index.insert(agent.id(), agent.pos);
        }
    }

    /// What agent `id` perceives from where it stands, using the live
    /// spatial indexes. `None` if the agent does not exist.
    pub fn perceive(&self, id: AgentId) -> Option<Perception> {
        let agent = self.agents.get(&id)?;
        Some(perception::assemble(
            id,
            agent.pos,
            &self.places,
            &self.agent_index,
            self,
            &self.config.behavior,
        ))
    }

    /// Plain record of every entity, in id order. Memory is not included.
    pub fn snapshot(&self) -> WorldRecord {
        WorldRecord {
            shelters: self.shelters.values().map(Shelter::to_record).collect(),
            resource_sites: self.sites.values().map(ResourceSite::to_record).collect(),
            agents: self.agents.values().map(Agent::to_record).collect(),
        }
    }

    /// Configuration the world runs under.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The simulation clock.
    pub const fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Living agents by id.
    pub const fn agents(&self) -> &BTreeMap<AgentId, Agent> {
        &self.agents
    }

    /// Shelters by id.
    pub const fn shelters(&self) -> &BTreeMap<ShelterId, Shelter> {
        &self.shelters
    }

    /// Resource sites by id.
    pub const fn sites(&self) -> &BTreeMap<SiteId, ResourceSite> {
        &self.sites
    }

    /// Number of living agents.
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Mutable access to one agent.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Mutable access to one shelter.
    pub fn shelter_mut(&mut self, id: ShelterId) -> Option<&mut Shelter> {
        self.shelters.get_mut(&id)
    }
}

impl EntityLocator for World {
    fn position_of(&self, entity: EntityRef) -> Option<Position> {
        Arena {
            agents: &self.agents,
            shelters: &self.shelters,
            sites: &self.sites,
        }
        .position_of(entity)
    }
}

/// Borrowed view over the entity maps, usable while other world fields are
/// mutably borrowed.
pub(crate) struct Arena<'a> {
    pub(crate) agents: &'a BTreeMap<AgentId, Agent>,
    pub(crate) shelters: &'a BTreeMap<ShelterId, Shelter>,
    pub(crate) sites: &'a BTreeMap<SiteId, ResourceSite>,
}

impl EntityLocator for Arena<'_> {
    fn position_of(&self, entity: EntityRef) -> Option<Position> {
        match entity {
            EntityRef::Site(id) => self.sites.get(&id).map(Entity::position),
            EntityRef::Shelter(id) => self.shelters.get(&id).map(Entity::position),
            EntityRef::Agent(id) => self.agents.get(&id).map(Entity::position),
        }
    }
}

/// A site stock drawn uniformly from `min, min + step, ..., <= max`.
fn random_site_stock(params: &WorldConfig, rng: &mut impl Rng) -> u32 {
    let span = params
        .site_calories_max
        .saturating_sub(params.site_calories_min);
    let steps = span.checked_div(params.site_calories_step).unwrap_or(0);
    let chosen = rng.random_range(0..=steps);
    params
        .site_calories_min
        .saturating_add(chosen.saturating_mul(params.site_calories_step))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.agents = 10;
        config.world.shelters = 5;
        config.world.sites = 8;
        config
    }

    #[test]
    fn generate_honours_counts_and_ranges() {
        let world = World::generate(small_config(), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(world.population(), 10);
        assert_eq!(world.shelters().len(), 5);
        assert_eq!(world.sites().len(), 8);
        for shelter in world.shelters().values() {
            assert!((3..=7).contains(&shelter.max_capacity()));
        }
        for site in world.sites().values() {
            assert!((400..=800).contains(&site.max_calories()));
            assert_eq!(site.max_calories() % 50, 0);
        }
    }

    #[test]
    fn site_stock_covers_both_ends() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = WorldConfig::default();
        let draws: Vec<u32> = (0..2000).map(|_| random_site_stock(&params, &mut rng)).collect();
        assert!(draws.contains(&400));
        assert!(draws.contains(&800));
        assert!(draws.iter().all(|c| (400..=800).contains(c) && c % 50 == 0));
    }

    #[test]
    fn snapshot_round_trip_reproduces_entities() {
        let world = World::generate(small_config(), StdRng::seed_from_u64(2)).unwrap();
        let record = world.snapshot();
        let rebuilt =
            World::from_record(&record, small_config(), StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(rebuilt.snapshot(), record);
    }

    #[test]
    fn invalid_genome_in_record_is_rejected() {
        let mut record = WorldRecord::default();
        record.agents.push(foragers_types::AgentRecord {
            x: 1.0,
            y: 1.0,
            aggressiveness: 0.5,
            harvest_percent: 0.5,
            max_memory: 99,
        });
        let result = World::from_record(&record, small_config(), StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(SimulationError::AgentSetup { .. })));
    }

    #[test]
    fn locator_resolves_every_kind() {
        let world = World::generate(small_config(), StdRng::seed_from_u64(4)).unwrap();
        assert!(world.position_of(EntityRef::Agent(AgentId(0))).is_some());
        assert!(world.position_of(EntityRef::Shelter(ShelterId(4))).is_some());
        assert!(world.position_of(EntityRef::Site(SiteId(7))).is_some());
        assert!(world.position_of(EntityRef::Agent(AgentId(10))).is_none());
    }
}
