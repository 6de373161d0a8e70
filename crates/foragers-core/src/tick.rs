//! The step loop and the day boundary.
//!
//! A step gives every living agent one turn, in ascending id order:
//!
//! 1. **Perceive** -- query both spatial indexes around the agent.
//! 2. **Decide** -- run the decision state machine.
//! 3. **Interact** -- if the goal is within reach, dispatch on its kind.
//! 4. **Relocate** -- update the agent's cell in the agent index.
//!
//! On the last step of a day the boundary runs: agents that failed their
//! caloric target are removed, shelters with two or more survivors breed
//! until full, and every entity is reset. Shelters are emptied by that reset
//! even of the children just admitted, so every newborn starts the next day
//! wandering.

use foragers_agents::{
    Agent, ShelterOutcome, decision, enter_shelter, from_parents, harvest, share_or_steal,
};
use foragers_types::{AgentId, Entity, EntityRef};
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::error::SimulationError;
use crate::perception;
use crate::world::{Arena, World};

/// What happened at a day boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    /// Number of the day that just ended, counting from 1.
    pub day: u64,
    /// Agents removed for failing the survival check.
    pub deaths: usize,
    /// Children born in shelters.
    pub births: usize,
    /// Living agents after births.
    pub population: usize,
    /// Mean aggressiveness of the population after births.
    pub mean_aggressiveness: f64,
    /// Mean harvest fraction of the population after births.
    pub mean_harvest_percent: f64,
    /// Mean memory capacity of the population after births.
    pub mean_max_memory: f64,
}

impl World {
    /// Run one step. Returns the day summary when the step closed a day.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if an interaction or birth hits an
    /// inconsistent world, or the clock overflows.
    pub fn step(&mut self) -> Result<Option<DaySummary>, SimulationError> {
        let step_in_day = self.clock.step_in_day();
        let steps_per_day = self.clock.steps_per_day();

        self.index_agents();

        let roster: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in roster {
            let Some(mut agent) = self.agents.remove(&id) else {
                continue;
            };
            let result = self.take_turn(&mut agent, step_in_day, steps_per_day);
            self.agent_index.insert(id, agent.pos);
            self.agents.insert(id, agent);
            result.map_err(|source| SimulationError::Agent {
                agent_id: id,
                source,
            })?;
        }

        let summary = if self.clock.is_day_end() {
            Some(self.end_day()?)
        } else {
            None
        };
        self.clock.advance()?;
        Ok(summary)
    }

    /// Run steps until the current day ends.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`World::step`].
    pub fn run_day(&mut self) -> Result<DaySummary, SimulationError> {
        loop {
            if let Some(summary) = self.step()? {
                return Ok(summary);
            }
        }
    }

    /// One agent's turn. The agent has been taken out of the roster.
    fn take_turn(
        &mut self,
        agent: &mut Agent,
        step_in_day: u64,
        steps_per_day: u64,
    ) -> Result<(), foragers_agents::AgentError> {
        let arena = Arena {
            agents: &self.agents,
            shelters: &self.shelters,
            sites: &self.sites,
        };
        let seen = perception::assemble(
            agent.id(),
            agent.pos,
            &self.places,
            &self.agent_index,
            &arena,
            &self.config.behavior,
        );
        let target = decision::act(
            agent,
            &seen,
            step_in_day,
            steps_per_day,
            &arena,
            &self.config.behavior,
            &mut self.rng,
        );
        let Some(target) = target else {
            return Ok(());
        };

        let behavior = &self.config.behavior;
        match target {
            EntityRef::Site(id) => {
                if let Some(site) = self.sites.get_mut(&id) {
                    let _ = harvest(agent, site, behavior, &mut self.rng);
                }
            }
            EntityRef::Shelter(id) => {
                if let Some(shelter) = self.shelters.get_mut(&id) {
                    enter_shelter(shelter, agent, &mut self.agents, behavior, &mut self.rng)?;
                }
            }
            EntityRef::Agent(id) => {
                if let Some(peer) = self.agents.get_mut(&id) {
                    let outcome = share_or_steal(agent, peer, behavior, &mut self.rng);
                    debug!(agent = %agent.id(), peer = %id, ?outcome, "Agents met");
                }
            }
        }
        agent.finish_interaction();
        Ok(())
    }

    /// Close the current day: purge, breed, reset.
    ///
    /// Called by [`World::step`] on the last step of each day.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Agent`] if a birth fails.
    pub fn end_day(&mut self) -> Result<DaySummary, SimulationError> {
        let before = self.agents.len();
        self.agents.retain(|_, agent| agent.survived());
        let deaths = before.saturating_sub(self.agents.len());

        let living = &self.agents;
        for shelter in self.shelters.values_mut() {
            shelter.retain_occupants(|id| living.contains_key(&id));
        }

        let births = self.breed()?;

        for shelter in self.shelters.values_mut() {
            shelter.reset();
        }
        for site in self.sites.values_mut() {
            site.reset();
        }
        for agent in self.agents.values_mut() {
            agent.reset();
        }

        self.index_agents();
        let summary = self.summarize(deaths, births);
        info!(
            day = summary.day,
            deaths = summary.deaths,
            births = summary.births,
            population = summary.population,
            mean_aggressiveness = summary.mean_aggressiveness,
            mean_harvest_percent = summary.mean_harvest_percent,
            mean_max_memory = summary.mean_max_memory,
            "Day complete"
        );
        Ok(summary)
    }

    /// Fill every shelter holding two or more survivors with their children.
    fn breed(&mut self) -> Result<usize, SimulationError> {
        let mut births: usize = 0;
        let behavior = &self.config.behavior;
        for shelter in self.shelters.values_mut() {
            if shelter.occupancy() < 2 {
                continue;
            }
            let occupants: Vec<AgentId> = shelter.occupants().iter().copied().collect();
            let pairs: Vec<(AgentId, AgentId)> = occupants
                .iter()
                .enumerate()
                .flat_map(|(i, a)| occupants.iter().skip(i.saturating_add(1)).map(|b| (*a, *b)))
                .collect();

            while !shelter.is_full() {
                let Some(&(a, b)) = pairs.choose(&mut self.rng) else {
                    break;
                };
                let (Some(parent_a), Some(parent_b)) = (self.agents.get(&a), self.agents.get(&b))
                else {
                    break;
                };
                let child_id = self.ids.next_agent();
                let mut child = from_parents(child_id, parent_a, parent_b, behavior, &mut self.rng)
                    .map_err(|source| SimulationError::Agent {
                        agent_id: child_id,
                        source,
                    })?;
                let outcome =
                    enter_shelter(shelter, &mut child, &mut self.agents, behavior, &mut self.rng)
                        .map_err(|source| SimulationError::Agent {
                            agent_id: child_id,
                            source,
                        })?;
                debug!(
                    child = %child_id,
                    parent_a = %a,
                    parent_b = %b,
                    shelter = %shelter.id(),
                    "Child born"
                );
                self.agents.insert(child_id, child);
                births = births.saturating_add(1);
                if outcome != ShelterOutcome::Admitted {
                    break;
                }
            }
        }
        Ok(births)
    }

    fn summarize(&self, deaths: usize, births: usize) -> DaySummary {
        let population = self.agents.len();
        #[allow(clippy::cast_precision_loss)]
        let count = population.max(1) as f64;
        let (aggr, harvest, memory) =
            self.agents
                .values()
                .fold((0.0, 0.0, 0.0), |(aggr, harvest, memory), agent| {
                    let genome = agent.genome();
                    (
                        aggr + genome.aggressiveness(),
                        harvest + genome.harvest_percent(),
                        memory + f64::from(genome.max_memory()),
                    )
                });
        DaySummary {
            day: self.clock.day().saturating_add(1),
            deaths,
            births,
            population,
            mean_aggressiveness: aggr / count,
            mean_harvest_percent: harvest / count,
            mean_max_memory: memory / count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foragers_types::{ActionState, ShelterId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::SimulationConfig;

    fn small_world(seed: u64) -> World {
        let mut config = SimulationConfig::default();
        config.world.agents = 30;
        config.world.shelters = 10;
        config.world.sites = 30;
        config.time.steps_per_day = 40;
        World::generate(config, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn put_to_sleep(world: &mut World, id: AgentId, shelter: ShelterId, calories: f64) {
        let agent = world.agent_mut(id).unwrap();
        agent.calories = calories;
        agent.action_state = ActionState::Sleep;
        world.shelter_mut(shelter).unwrap().admit(id).unwrap();
    }

    #[test]
    fn step_advances_clock() {
        let mut world = small_world(1);
        world.step().unwrap();
        assert_eq!(world.clock().step(), 1);
    }

    #[test]
    fn day_summary_only_on_last_step() {
        let mut world = small_world(2);
        for _ in 0..39 {
            assert!(world.step().unwrap().is_none());
        }
        let summary = world.step().unwrap().unwrap();
        assert_eq!(summary.day, 1);
        assert_eq!(world.clock().step(), 40);
    }

    #[test]
    fn everyone_outside_a_shelter_dies() {
        let mut world = small_world(3);
        let summary = world.end_day().unwrap();
        assert_eq!(summary.deaths, 30);
        assert_eq!(summary.population, 0);
    }

    #[test]
    fn sheltered_pair_breeds_until_full_then_shelters_empty() {
        let mut world = small_world(4);
        let shelter_id = *world.shelters().keys().next().unwrap();
        let capacity = world.shelters().get(&shelter_id).unwrap().max_capacity();
        put_to_sleep(&mut world, AgentId(0), shelter_id, 10_000.0);
        put_to_sleep(&mut world, AgentId(1), shelter_id, 10_000.0);

        let summary = world.end_day().unwrap();
        let expected_births = usize::try_from(capacity).unwrap().saturating_sub(2);
        assert_eq!(summary.births, expected_births);
        assert_eq!(summary.deaths, 28);
        assert_eq!(world.population(), 2 + expected_births);
        assert!(world.shelters().values().all(|s| s.occupancy() == 0));
        assert!(
            world
                .agents()
                .values()
                .all(|a| a.action_state == ActionState::Wander)
        );
    }

    #[test]
    fn survivors_pay_their_expenditure() {
        let mut world = small_world(5);
        let shelter_id = *world.shelters().keys().next().unwrap();
        put_to_sleep(&mut world, AgentId(0), shelter_id, 5_000.0);
        let expected = 5_000.0 - world.agents().get(&AgentId(0)).unwrap().calorie_expenditure();
        world.end_day().unwrap();
        let calories = world.agents().get(&AgentId(0)).unwrap().calories;
        assert!((calories - expected).abs() < 1e-9);
    }

    #[test]
    fn sites_are_restocked_at_day_end() {
        let mut world = small_world(6);
        for _ in 0..40 {
            world.step().unwrap();
        }
        assert!(world.sites().values().all(|s| s.current_calories() == s.max_calories()));
    }
}
