//! The per-agent decision state machine.
//!
//! Every step the world hands each agent its [`Perception`] and calls
//! [`act`]. The agent either walks (toward a wander spot or a goal), picks a
//! new goal, or reports that its goal is within reach. Interactions
//! themselves are carried out by the caller, which owns the other entities;
//! see [`crate::interaction`].
//!
//! | State  | Behaviour                                                    |
//! |--------|--------------------------------------------------------------|
//! | Wander | Walk to a random nearby spot, then pick a phase-valid goal   |
//! | GoTo   | Walk to the goal; report it once it is within reach          |
//! | Sleep  | Nothing until the next day                                   |

use std::collections::BTreeSet;

use foragers_types::{ActionState, DayPhase, EntityRef, Perception, Position};
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::agent::Agent;
use crate::config::BehaviorConfig;

/// Resolves entity handles to their current positions.
///
/// Implemented by the world arena. Returns `None` for entities that no
/// longer exist, such as a remembered agent that has died.
pub trait EntityLocator {
    /// Current position of `entity`, if it still exists.
    fn position_of(&self, entity: EntityRef) -> Option<Position>;
}

/// Which part of the day `step_in_day` falls in.
pub fn day_phase(step_in_day: u64, steps_per_day: u64, config: &BehaviorConfig) -> DayPhase {
    #[allow(clippy::cast_precision_loss)]
    let (step, day) = (step_in_day as f64, steps_per_day as f64);
    if step < day * config.morning_fraction {
        DayPhase::Morning
    } else if step > day * (1.0 - config.evening_fraction) {
        DayPhase::Evening
    } else {
        DayPhase::Midday
    }
}

/// Advance `agent` by one step.
///
/// Returns the goal when the agent is in [`ActionState::GoTo`] and the goal
/// is within interaction range. The caller must then perform the interaction
/// and call [`Agent::finish_interaction`]. Returns `None` otherwise.
pub fn act(
    agent: &mut Agent,
    perception: &Perception,
    step_in_day: u64,
    steps_per_day: u64,
    locator: &impl EntityLocator,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> Option<EntityRef> {
    if agent.action_state == ActionState::Sleep {
        return None;
    }

    let possible_goals = possible_goals(agent, perception, locator, config, rng);

    match agent.action_state {
        ActionState::GoTo => go_to(agent, perception, locator, config),
        ActionState::Wander => {
            let phase = day_phase(step_in_day, steps_per_day, config);
            wander(agent, &possible_goals, phase, config, rng);
            None
        }
        ActionState::Sleep => None,
    }
}

/// Everything the agent could pick as its next goal: what it sees, plus,
/// occasionally, what it remembers. Entities already handled today and
/// remembered entities that no longer exist are excluded.
fn possible_goals(
    agent: &Agent,
    perception: &Perception,
    locator: &impl EntityLocator,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> BTreeSet<EntityRef> {
    let mut goals = perception.view.clone();
    if rng.random::<f64>() < config.chance_to_use_memory {
        goals.extend(
            agent
                .memory
                .keys()
                .filter(|key| locator.position_of(*key).is_some()),
        );
    }
    goals.retain(|goal| !agent.seen_today.contains(goal));
    goals
}

fn go_to(
    agent: &mut Agent,
    perception: &Perception,
    locator: &impl EntityLocator,
    config: &BehaviorConfig,
) -> Option<EntityRef> {
    let Some(goal) = agent.goal else {
        agent.action_state = ActionState::Wander;
        return None;
    };
    if perception.can_reach(goal) {
        return Some(goal);
    }
    match locator.position_of(goal) {
        Some(target) => agent.walk_toward(target, config),
        None => {
            agent.goal = None;
            agent.action_state = ActionState::Wander;
        }
    }
    None
}

fn wander(
    agent: &mut Agent,
    possible_goals: &BTreeSet<EntityRef>,
    phase: DayPhase,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) {
    let spot = match agent.wander_spot {
        Some(spot) => spot,
        None => {
            let spot = agent.pos.random_within(config.vision_radius, rng);
            agent.wander_spot = Some(spot);
            spot
        }
    };
    agent.walk_toward(spot, config);
    if agent.pos.distance_to(spot) >= config.interaction_radius {
        return;
    }

    agent.wander_spot = None;
    let chosen = possible_goals
        .iter()
        .copied()
        .filter(|goal| phase.targets(goal.kind()))
        .choose(rng);
    if let Some(goal) = chosen {
        agent.goal = Some(goal);
        agent.action_state = ActionState::GoTo;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use foragers_types::{AgentId, ShelterId, SiteId};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::genome::Genome;

    const DAY: u64 = 500;

    #[derive(Default)]
    struct Places(BTreeMap<EntityRef, Position>);

    impl EntityLocator for Places {
        fn position_of(&self, entity: EntityRef) -> Option<Position> {
            self.0.get(&entity).copied()
        }
    }

    fn agent_at(x: f64, y: f64) -> Agent {
        let genome = Genome::new(0.5, 0.5, 5).unwrap();
        Agent::new(
            AgentId(0),
            Position::new(x, y),
            genome,
            &BehaviorConfig::default(),
        )
    }

    fn seeing(entities: &[EntityRef]) -> Perception {
        let mut perception = Perception::new();
        perception.view.extend(entities.iter().copied());
        perception
    }

    #[test]
    fn phases_split_the_day() {
        let config = BehaviorConfig::default();
        assert_eq!(day_phase(0, DAY, &config), DayPhase::Morning);
        assert_eq!(day_phase(49, DAY, &config), DayPhase::Morning);
        assert_eq!(day_phase(50, DAY, &config), DayPhase::Midday);
        assert_eq!(day_phase(450, DAY, &config), DayPhase::Midday);
        assert_eq!(day_phase(451, DAY, &config), DayPhase::Evening);
        assert_eq!(day_phase(499, DAY, &config), DayPhase::Evening);
    }

    #[test]
    fn sleeping_agent_does_nothing() {
        let mut rng = SmallRng::seed_from_u64(0);
        let config = BehaviorConfig::default();
        let mut agent = agent_at(10.0, 10.0);
        agent.action_state = ActionState::Sleep;
        let before = agent.clone();
        let out = act(&mut agent, &Perception::new(), 100, DAY, &Places::default(), &config, &mut rng);
        assert!(out.is_none());
        assert_eq!(agent, before);
    }

    #[test]
    fn goto_reports_reachable_goal() {
        let mut rng = SmallRng::seed_from_u64(0);
        let config = BehaviorConfig::default();
        let site = EntityRef::Site(SiteId(1));
        let mut agent = agent_at(10.0, 10.0);
        agent.action_state = ActionState::GoTo;
        agent.goal = Some(site);
        let mut perception = seeing(&[site]);
        perception.interact.insert(site);
        let out = act(&mut agent, &perception, 100, DAY, &Places::default(), &config, &mut rng);
        assert_eq!(out, Some(site));
    }

    #[test]
    fn goto_walks_toward_distant_goal() {
        let mut rng = SmallRng::seed_from_u64(0);
        let config = BehaviorConfig::default();
        let site = EntityRef::Site(SiteId(1));
        let target = Position::new(13.0, 10.0);
        let places = Places([(site, target)].into_iter().collect());
        let mut agent = agent_at(10.0, 10.0);
        agent.action_state = ActionState::GoTo;
        agent.goal = Some(site);
        let before = agent.pos.distance_to(target);
        let out = act(&mut agent, &seeing(&[site]), 100, DAY, &places, &config, &mut rng);
        assert!(out.is_none());
        assert!(agent.pos.distance_to(target) < before);
        assert_eq!(agent.action_state, ActionState::GoTo);
    }

    #[test]
    fn goto_vanished_goal_reverts_to_wander() {
        let mut rng = SmallRng::seed_from_u64(0);
        let config = BehaviorConfig::default();
        let mut agent = agent_at(10.0, 10.0);
        agent.action_state = ActionState::GoTo;
        agent.goal = Some(EntityRef::Agent(AgentId(42)));
        let out = act(&mut agent, &Perception::new(), 100, DAY, &Places::default(), &config, &mut rng);
        assert!(out.is_none());
        assert_eq!(agent.action_state, ActionState::Wander);
        assert!(agent.goal.is_none());
    }

    /// Run wander steps until a goal is chosen, or give up.
    fn wander_until_goal(
        agent: &mut Agent,
        perception: &Perception,
        step_in_day: u64,
        places: &Places,
        rng: &mut SmallRng,
    ) -> Option<EntityRef> {
        let config = BehaviorConfig::default();
        for _ in 0..1000 {
            let _ = act(agent, perception, step_in_day, DAY, places, &config, rng);
            if agent.action_state == ActionState::GoTo {
                return agent.goal;
            }
        }
        None
    }

    #[test]
    fn morning_targets_sites_only() {
        let mut rng = SmallRng::seed_from_u64(11);
        let site = EntityRef::Site(SiteId(0));
        let perception = seeing(&[
            site,
            EntityRef::Shelter(ShelterId(0)),
            EntityRef::Agent(AgentId(7)),
        ]);
        for _ in 0..20 {
            let mut agent = agent_at(100.0, 100.0);
            let goal = wander_until_goal(&mut agent, &perception, 10, &Places::default(), &mut rng);
            assert_eq!(goal, Some(site));
        }
    }

    #[test]
    fn evening_targets_shelters_only() {
        let mut rng = SmallRng::seed_from_u64(12);
        let shelter = EntityRef::Shelter(ShelterId(3));
        let perception = seeing(&[EntityRef::Site(SiteId(0)), shelter, EntityRef::Agent(AgentId(7))]);
        for _ in 0..20 {
            let mut agent = agent_at(100.0, 100.0);
            let goal = wander_until_goal(&mut agent, &perception, 480, &Places::default(), &mut rng);
            assert_eq!(goal, Some(shelter));
        }
    }

    #[test]
    fn midday_never_targets_shelters() {
        let mut rng = SmallRng::seed_from_u64(13);
        let perception = seeing(&[
            EntityRef::Site(SiteId(0)),
            EntityRef::Shelter(ShelterId(0)),
            EntityRef::Agent(AgentId(7)),
        ]);
        for _ in 0..20 {
            let mut agent = agent_at(100.0, 100.0);
            let goal = wander_until_goal(&mut agent, &perception, 250, &Places::default(), &mut rng);
            assert!(goal.is_some_and(|g| !matches!(g, EntityRef::Shelter(_))));
        }
    }

    #[test]
    fn seen_today_is_never_chosen() {
        let mut rng = SmallRng::seed_from_u64(14);
        let site = EntityRef::Site(SiteId(0));
        let perception = seeing(&[site]);
        let mut agent = agent_at(100.0, 100.0);
        agent.seen_today.insert(site);
        let goal = wander_until_goal(&mut agent, &perception, 10, &Places::default(), &mut rng);
        assert!(goal.is_none());
        assert_eq!(agent.action_state, ActionState::Wander);
    }

    #[test]
    fn remembered_places_become_goals() {
        let mut rng = SmallRng::seed_from_u64(15);
        let site = EntityRef::Site(SiteId(4));
        let places = Places([(site, Position::new(150.0, 150.0))].into_iter().collect());
        let mut agent = agent_at(10.0, 10.0);
        agent.memory.insert(site, foragers_types::MemoryTag::Place);
        let goal = wander_until_goal(&mut agent, &Perception::new(), 10, &places, &mut rng);
        assert_eq!(goal, Some(site));
    }

    #[test]
    fn forgotten_entities_are_not_goals() {
        let mut rng = SmallRng::seed_from_u64(16);
        let dead = EntityRef::Agent(AgentId(99));
        let mut agent = agent_at(10.0, 10.0);
        agent.memory.insert(dead, foragers_types::MemoryTag::Share);
        let goal = wander_until_goal(&mut agent, &Perception::new(), 250, &Places::default(), &mut rng);
        assert!(goal.is_none());
    }
}
