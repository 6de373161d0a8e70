//! Integration tests for whole-world behaviour.
//!
//! These tests drive [`World`] through its public API only: generation,
//! stepping, the day boundary and checkpoint records.

#![allow(clippy::unwrap_used)]

use foragers_core::config::SimulationConfig;
use foragers_core::runner::{self, EndReason, NoOpCallback};
use foragers_core::World;
use foragers_types::{ActionState, AgentId, Entity, Perception, WorldRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn config(steps_per_day: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.agents = 60;
    config.world.shelters = 30;
    config.world.sites = 80;
    config.time.steps_per_day = steps_per_day;
    config
}

fn world(seed: u64, steps_per_day: u64) -> World {
    World::generate(config(steps_per_day), StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn same_seed_same_history() {
    let mut a = world(99, 50);
    let mut b = world(99, 50);
    for _ in 0..120 {
        a.step().unwrap();
        b.step().unwrap();
    }
    assert_eq!(a.snapshot(), b.snapshot());
    let positions_a: Vec<_> = a.agents().values().map(|x| x.pos).collect();
    let positions_b: Vec<_> = b.agents().values().map(|x| x.pos).collect();
    assert_eq!(positions_a, positions_b);
}

#[test]
fn different_seeds_diverge() {
    let a = world(1, 50);
    let b = world(2, 50);
    assert_ne!(a.snapshot(), b.snapshot());
}

#[test]
fn shelter_capacity_holds_after_every_step() {
    let mut w = world(5, 60);
    for _ in 0..180 {
        w.step().unwrap();
        for shelter in w.shelters().values() {
            assert!(shelter.occupancy() <= usize::try_from(shelter.max_capacity()).unwrap());
            for occupant in shelter.occupants() {
                let agent = w.agents().get(occupant).unwrap();
                assert_eq!(agent.action_state, ActionState::Sleep);
            }
        }
    }
}

#[test]
fn memory_never_exceeds_capacity() {
    let mut w = world(6, 80);
    for _ in 0..160 {
        w.step().unwrap();
        for agent in w.agents().values() {
            assert!(agent.memory.len() <= usize::try_from(agent.genome().max_memory()).unwrap());
        }
    }
}

#[test]
fn positions_stay_on_map() {
    let mut w = world(7, 40);
    for _ in 0..200 {
        w.step().unwrap();
    }
    for agent in w.agents().values() {
        assert!((0.0..=foragers_types::MAP_SIZE).contains(&agent.pos.x()));
        assert!((0.0..=foragers_types::MAP_SIZE).contains(&agent.pos.y()));
    }
}

#[test]
fn day_boundary_empties_shelters_and_wakes_newborns() {
    let mut config = config(50);
    config.world.shelter_capacity_min = 6;
    config.world.shelter_capacity_max = 6;
    let mut w = World::generate(config, StdRng::seed_from_u64(8)).unwrap();
    let shelter_id = *w.shelters().keys().next().unwrap();
    for id in [AgentId(0), AgentId(1), AgentId(2)] {
        let agent = w.agent_mut(id).unwrap();
        agent.calories = 50_000.0;
        agent.action_state = ActionState::Sleep;
        w.shelter_mut(shelter_id).unwrap().admit(id).unwrap();
    }

    let summary = w.end_day().unwrap();

    assert_eq!(summary.births, 3);
    assert_eq!(summary.population, 6);
    assert!(w.shelters().values().all(|s| s.occupancy() == 0));
    // Children take the next ids after the founding 60 agents.
    for id in [AgentId(60), AgentId(61), AgentId(62)] {
        let child = w.agents().get(&id).unwrap();
        assert_eq!(child.action_state, ActionState::Wander);
        assert!(child.calories.abs() < f64::EPSILON);
    }
}

/// Every entity strictly within range, found by scanning the whole world.
fn perceived_by_scan(w: &World, id: AgentId) -> Perception {
    let behavior = &w.config().behavior;
    let me = w.agents().get(&id).unwrap().pos;
    let places = w
        .shelters()
        .values()
        .map(|s| (s.entity_ref(), s.position()))
        .chain(w.sites().values().map(|s| (s.entity_ref(), s.position())));
    let others = w
        .agents()
        .values()
        .filter(|a| a.id() != id)
        .map(|a| (a.entity_ref(), a.pos));
    let mut perception = Perception::new();
    for (entity, pos) in places.chain(others) {
        perception.observe(
            entity,
            me.distance_to(pos),
            behavior.vision_radius,
            behavior.interaction_radius,
        );
    }
    perception
}

#[test]
fn indexed_perception_matches_full_scan_as_agents_move() {
    // Short days so the comparison also runs right after births and deaths.
    let mut w = world(13, 25);
    for step in 0..120 {
        w.step().unwrap();
        for id in w.agents().keys().copied().collect::<Vec<_>>() {
            assert_eq!(
                w.perceive(id).unwrap(),
                perceived_by_scan(&w, id),
                "agent {id} after step {step}"
            );
        }
    }
}

#[test]
fn deaths_are_irreversible() {
    let mut w = world(10, 30);
    let before: Vec<AgentId> = w.agents().keys().copied().collect();
    for _ in 0..30 {
        w.step().unwrap();
    }
    let after: Vec<AgentId> = w.agents().keys().copied().collect();
    for id in &after {
        // every survivor was either an original agent or newborn
        assert!(before.contains(id) || id.into_inner() >= 60);
    }
    let dead: Vec<&AgentId> = before.iter().filter(|id| !after.contains(id)).collect();
    for _ in 0..30 {
        w.step().unwrap();
    }
    for id in dead {
        assert!(!w.agents().contains_key(id));
    }
}

#[test]
fn checkpoint_json_round_trip() {
    let w = world(11, 50);
    let record = w.snapshot();
    let json = serde_json::to_string_pretty(&record).unwrap();
    let parsed: WorldRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);

    let rebuilt = World::from_record(&parsed, config(50), StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(rebuilt.snapshot(), record);
    assert!(rebuilt.agents().values().all(|a| a.memory.is_empty()));
}

#[test]
fn runner_reports_extinction() {
    let mut config = config(20);
    config.world.shelters = 0;
    let mut w = World::generate(config, StdRng::seed_from_u64(12)).unwrap();
    let result = runner::run(&mut w, 10, &mut NoOpCallback).unwrap();
    assert_eq!(result.end_reason, EndReason::Extinction);
    assert_eq!(result.days_run, 1);
    assert_eq!(w.population(), 0);
}
