//! Agent runtime state and the daily survival rule.
//!
//! An [`Agent`] couples an immutable [`Genome`] with the state that changes
//! step by step: position, calories, the decision state machine fields, the
//! per-day `seen_today` set and the bounded [`Memory`]. Everything except
//! the memory is wiped at the day boundary by [`Entity::reset`].

use std::collections::BTreeSet;

use foragers_types::{
    ActionState, AgentId, AgentRecord, Entity, EntityRef, MemoryTag, Position,
};
use rand::Rng;

use crate::config::BehaviorConfig;
use crate::error::AgentError;
use crate::genome::Genome;
use crate::memory::Memory;

/// Multiplier on aggressiveness against an agent remembered as a thief.
const STEAL_MODIFIER: f64 = 2.0;

/// Multiplier on aggressiveness against an agent remembered as a sharer.
const SHARE_MODIFIER: f64 = 0.5;

/// A single forager.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: AgentId,
    genome: Genome,
    base_expenditure: f64,

    /// Current position.
    pub pos: Position,
    /// Calories gathered and carried over.
    pub calories: f64,
    /// Decision state.
    pub action_state: ActionState,
    /// Entity being walked toward while in [`ActionState::GoTo`].
    pub goal: Option<EntityRef>,
    /// Point being wandered toward while in [`ActionState::Wander`].
    pub wander_spot: Option<Position>,
    /// Entities already dealt with today; never chosen as goals again
    /// until the next reset.
    pub seen_today: BTreeSet<EntityRef>,
    /// Long-lived memory of places and other agents.
    pub memory: Memory,
    /// Extra calories burned today by walking and fighting.
    pub exercise_calories: f64,
}

impl Agent {
    /// Create an agent with zero calories, an empty memory sized by its
    /// genome, and fresh daily state.
    pub fn new(id: AgentId, pos: Position, genome: Genome, config: &BehaviorConfig) -> Self {
        Self {
            id,
            genome,
            base_expenditure: genome.base_expenditure(config),
            pos,
            calories: 0.0,
            action_state: ActionState::Wander,
            goal: None,
            wander_spot: None,
            seen_today: BTreeSet::new(),
            memory: Memory::new(genome.max_memory()),
            exercise_calories: 0.0,
        }
    }

    /// Identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Heritable genes.
    pub const fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Calories this agent must hold at day end to survive, including
    /// today's exercise.
    pub fn calorie_expenditure(&self) -> f64 {
        self.base_expenditure + self.exercise_calories
    }

    /// Whether the agent lives through the coming night: asleep in a
    /// shelter and holding at least its daily expenditure.
    pub fn survived(&self) -> bool {
        self.action_state == ActionState::Sleep && self.calories >= self.calorie_expenditure()
    }

    /// Roll whether this agent acts aggressively toward `other`.
    ///
    /// The chance is `aggressiveness` scaled by what memory says about
    /// `other`: doubled against a remembered thief, halved against a
    /// remembered sharer. An aggressive roll is charged the fight cost.
    pub fn rolls_aggressive(
        &mut self,
        other: AgentId,
        config: &BehaviorConfig,
        rng: &mut impl Rng,
    ) -> bool {
        let modifier = match self.memory.get(EntityRef::Agent(other)) {
            Some(MemoryTag::Steal) => STEAL_MODIFIER,
            Some(MemoryTag::Share) => SHARE_MODIFIER,
            Some(MemoryTag::Place) | None => 1.0,
        };
        let aggressive = rng.random::<f64>() < self.genome.aggressiveness() * modifier;
        if aggressive {
            self.exercise_calories += config.fight_calorie_cost;
        }
        aggressive
    }

    /// Record what this agent learned about another agent.
    pub fn remember_agent(&mut self, other: AgentId, other_was_aggressive: bool) {
        self.memory.insert(
            EntityRef::Agent(other),
            MemoryTag::from_aggression(other_was_aggressive),
        );
    }

    /// Take one step toward `target`, charging the walk cost.
    pub fn walk_toward(&mut self, target: Position, config: &BehaviorConfig) {
        self.pos = self.pos.step_toward(target);
        self.exercise_calories += config.walk_calorie_cost;
    }

    /// Leave the goal behind after interacting with it. Agents that fell
    /// asleep stay asleep; everyone else resumes wandering.
    pub fn finish_interaction(&mut self) {
        self.goal = None;
        if self.action_state != ActionState::Sleep {
            self.action_state = ActionState::Wander;
        }
    }

    /// Persisted form: position and genome. Memory is not persisted.
    pub const fn to_record(&self) -> AgentRecord {
        AgentRecord {
            x: self.pos.x(),
            y: self.pos.y(),
            aggressiveness: self.genome.aggressiveness(),
            harvest_percent: self.genome.harvest_percent(),
            max_memory: self.genome.max_memory(),
        }
    }

    /// Rebuild an agent from its record under a freshly issued id.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidGenome`] if the record's genes are out
    /// of range.
    pub fn from_record(
        id: AgentId,
        record: &AgentRecord,
        config: &BehaviorConfig,
    ) -> Result<Self, AgentError> {
        let genome = Genome::new(
            record.aggressiveness,
            record.harvest_percent,
            record.max_memory,
        )?;
        Ok(Self::new(id, Position::new(record.x, record.y), genome, config))
    }
}

impl Entity for Agent {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Agent(self.id)
    }

    fn position(&self) -> Position {
        self.pos
    }

    /// Pay the day's expenditure and clear all daily state. Calories never
    /// drop below zero. Memory persists.
    fn reset(&mut self) {
        self.calories = (self.calories - self.calorie_expenditure()).max(0.0);
        self.action_state = ActionState::Wander;
        self.goal = None;
        self.wander_spot = None;
        self.seen_today.clear();
        self.exercise_calories = 0.0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn agent(aggressiveness: f64) -> Agent {
        let genome = Genome::new(aggressiveness, 0.5, 2).unwrap();
        Agent::new(
            AgentId(0),
            Position::new(1.0, 1.0),
            genome,
            &BehaviorConfig::default(),
        )
    }

    #[test]
    fn survival_requires_sleep_and_calories() {
        let mut a = agent(0.0);
        // 0*200 + 0.5*100 + 2*50 = 150
        a.calories = 150.0;
        assert!(!a.survived());
        a.action_state = ActionState::Sleep;
        assert!(a.survived());
        a.calories = 149.0;
        assert!(!a.survived());
    }

    #[test]
    fn reset_pays_expenditure_and_clears_daily_state() {
        let mut a = agent(0.0);
        a.calories = 400.0;
        a.action_state = ActionState::Sleep;
        a.goal = Some(EntityRef::Agent(AgentId(3)));
        a.wander_spot = Some(Position::new(2.0, 2.0));
        a.seen_today.insert(EntityRef::Agent(AgentId(3)));
        a.remember_agent(AgentId(3), true);
        a.reset();
        assert!((a.calories - 250.0).abs() < 1e-9);
        assert_eq!(a.action_state, ActionState::Wander);
        assert!(a.goal.is_none());
        assert!(a.wander_spot.is_none());
        assert!(a.seen_today.is_empty());
        assert_eq!(a.memory.len(), 1);
    }

    #[test]
    fn reset_never_goes_negative() {
        let mut a = agent(1.0);
        a.reset();
        assert!(a.calories.abs() < f64::EPSILON);
    }

    #[test]
    fn aggression_extremes_are_deterministic() {
        let mut rng = SmallRng::seed_from_u64(1);
        let config = BehaviorConfig::default();
        let mut hawk = agent(1.0);
        let mut dove = agent(0.0);
        for _ in 0..100 {
            assert!(hawk.rolls_aggressive(AgentId(9), &config, &mut rng));
            assert!(!dove.rolls_aggressive(AgentId(9), &config, &mut rng));
        }
    }

    #[test]
    fn remembered_sharer_halves_aggression() {
        let mut rng = SmallRng::seed_from_u64(2);
        let config = BehaviorConfig::default();
        let mut a = agent(1.0);
        a.remember_agent(AgentId(5), false);
        let aggressive = (0..2000)
            .filter(|_| a.rolls_aggressive(AgentId(5), &config, &mut rng))
            .count();
        assert!((800..1200).contains(&aggressive), "got {aggressive}");
    }

    #[test]
    fn remembered_thief_doubles_aggression() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = BehaviorConfig::default();
        let mut a = agent(0.5);
        a.remember_agent(AgentId(5), true);
        for _ in 0..200 {
            assert!(a.rolls_aggressive(AgentId(5), &config, &mut rng));
        }
    }

    #[test]
    fn fight_and_walk_costs_add_to_expenditure() {
        let mut rng = SmallRng::seed_from_u64(4);
        let config = BehaviorConfig {
            fight_calorie_cost: 10.0,
            walk_calorie_cost: 1.0,
            ..BehaviorConfig::default()
        };
        let mut a = agent(1.0);
        let base = a.calorie_expenditure();
        assert!(a.rolls_aggressive(AgentId(1), &config, &mut rng));
        a.walk_toward(Position::new(10.0, 10.0), &config);
        assert!((a.calorie_expenditure() - base - 11.0).abs() < 1e-9);
        a.reset();
        assert!((a.calorie_expenditure() - base).abs() < 1e-9);
    }

    #[test]
    fn finish_interaction_keeps_sleepers_asleep() {
        let mut a = agent(0.0);
        a.action_state = ActionState::GoTo;
        a.goal = Some(EntityRef::Agent(AgentId(1)));
        a.finish_interaction();
        assert_eq!(a.action_state, ActionState::Wander);
        a.action_state = ActionState::Sleep;
        a.finish_interaction();
        assert_eq!(a.action_state, ActionState::Sleep);
    }

    #[test]
    fn record_round_trip_preserves_position_and_genome() {
        let config = BehaviorConfig::default();
        let genome = Genome::new(0.123_456_789, 0.987_654_321, 17).unwrap();
        let mut original = Agent::new(AgentId(8), Position::new(33.3, 44.4), genome, &config);
        original.remember_agent(AgentId(2), true);
        let rebuilt = Agent::from_record(AgentId(8), &original.to_record(), &config).unwrap();
        assert_eq!(rebuilt.pos, original.pos);
        assert_eq!(*rebuilt.genome(), genome);
        assert!(rebuilt.memory.is_empty());
    }

    #[test]
    fn invalid_record_is_rejected() {
        let record = AgentRecord {
            x: 0.0,
            y: 0.0,
            aggressiveness: 2.0,
            harvest_percent: 0.5,
            max_memory: 3,
        };
        assert!(Agent::from_record(AgentId(0), &record, &BehaviorConfig::default()).is_err());
    }
}
