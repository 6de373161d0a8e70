//! Interactions between an agent and the entity it reached.
//!
//! The step loop dispatches on the goal's [`EntityRef`] variant:
//!
//! - site: [`harvest`]
//! - shelter: [`enter_shelter`]
//! - agent: [`share_or_steal`]
//!
//! Each function takes the entities it touches by mutable reference. The
//! acting agent is taken out of the roster for the duration of its turn, so
//! it never aliases the peer or rival it is dealing with.

use std::collections::BTreeMap;

use foragers_types::{ActionState, AgentId, Entity, EntityRef, MemoryTag};
use foragers_world::{ResourceSite, Shelter};
use rand::Rng;
use tracing::debug;

use crate::agent::Agent;
use crate::config::BehaviorConfig;
use crate::error::AgentError;

/// How a shelter entry attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelterOutcome {
    /// There was room; the entrant is now asleep inside.
    Admitted,
    /// The shelter was full and the entrant drove out `rival`.
    Evicted {
        /// The occupant that lost its place.
        rival: AgentId,
    },
    /// The shelter was full and the entrant was turned away by `rival`.
    Rejected {
        /// The occupant that held its place.
        rival: AgentId,
    },
    /// The shelter has zero capacity; nobody to challenge.
    NoRoom,
}

/// How an encounter between two agents ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerOutcome {
    /// Both were peaceful; calories split evenly.
    Shared,
    /// Both were aggressive; calories split evenly.
    Fought,
    /// Only `thief` was aggressive and took everything.
    Stolen {
        /// The aggressive party.
        thief: AgentId,
    },
}

/// Gather calories from `site`.
///
/// The site is marked as seen for the rest of the day and may be
/// remembered as a place worth returning to. Returns the calories taken.
pub fn harvest(
    agent: &mut Agent,
    site: &mut ResourceSite,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> u32 {
    let taken = site.harvest(agent.genome().harvest_percent());
    agent.calories += f64::from(taken);
    let key = site.entity_ref();
    agent.seen_today.insert(key);
    if rng.random::<f64>() < config.chance_to_remember_site {
        agent.memory.insert(key, MemoryTag::Place);
    }
    taken
}

/// Try to sleep in `shelter`.
///
/// With room to spare the entrant is simply admitted. In a full shelter a
/// random occupant is challenged: only an aggressive entrant facing a
/// peaceful rival takes its place, and the rival goes back to wandering.
/// Either way both remember how the other behaved. An admitted entrant
/// falls asleep at the shelter's position and may remember the shelter.
///
/// `roster` holds every other agent; the entrant must not be in it.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] if an occupant is missing from the
/// roster.
pub fn enter_shelter(
    shelter: &mut Shelter,
    entrant: &mut Agent,
    roster: &mut BTreeMap<AgentId, Agent>,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> Result<ShelterOutcome, AgentError> {
    if !shelter.is_full() {
        shelter.admit(entrant.id())?;
        fall_asleep(shelter, entrant, config, rng);
        return Ok(ShelterOutcome::Admitted);
    }

    let Some(rival_id) = shelter.random_occupant(rng) else {
        return Ok(ShelterOutcome::NoRoom);
    };
    let rival = roster
        .get_mut(&rival_id)
        .ok_or(AgentError::AgentNotFound(rival_id))?;

    let entrant_aggressive = entrant.rolls_aggressive(rival_id, config, rng);
    let rival_aggressive = rival.rolls_aggressive(entrant.id(), config, rng);
    entrant.remember_agent(rival_id, rival_aggressive);
    rival.remember_agent(entrant.id(), entrant_aggressive);

    if entrant_aggressive && !rival_aggressive {
        shelter.evict(rival_id)?;
        rival.action_state = ActionState::Wander;
        shelter.admit(entrant.id())?;
        fall_asleep(shelter, entrant, config, rng);
        debug!(
            shelter = %shelter.id(),
            entrant = %entrant.id(),
            rival = %rival_id,
            "Rival driven out of shelter"
        );
        Ok(ShelterOutcome::Evicted { rival: rival_id })
    } else {
        Ok(ShelterOutcome::Rejected { rival: rival_id })
    }
}

fn fall_asleep(
    shelter: &Shelter,
    agent: &mut Agent,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) {
    agent.action_state = ActionState::Sleep;
    agent.pos = shelter.position();
    agent.wander_spot = None;
    if rng.random::<f64>() < config.chance_to_remember_shelter {
        agent.memory.insert(EntityRef::Shelter(shelter.id()), MemoryTag::Place);
    }
}

/// Resolve an encounter between `a` and `b`.
///
/// Each rolls aggression against the other. Matching rolls split the pooled
/// calories evenly; otherwise the aggressor takes the whole pool. Total
/// calories are conserved. Both mark each other as seen today and remember
/// how the other behaved.
pub fn share_or_steal(
    a: &mut Agent,
    b: &mut Agent,
    config: &BehaviorConfig,
    rng: &mut impl Rng,
) -> PeerOutcome {
    let a_aggressive = a.rolls_aggressive(b.id(), config, rng);
    let b_aggressive = b.rolls_aggressive(a.id(), config, rng);
    let total = a.calories + b.calories;

    let outcome = match (a_aggressive, b_aggressive) {
        (false, false) | (true, true) => {
            let half = total / 2.0;
            a.calories = half;
            b.calories = total - half;
            if a_aggressive {
                PeerOutcome::Fought
            } else {
                PeerOutcome::Shared
            }
        }
        (true, false) => {
            a.calories = total;
            b.calories = 0.0;
            PeerOutcome::Stolen { thief: a.id() }
        }
        (false, true) => {
            a.calories = 0.0;
            b.calories = total;
            PeerOutcome::Stolen { thief: b.id() }
        }
    };

    a.seen_today.insert(EntityRef::Agent(b.id()));
    b.seen_today.insert(EntityRef::Agent(a.id()));
    a.remember_agent(b.id(), b_aggressive);
    b.remember_agent(a.id(), a_aggressive);
    outcome
}
