//! Enumeration types shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ShelterId, SiteId};

// ---------------------------------------------------------------------------
// Entity references
// ---------------------------------------------------------------------------

/// A tagged, non-owning reference to any entity in the world.
///
/// This is the only way one entity refers to another. Interaction dispatch
/// pattern-matches on the variant instead of inspecting runtime types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// A resource site (berry bush).
    Site(SiteId),
    /// A shelter (cave).
    Shelter(ShelterId),
    /// Another agent.
    Agent(AgentId),
}

impl EntityRef {
    /// The kind of entity this reference points at.
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Site(_) => EntityKind::Site,
            Self::Shelter(_) => EntityKind::Shelter,
            Self::Agent(_) => EntityKind::Agent,
        }
    }

    /// The agent id, if this reference points at an agent.
    pub const fn as_agent(self) -> Option<AgentId> {
        match self {
            Self::Agent(id) => Some(id),
            Self::Site(_) | Self::Shelter(_) => None,
        }
    }
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Site(id) => write!(f, "{id}"),
            Self::Shelter(id) => write!(f, "{id}"),
            Self::Agent(id) => write!(f, "{id}"),
        }
    }
}

impl From<AgentId> for EntityRef {
    fn from(id: AgentId) -> Self {
        Self::Agent(id)
    }
}

impl From<ShelterId> for EntityRef {
    fn from(id: ShelterId) -> Self {
        Self::Shelter(id)
    }
}

impl From<SiteId> for EntityRef {
    fn from(id: SiteId) -> Self {
        Self::Site(id)
    }
}

/// The kind of an entity, without its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Resource site.
    Site,
    /// Shelter.
    Shelter,
    /// Agent.
    Agent,
}

// ---------------------------------------------------------------------------
// Agent state
// ---------------------------------------------------------------------------

/// The three states of the per-agent decision machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    /// Drifting toward a random nearby spot, looking for a goal.
    #[default]
    Wander,
    /// Walking toward a chosen goal entity.
    GoTo,
    /// Admitted to a shelter; inactive for the rest of the day.
    Sleep,
}

/// What an agent remembers about an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryTag {
    /// The other agent acted aggressively in the last encounter.
    Steal,
    /// The other agent acted peacefully in the last encounter.
    Share,
    /// A place worth returning to (resource site or shelter).
    Place,
}

impl MemoryTag {
    /// Tag recorded about an agent given whether it acted aggressively.
    pub const fn from_aggression(aggressive: bool) -> Self {
        if aggressive { Self::Steal } else { Self::Share }
    }
}

impl core::fmt::Display for MemoryTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Steal => write!(f, "steal"),
            Self::Share => write!(f, "share"),
            Self::Place => write!(f, "place"),
        }
    }
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

/// Portion of the day, which decides what kind of goal an agent looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPhase {
    /// Early in the day: forage only.
    Morning,
    /// The middle of the day: forage or meet other agents.
    Midday,
    /// Late in the day: look for a shelter.
    Evening,
}

impl DayPhase {
    /// Whether an entity of `kind` is a valid goal during this phase.
    pub const fn targets(self, kind: EntityKind) -> bool {
        match self {
            Self::Morning => matches!(kind, EntityKind::Site),
            Self::Midday => matches!(kind, EntityKind::Site | EntityKind::Agent),
            Self::Evening => matches!(kind, EntityKind::Shelter),
        }
    }
}
