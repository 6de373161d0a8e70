//! Type-safe integer handles for every entity kind.
//!
//! Entities never hold pointers to each other. Goals, memories, shelter
//! occupants and the per-day `seen_today` sets all store these handles and
//! resolve them through the world's arena maps. Handles are issued by an
//! [`IdSequence`] owned by the world, so two simulations in the same process
//! never share a counter.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent.
    AgentId, "agent"
}

define_id! {
    /// Unique identifier for a shelter (cave).
    ShelterId, "shelter"
}

define_id! {
    /// Unique identifier for a resource site (berry bush).
    SiteId, "site"
}

/// Per-kind monotonic id generator.
///
/// Each entity kind counts up independently from zero. The world owns one
/// sequence; tests that need predictable names construct a fresh one or call
/// [`IdSequence::reset`] between independent runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    next_agent: u64,
    next_shelter: u64,
    next_site: u64,
}

impl IdSequence {
    /// Create a sequence whose counters all start at zero.
    pub const fn new() -> Self {
        Self {
            next_agent: 0,
            next_shelter: 0,
            next_site: 0,
        }
    }

    /// Issue the next agent id.
    pub const fn next_agent(&mut self) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent = self.next_agent.saturating_add(1);
        id
    }

    /// Issue the next shelter id.
    pub const fn next_shelter(&mut self) -> ShelterId {
        let id = ShelterId(self.next_shelter);
        self.next_shelter = self.next_shelter.saturating_add(1);
        id
    }

    /// Issue the next resource site id.
    pub const fn next_site(&mut self) -> SiteId {
        let id = SiteId(self.next_site);
        self.next_site = self.next_site.saturating_add(1);
        id
    }

    /// Rewind every counter to zero.
    pub const fn reset(&mut self) {
        self.next_agent = 0;
        self.next_shelter = 0;
        self.next_site = 0;
    }
}
