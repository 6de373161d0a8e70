//! Bounded first-in first-out memory of entities.
//!
//! Each agent remembers up to `max_memory` entities, each tagged with what
//! it learned about them. Writing a key that is already present moves it to
//! the newest position; when the memory overflows, the oldest entry is
//! forgotten.

use std::collections::VecDeque;

use foragers_types::{EntityRef, MemoryTag};

/// A fixed-capacity, insertion-ordered map from entity to tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    entries: VecDeque<(EntityRef, MemoryTag)>,
    capacity: usize,
}

impl Memory {
    /// Create an empty memory holding at most `capacity` entries.
    pub fn new(capacity: u32) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: usize::try_from(capacity).unwrap_or(usize::MAX),
        }
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `tag` under `key` as the newest entry, evicting the oldest
    /// entries while over capacity.
    pub fn insert(&mut self, key: EntityRef, tag: MemoryTag) {
        self.entries.retain(|(existing, _)| *existing != key);
        self.entries.push_back((key, tag));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The tag stored for `key`, if remembered.
    pub fn get(&self, key: EntityRef) -> Option<MemoryTag> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, tag)| *tag)
    }

    /// Remembered entities, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = EntityRef> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Remembered entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = (EntityRef, MemoryTag)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use foragers_types::{AgentId, ShelterId, SiteId};

    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut memory = Memory::new(2);
        memory.insert(EntityRef::Site(SiteId(0)), MemoryTag::Place);
        memory.insert(EntityRef::Site(SiteId(1)), MemoryTag::Place);
        memory.insert(EntityRef::Site(SiteId(2)), MemoryTag::Place);
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.get(EntityRef::Site(SiteId(0))), None);
        assert_eq!(
            memory.keys().collect::<Vec<_>>(),
            vec![EntityRef::Site(SiteId(1)), EntityRef::Site(SiteId(2))]
        );
    }

    #[test]
    fn reinsert_refreshes_position_and_tag() {
        let mut memory = Memory::new(2);
        let rival = EntityRef::Agent(AgentId(4));
        memory.insert(rival, MemoryTag::Share);
        memory.insert(EntityRef::Shelter(ShelterId(1)), MemoryTag::Place);
        memory.insert(rival, MemoryTag::Steal);
        memory.insert(EntityRef::Site(SiteId(9)), MemoryTag::Place);
        assert_eq!(memory.get(rival), Some(MemoryTag::Steal));
        assert_eq!(memory.get(EntityRef::Shelter(ShelterId(1))), None);
    }

    #[test]
    fn zero_capacity_remembers_nothing() {
        let mut memory = Memory::new(0);
        memory.insert(EntityRef::Site(SiteId(0)), MemoryTag::Place);
        assert!(memory.is_empty());
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut memory = Memory::new(5);
        for i in 0..50 {
            memory.insert(EntityRef::Agent(AgentId(i)), MemoryTag::Share);
            assert!(memory.len() <= memory.capacity());
        }
    }
}
