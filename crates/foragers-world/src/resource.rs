//! Resource sites: daily-renewing calorie stocks.
//!
//! A [`ResourceSite`] holds `max_calories` at the start of every day. Each
//! harvest removes a fraction of the *maximum* stock, capped by what is left,
//! so a site with 100 calories yields 50 to a `0.5` harvester and then the
//! remaining 50 to a `0.6` harvester. The stock is restored by
//! [`Entity::reset`] at the day boundary.

use foragers_types::{Entity, EntityRef, Position, SiteId, SiteRecord};

/// A renewable food source (berry bush).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSite {
    id: SiteId,
    pos: Position,
    max_calories: u32,
    current_calories: u32,
}

impl ResourceSite {
    /// Create a site with a full stock.
    pub const fn new(id: SiteId, pos: Position, max_calories: u32) -> Self {
        Self {
            id,
            pos,
            max_calories,
            current_calories: max_calories,
        }
    }

    /// Identifier.
    pub const fn id(&self) -> SiteId {
        self.id
    }

    /// Stock at the start of each day.
    pub const fn max_calories(&self) -> u32 {
        self.max_calories
    }

    /// Calories left today.
    pub const fn current_calories(&self) -> u32 {
        self.current_calories
    }

    /// Take `min(floor(max_calories * fraction), current_calories)` calories.
    ///
    /// Fractions outside `[0, 1]` are clamped; NaN harvests nothing.
    pub fn harvest(&mut self, fraction: f64) -> u32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let requested = (f64::from(self.max_calories) * fraction).floor() as u32;
        let taken = requested.min(self.current_calories);
        self.current_calories = self.current_calories.saturating_sub(taken);
        taken
    }

    /// Persisted form of this site.
    pub const fn to_record(&self) -> SiteRecord {
        SiteRecord {
            x: self.pos.x(),
            y: self.pos.y(),
            max_calories: self.max_calories,
        }
    }

    /// Rebuild a site from its record under a freshly issued id.
    pub fn from_record(id: SiteId, record: &SiteRecord) -> Self {
        Self::new(id, Position::new(record.x, record.y), record.max_calories)
    }
}

impl Entity for ResourceSite {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::Site(self.id)
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn reset(&mut self) {
        self.current_calories = self.max_calories;
    }
}
