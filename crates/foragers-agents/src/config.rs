//! Tunable parameters for agent behaviour and metabolism.
//!
//! These values are read from the `behavior` section of
//! `foragers-config.yaml`. The [`BehaviorConfig`] struct bundles every
//! tunable so that callers (the step loop, tests) can override defaults.

use foragers_types::DISTANCE_PER_STEP;
use serde::Deserialize;

/// Configuration for perception, decisions, metabolism and inheritance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Distance within which entities are visible (default: 4.0).
    ///
    /// Also the cell size of the spatial indexes.
    #[serde(default = "default_vision_radius")]
    pub vision_radius: f64,

    /// Distance within which entities can be interacted with (default: 0.5).
    ///
    /// Must be at least half of [`DISTANCE_PER_STEP`] so a walking agent
    /// always lands within reach of its target.
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: f64,

    /// Probability of remembering a harvested resource site (default: 0.3).
    #[serde(default = "default_chance_to_remember_site")]
    pub chance_to_remember_site: f64,

    /// Probability of remembering a shelter slept in (default: 0.7).
    #[serde(default = "default_chance_to_remember_shelter")]
    pub chance_to_remember_shelter: f64,

    /// Probability, per step, of adding remembered entities to the goal
    /// candidates (default: 0.1).
    #[serde(default = "default_chance_to_use_memory")]
    pub chance_to_use_memory: f64,

    /// Leading fraction of the day in which only sites are targeted
    /// (default: 0.1).
    #[serde(default = "default_phase_fraction")]
    pub morning_fraction: f64,

    /// Trailing fraction of the day in which only shelters are targeted
    /// (default: 0.1).
    #[serde(default = "default_phase_fraction")]
    pub evening_fraction: f64,

    /// Daily calories burned at aggressiveness 1.0 (default: 200).
    #[serde(default = "default_max_aggression_calories")]
    pub max_aggression_calories: f64,

    /// Daily calories burned at harvest fraction 1.0 (default: 100).
    #[serde(default = "default_max_harvest_calories")]
    pub max_harvest_calories: f64,

    /// Daily calories burned per memory slot (default: 50).
    #[serde(default = "default_calories_per_memory")]
    pub calories_per_memory: f64,

    /// Half-width of the uniform noise added to a child's aggressiveness
    /// (default: 0.05).
    #[serde(default = "default_trait_mutation")]
    pub aggressiveness_mutation: f64,

    /// Half-width of the uniform noise added to a child's harvest fraction
    /// (default: 0.05).
    #[serde(default = "default_trait_mutation")]
    pub harvest_mutation: f64,

    /// Half-width of the uniform noise added to a child's memory capacity
    /// before rounding (default: 0.5).
    #[serde(default = "default_memory_mutation")]
    pub memory_mutation: f64,

    /// Maximum integer step applied to a child's memory capacity after
    /// rounding (default: 1).
    #[serde(default = "default_memory_perturbation")]
    pub memory_perturbation: u32,

    /// Calories added to the daily expenditure for every step walked
    /// (default: 0).
    #[serde(default)]
    pub walk_calorie_cost: f64,

    /// Calories added to the daily expenditure for every aggressive roll
    /// (default: 0).
    #[serde(default)]
    pub fight_calorie_cost: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            vision_radius: default_vision_radius(),
            interaction_radius: default_interaction_radius(),
            chance_to_remember_site: default_chance_to_remember_site(),
            chance_to_remember_shelter: default_chance_to_remember_shelter(),
            chance_to_use_memory: default_chance_to_use_memory(),
            morning_fraction: default_phase_fraction(),
            evening_fraction: default_phase_fraction(),
            max_aggression_calories: default_max_aggression_calories(),
            max_harvest_calories: default_max_harvest_calories(),
            calories_per_memory: default_calories_per_memory(),
            aggressiveness_mutation: default_trait_mutation(),
            harvest_mutation: default_trait_mutation(),
            memory_mutation: default_memory_mutation(),
            memory_perturbation: default_memory_perturbation(),
            walk_calorie_cost: 0.0,
            fight_calorie_cost: 0.0,
        }
    }
}

impl BehaviorConfig {
    /// Check internal consistency, returning a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.vision_radius.is_finite() || self.vision_radius <= 0.0 {
            return Err(format!(
                "vision_radius must be positive, got {}",
                self.vision_radius
            ));
        }
        // A smaller radius lets the fixed step overshoot a target forever.
        let min_interaction = DISTANCE_PER_STEP / 2.0;
        if !self.interaction_radius.is_finite()
            || self.interaction_radius < min_interaction
            || self.interaction_radius > self.vision_radius
        {
            return Err(format!(
                "interaction_radius must be in [{min_interaction}, vision_radius], got {}",
                self.interaction_radius
            ));
        }
        let probabilities = [
            ("chance_to_remember_site", self.chance_to_remember_site),
            ("chance_to_remember_shelter", self.chance_to_remember_shelter),
            ("chance_to_use_memory", self.chance_to_use_memory),
            ("morning_fraction", self.morning_fraction),
            ("evening_fraction", self.evening_fraction),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        let non_negative = [
            ("max_aggression_calories", self.max_aggression_calories),
            ("max_harvest_calories", self.max_harvest_calories),
            ("calories_per_memory", self.calories_per_memory),
            ("aggressiveness_mutation", self.aggressiveness_mutation),
            ("harvest_mutation", self.harvest_mutation),
            ("memory_mutation", self.memory_mutation),
            ("walk_calorie_cost", self.walk_calorie_cost),
            ("fight_calorie_cost", self.fight_calorie_cost),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }
}

const fn default_vision_radius() -> f64 {
    4.0
}

const fn default_interaction_radius() -> f64 {
    0.5
}

const fn default_chance_to_remember_site() -> f64 {
    0.3
}

const fn default_chance_to_remember_shelter() -> f64 {
    0.7
}

const fn default_chance_to_use_memory() -> f64 {
    0.1
}

const fn default_phase_fraction() -> f64 {
    0.1
}

const fn default_max_aggression_calories() -> f64 {
    200.0
}

const fn default_max_harvest_calories() -> f64 {
    100.0
}

const fn default_calories_per_memory() -> f64 {
    50.0
}

const fn default_trait_mutation() -> f64 {
    0.05
}

const fn default_memory_mutation() -> f64 {
    0.5
}

const fn default_memory_perturbation() -> u32 {
    1
}
