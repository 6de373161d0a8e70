//! Bounded 2D coordinates and motion primitives.
//!
//! A [`Position`] is always inside the square map `[0, MAP_SIZE]²`: both
//! coordinates are clamped on construction and the fields are private, so
//! the only way to "move" is to build a new value.

use core::f64::consts::TAU;

use rand::Rng;

/// Side length of the square map.
pub const MAP_SIZE: f64 = 200.0;

/// Distance covered by a single movement step.
pub const DISTANCE_PER_STEP: f64 = 0.2;

/// Added to the displacement magnitude so stepping onto the current point
/// does not divide by zero.
const STEP_EPSILON: f64 = 1e-4;

/// An immutable point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a position, clamping each coordinate into `[0, MAP_SIZE]`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_coordinate(x),
            y: clamp_coordinate(y),
        }
    }

    /// X coordinate.
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// One fixed-length step from `self` toward `target`.
    ///
    /// The step length is always [`DISTANCE_PER_STEP`]; when the target is
    /// closer than that the step overshoots slightly, which callers absorb by
    /// testing arrival against the interaction radius.
    pub fn step_toward(self, target: Self) -> Self {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let scale = DISTANCE_PER_STEP / (dx.hypot(dy) + STEP_EPSILON);
        Self::new(dx.mul_add(scale, self.x), dy.mul_add(scale, self.y))
    }

    /// A random point at most `radius` away from `self` (clamped to the map).
    pub fn random_within(self, radius: f64, rng: &mut impl Rng) -> Self {
        let r = rng.random::<f64>() * radius;
        let theta = rng.random::<f64>() * TAU;
        Self::new(r.mul_add(theta.cos(), self.x), r.mul_add(theta.sin(), self.y))
    }

    /// A uniformly random point anywhere on the map.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.random::<f64>() * MAP_SIZE, rng.random::<f64>() * MAP_SIZE)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Clamp a coordinate into the map. NaN collapses to the origin edge.
fn clamp_coordinate(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else if value > MAP_SIZE {
        MAP_SIZE
    } else {
        value
    }
}
