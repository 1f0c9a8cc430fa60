//! World model: the complete simulation state at one instant.
//!
//! Plain data only. Engines own and mutate a [`World`]; everyone else reads it.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::food::Food;
use super::params::Params;

/// One agent in the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Horizontal position in `[0, width)`.
    pub x: f32,
    /// Vertical position in `[0, height)`.
    pub y: f32,
    /// Heading in radians. Not normalized.
    pub rotation: f32,
    /// Sensor strength per angular sector, starting at `rotation` and covering a full turn.
    pub vision: Vec<f32>,
}

impl Animal {
    /// Creates an animal at a random position and heading with random vision readings.
    pub fn new_random(rng: &mut impl Rng, params: &Params) -> Self {
        Self {
            x: rng.random_range(0.0..params.width),
            y: rng.random_range(0.0..params.height),
            rotation: rng.random_range(0.0..TAU),
            vision: (0..params.vision_sectors).map(|_| rng.random()).collect(),
        }
    }

    /// Position as a point.
    pub fn pos(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Unit vector along the heading.
    pub fn heading(&self) -> [f32; 2] {
        [self.rotation.cos(), self.rotation.sin()]
    }

    /// Absolute direction of vision sector `i`.
    pub fn sector_angle(&self, i: usize) -> f32 {
        self.rotation + (i as f32 / self.vision.len() as f32) * TAU
    }
}

/// Bounds, animals and food of a toroidal arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
    /// Animals in a stable order between `reset`/`train` calls.
    pub animals: Vec<Animal>,
    /// Food points, in no particular order.
    pub food: Vec<Food>,
}

impl World {
    /// Creates the initial world: default population and food count at random positions.
    pub fn new_random(rng: &mut impl Rng, params: &Params) -> Self {
        let animals = (0..params.n_animals)
            .map(|_| Animal::new_random(rng, params))
            .collect();

        Self {
            width: params.width,
            height: params.height,
            animals,
            food: random_food(rng, params),
        }
    }

    /// True when `(x, y)` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

/// Generates the default number of food points.
pub fn random_food(rng: &mut impl Rng, params: &Params) -> Vec<Food> {
    (0..params.n_food)
        .map(|_| Food::new_random(rng, params.width, params.height))
        .collect()
}
