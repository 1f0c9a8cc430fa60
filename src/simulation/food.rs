//! Food points scattered over the arena.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point resource that animals can eat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Horizontal position in `[0, width)`.
    pub x: f32,
    /// Vertical position in `[0, height)`.
    pub y: f32,
}

impl Food {
    /// Creates a food point at a uniformly random position inside the arena.
    pub fn new_random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.random_range(0.0..width),
            y: rng.random_range(0.0..height),
        }
    }

    /// Position as a point.
    pub fn pos(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}
