//! Stepping engines: the pluggable components that advance a [`World`].
//!
//! Two implementations share the [`SteppingEngine`] trait:
//! - [`evolution::EvolutionEngine`] - the external engine contract, with neural
//!   brains and a genetic algorithm
//! - [`fallback::FallbackEngine`] - a self-contained stand-in with simple
//!   kinematics and stochastic food
//!
//! The driver picks one at initialization through an [`EngineSource`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::params::Params;
use super::rng::SimRng;
use super::world::World;

pub mod evolution;
pub mod fallback;

pub use evolution::EvolutionEngine;
pub use fallback::FallbackEngine;

/// Interface version an external engine must report to be accepted.
pub const ENGINE_API_VERSION: u32 = 1;

/// Which engine variant is driving the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineKind {
    /// An engine acquired through the external engine contract.
    External,
    /// The self-contained fallback engine.
    Fallback,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::External => write!(f, "external"),
            EngineKind::Fallback => write!(f, "fallback"),
        }
    }
}

/// Fitness summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation the statistics describe, starting at 0.
    pub generation: u32,
    /// Lowest fitness in the population.
    pub min_fitness: f32,
    /// Highest fitness in the population.
    pub max_fitness: f32,
    /// Mean fitness of the population.
    pub avg_fitness: f32,
}

impl GenerationStats {
    /// Summarizes a slice of fitness values. Empty populations report zeros.
    pub fn from_fitness(generation: u32, fitness: &[f32]) -> Self {
        if fitness.is_empty() {
            return Self {
                generation,
                min_fitness: 0.0,
                max_fitness: 0.0,
                avg_fitness: 0.0,
            };
        }

        let min_fitness = fitness.iter().copied().fold(f32::INFINITY, f32::min);
        let max_fitness = fitness.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let avg_fitness = fitness.iter().sum::<f32>() / fitness.len() as f32;

        Self {
            generation,
            min_fitness,
            max_fitness,
            avg_fitness,
        }
    }
}

/// Advances a [`World`] tick by tick and generation by generation.
///
/// Every mutating call either completes fully or leaves the world untouched.
pub trait SteppingEngine {
    /// Variant tag, fixed for the lifetime of the engine.
    fn kind(&self) -> EngineKind;

    /// Interface version this engine implements.
    fn api_version(&self) -> u32 {
        ENGINE_API_VERSION
    }

    /// Current world.
    fn world(&self) -> &World;

    /// Advances the world by exactly one tick.
    fn step(&mut self);

    /// Advances the simulation by one generation.
    fn train(&mut self);

    /// Discards the world and starts a fresh run.
    fn reset(&mut self);

    /// Statistics of the most recent generation, if the engine tracks fitness.
    fn last_generation(&self) -> Option<GenerationStats> {
        None
    }
}

/// Constructor for a custom external engine.
pub type EngineConstructor =
    Box<dyn Fn(&Params, SimRng) -> Result<Box<dyn SteppingEngine>, EngineError>>;

/// Where the driver acquires its external engine from.
pub enum EngineSource {
    /// Construct the in-crate [`EvolutionEngine`].
    Evolution,
    /// No external engine is present; the reason is logged when falling back.
    Unavailable(String),
    /// Construct an engine through a caller-supplied function.
    Custom(EngineConstructor),
}

impl EngineSource {
    /// Attempts to construct the external engine.
    pub fn construct(
        &self,
        params: &Params,
        rng: SimRng,
    ) -> Result<Box<dyn SteppingEngine>, EngineError> {
        let engine: Box<dyn SteppingEngine> = match self {
            EngineSource::Evolution => Box::new(EvolutionEngine::new(params.clone(), rng)?),
            EngineSource::Unavailable(reason) => {
                return Err(EngineError::Unavailable(reason.clone()));
            }
            EngineSource::Custom(construct) => construct(params, rng)?,
        };

        if engine.api_version() != ENGINE_API_VERSION {
            return Err(EngineError::Incompatible {
                expected: ENGINE_API_VERSION,
                found: engine.api_version(),
            });
        }

        Ok(engine)
    }
}

impl fmt::Debug for EngineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineSource::Evolution => write!(f, "Evolution"),
            EngineSource::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
            EngineSource::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_fitness() {
        let stats = GenerationStats::from_fitness(3, &[1.0, 4.0, 7.0]);
        assert_eq!(stats.generation, 3);
        assert_eq!(stats.min_fitness, 1.0);
        assert_eq!(stats.max_fitness, 7.0);
        assert!((stats.avg_fitness - 4.0).abs() < 1e-6);
    }

    #[test]
    fn stats_of_empty_population() {
        let stats = GenerationStats::from_fitness(0, &[]);
        assert_eq!(stats.max_fitness, 0.0);
        assert_eq!(stats.avg_fitness, 0.0);
    }
}
