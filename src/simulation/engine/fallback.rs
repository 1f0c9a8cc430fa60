//! Self-contained stand-in engine used when no external engine is available.
//!
//! Animals drift along their heading with occasional random turns, vision is
//! random noise and food appears and disappears by chance. Nothing learns.

use rand::Rng;

use super::{EngineKind, SteppingEngine};
use crate::simulation::error::EngineError;
use crate::simulation::food::Food;
use crate::simulation::geometric_utils::wrap_around_mut;
use crate::simulation::params::Params;
use crate::simulation::rng::SimRng;
use crate::simulation::world::{self, World};

/// Kinematics-only engine with stochastic food dynamics.
#[derive(Debug, Clone)]
pub struct FallbackEngine {
    params: Params,
    world: World,
    rng: SimRng,
}

impl FallbackEngine {
    /// Creates the engine and its initial world.
    pub fn new(params: Params, mut rng: SimRng) -> Result<Self, EngineError> {
        params.validate()?;
        let world = World::new_random(&mut rng, &params);

        Ok(Self { params, world, rng })
    }
}

impl SteppingEngine for FallbackEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Fallback
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn step(&mut self) {
        let params = &self.params;
        let rng = &mut self.rng;
        let world = &mut self.world;

        for animal in &mut world.animals {
            let [dx, dy] = animal.heading();
            animal.x += dx * params.fallback_speed;
            animal.y += dy * params.fallback_speed;
            wrap_around_mut(&mut animal.x, &mut animal.y, world.width, world.height);

            if rng.random::<f32>() < params.turn_probability {
                animal.rotation += (rng.random::<f32>() - 0.5) * params.turn_range;
            }

            for reading in &mut animal.vision {
                *reading = rng.random();
            }
        }

        world
            .food
            .retain(|_| rng.random::<f32>() >= params.food_eaten_probability);

        if rng.random::<f32>() < params.food_spawn_probability
            && world.food.len() < params.food_capacity
        {
            world
                .food
                .push(Food::new_random(rng, world.width, world.height));
        }
    }

    fn train(&mut self) {
        let params = &self.params;
        let rng = &mut self.rng;

        for animal in &mut self.world.animals {
            animal.x = rng.random_range(0.0..params.width);
            animal.y = rng.random_range(0.0..params.height);
            animal.rotation = rng.random_range(0.0..std::f32::consts::TAU);
        }
        self.world.food = world::random_food(rng, params);

        log::debug!(
            "fallback train: scattered {} animals, {} food",
            self.world.animals.len(),
            self.world.food.len()
        );
    }

    fn reset(&mut self) {
        self.world = World::new_random(&mut self.rng, &self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng;

    fn engine(seed: u64) -> FallbackEngine {
        FallbackEngine::new(Params::default(), rng::seeded(Some(seed))).unwrap()
    }

    #[test]
    fn step_moves_animals_by_speed() {
        let mut engine = FallbackEngine::new(
            Params {
                turn_probability: 0.0,
                ..Params::default()
            },
            rng::seeded(Some(1)),
        )
        .unwrap();
        let before = engine.world().animals[0].clone();
        engine.step();
        let after = &engine.world().animals[0];

        let expected_x = (before.x + before.rotation.cos() * 2.0).rem_euclid(800.0);
        let expected_y = (before.y + before.rotation.sin() * 2.0).rem_euclid(500.0);
        assert!((after.x - expected_x).abs() < 1e-3);
        assert!((after.y - expected_y).abs() < 1e-3);
        assert_eq!(after.rotation, before.rotation);
    }

    #[test]
    fn animal_order_is_stable_across_ticks() {
        let mut engine = FallbackEngine::new(
            Params {
                turn_probability: 0.0,
                ..Params::default()
            },
            rng::seeded(Some(2)),
        )
        .unwrap();
        let headings: Vec<f32> = engine.world().animals.iter().map(|a| a.rotation).collect();
        for _ in 0..20 {
            engine.step();
        }
        let after: Vec<f32> = engine.world().animals.iter().map(|a| a.rotation).collect();
        assert_eq!(headings, after);
    }

    #[test]
    fn train_restores_default_food() {
        let mut engine = engine(4);
        engine.world.food.clear();
        engine.train();
        assert_eq!(engine.world().food.len(), 20);
        assert_eq!(engine.world().animals.len(), 10);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = engine(9);
        let mut b = engine(9);
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.world(), b.world());
    }

    #[test]
    fn rejects_invalid_params() {
        let params = Params {
            vision_sectors: 0,
            ..Params::default()
        };
        assert!(FallbackEngine::new(params, rng::seeded(Some(0))).is_err());
    }
}
