#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use shorelark::simulation::engine::{EngineKind, FallbackEngine, SteppingEngine};
use shorelark::simulation::params::Params;
use shorelark::simulation::rng;

fn create_engine(params: Params, seed: u64) -> FallbackEngine {
    FallbackEngine::new(params, rng::seeded(Some(seed))).unwrap()
}

#[test]
fn test_animals_stay_inside_arena() {
    // small arena so every animal wraps many times
    let params = Params {
        width: 50.0,
        height: 30.0,
        turn_probability: 0.5,
        ..Params::default()
    };
    let mut engine = create_engine(params, 11);

    for _ in 0..2000 {
        engine.step();
        let world = engine.world();
        for animal in &world.animals {
            assert!(animal.x >= 0.0 && animal.x < world.width, "x = {}", animal.x);
            assert!(animal.y >= 0.0 && animal.y < world.height, "y = {}", animal.y);
        }
    }
}

#[test]
fn test_vision_length_is_constant() {
    let params = Params {
        vision_sectors: 5,
        ..Params::default()
    };
    let mut engine = create_engine(params, 12);

    for _ in 0..100 {
        engine.step();
        for animal in &engine.world().animals {
            assert_eq!(animal.vision.len(), 5);
            assert!(animal.vision.iter().all(|&v| (0.0..1.0).contains(&v)));
        }
    }
    engine.train();
    assert!(engine.world().animals.iter().all(|a| a.vision.len() == 5));
}

#[test]
fn test_food_never_exceeds_capacity() {
    let params = Params {
        food_spawn_probability: 1.0,
        food_eaten_probability: 0.0,
        ..Params::default()
    };
    let capacity = params.food_capacity;
    let mut engine = create_engine(params, 13);

    for _ in 0..1000 {
        engine.step();
        assert!(engine.world().food.len() <= capacity);
    }
    assert_eq!(engine.world().food.len(), capacity);
}

#[test]
fn test_food_disappears_without_proximity() {
    let params = Params {
        n_animals: 0,
        food_eaten_probability: 1.0,
        food_spawn_probability: 0.0,
        ..Params::default()
    };
    let mut engine = create_engine(params, 14);

    engine.step();
    assert!(engine.world().food.is_empty());
}

#[test]
fn test_headings_only_change_when_turning() {
    let params = Params {
        turn_probability: 0.0,
        ..Params::default()
    };
    let mut engine = create_engine(params, 15);
    let before: Vec<f32> = engine.world().animals.iter().map(|a| a.rotation).collect();

    for _ in 0..100 {
        engine.step();
    }

    let after: Vec<f32> = engine.world().animals.iter().map(|a| a.rotation).collect();
    assert_eq!(before, after);
}

#[test]
fn test_reset_yields_defaults() {
    let params = Params {
        food_spawn_probability: 1.0,
        ..Params::default()
    };
    let mut engine = create_engine(params.clone(), 16);

    for _ in 0..300 {
        engine.step();
    }
    engine.reset();

    assert_eq!(engine.kind(), EngineKind::Fallback);
    assert_eq!(engine.world().animals.len(), params.n_animals);
    assert_eq!(engine.world().food.len(), params.n_food);
    assert_eq!(engine.world().width, params.width);
    assert_eq!(engine.world().height, params.height);
}
