use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ParamsError;

/// Simulation parameters shared by both stepping engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
    /// Animals created on reset.
    pub n_animals: usize,
    /// Food points created on reset and train.
    pub n_food: usize,
    /// Upper bound on food points for the fallback engine.
    pub food_capacity: usize,
    /// Number of vision sectors per animal, spread over a full turn.
    pub vision_sectors: usize,
    /// Distance travelled per tick by the fallback engine.
    pub fallback_speed: f32,
    /// Per-tick probability of a heading change in the fallback engine.
    pub turn_probability: f32,
    /// Width of the symmetric heading offset range, in radians.
    pub turn_range: f32,
    /// Per-tick probability that a single food point disappears.
    pub food_eaten_probability: f32,
    /// Per-tick probability that one food point appears.
    pub food_spawn_probability: f32,
    /// Seed for the simulation RNG. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Tuning of the evolution engine.
    pub evolution: EvolutionParams,
}

/// Tuning of the evolution engine: eye, brain and genetic algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// How far an animal can see.
    pub fov_range: f32,
    /// Distance at which an animal eats a food point.
    pub eat_radius: f32,
    /// Slowest an animal can move per tick.
    pub speed_min: f32,
    /// Fastest an animal can move per tick.
    pub speed_max: f32,
    /// Largest speed change per tick.
    pub speed_accel: f32,
    /// Largest heading change per tick, in radians.
    pub rotation_accel: f32,
    /// Hidden layer width of the brain.
    pub hidden_size: usize,
    /// Per-gene mutation probability.
    pub mutation_chance: f32,
    /// Largest absolute change of a mutated gene.
    pub mutation_coeff: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            n_animals: 10,
            n_food: 20,
            food_capacity: 30,
            vision_sectors: 8,
            fallback_speed: 2.0,
            turn_probability: 0.02,
            turn_range: PI / 2.0,
            food_eaten_probability: 0.01,
            food_spawn_probability: 0.1,
            seed: None,
            evolution: EvolutionParams::default(),
        }
    }
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            fov_range: 200.0,
            eat_radius: 8.0,
            speed_min: 0.5,
            speed_max: 4.0,
            speed_accel: 0.2,
            rotation_accel: PI / 16.0,
            hidden_size: 16,
            mutation_chance: 0.01,
            mutation_coeff: 0.3,
        }
    }
}

impl Params {
    /// Reads parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that the parameters describe a world both engines can run.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ParamsError::NonPositiveBounds {
                width: self.width,
                height: self.height,
            });
        }
        if self.vision_sectors == 0 {
            return Err(ParamsError::NoVisionSectors);
        }
        if self.food_capacity < self.n_food {
            return Err(ParamsError::CapacityBelowDefault {
                capacity: self.food_capacity,
                food: self.n_food,
            });
        }

        let probabilities = [
            ("turn_probability", self.turn_probability),
            ("food_eaten_probability", self.food_eaten_probability),
            ("food_spawn_probability", self.food_spawn_probability),
            ("evolution.mutation_chance", self.evolution.mutation_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::Probability { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_width() {
        let params = Params {
            width: 0.0,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::NonPositiveBounds { .. })
        ));
    }

    #[test]
    fn rejects_capacity_below_food_count() {
        let params = Params {
            food_capacity: 5,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::CapacityBelowDefault {
                capacity: 5,
                food: 20
            })
        ));
    }

    #[test]
    fn rejects_bad_probability() {
        let params = Params {
            food_spawn_probability: 1.5,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::Probability {
                name: "food_spawn_probability",
                ..
            })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: Params = serde_json::from_str(r#"{ "n_animals": 4, "seed": 7 }"#).unwrap();
        assert_eq!(params.n_animals, 4);
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.vision_sectors, 8);
        assert_eq!(params.evolution, EvolutionParams::default());
    }
}
