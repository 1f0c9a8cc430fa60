//! Evolution engine: animals with neural brains that learn to find food.
//!
//! Each tick animals move, eat food they sweep over, look around with a ray
//! sensor per vision sector and let their brain pick the next speed and
//! heading. Training breeds the next population from the food each animal ate.

use std::f32::consts::TAU;

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;
use rand::Rng;
use rayon::prelude::*;

use super::{EngineKind, GenerationStats, SteppingEngine};
use crate::simulation::brain::Brain;
use crate::simulation::error::{EngineError, ParamsError};
use crate::simulation::food::Food;
use crate::simulation::genetics::{GeneticAlgorithm, Individual};
use crate::simulation::geometric_utils::{
    line_circle_distance, normalize_angle, seam_shifts, toroidal_delta, wrap,
};
use crate::simulation::params::{EvolutionParams, Params};
use crate::simulation::rng::SimRng;
use crate::simulation::world::{self, Animal, World};

type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Brain outputs: speed change and heading change.
const BRAIN_OUTPUTS: usize = 2;

/// Hidden state of one animal, parallel to `World::animals`.
#[derive(Debug, Clone)]
struct Agent {
    brain: Brain,
    speed: f32,
    /// Food eaten in the current generation.
    satiation: u32,
}

impl Agent {
    fn new(brain: Brain, params: &EvolutionParams) -> Self {
        Self {
            brain,
            speed: (params.speed_min + params.speed_max) / 2.0,
            satiation: 0,
        }
    }
}

/// Neural-network engine with genetic training.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    params: Params,
    topology: Vec<usize>,
    world: World,
    agents: Vec<Agent>,
    ga: GeneticAlgorithm,
    rng: SimRng,
    generation: u32,
    last_generation: Option<GenerationStats>,
}

impl EvolutionEngine {
    /// Creates the engine with a random first population.
    pub fn new(params: Params, mut rng: SimRng) -> Result<Self, EngineError> {
        params.validate()?;
        validate_evolution(&params.evolution)?;

        let topology = vec![
            params.vision_sectors,
            params.evolution.hidden_size,
            BRAIN_OUTPUTS,
        ];
        let world = World::new_random(&mut rng, &params);
        let agents = random_agents(&mut rng, &params, &topology);
        let ga = GeneticAlgorithm::new(
            params.evolution.mutation_chance,
            params.evolution.mutation_coeff,
        );

        Ok(Self {
            params,
            topology,
            world,
            agents,
            ga,
            rng,
            generation: 0,
            last_generation: None,
        })
    }

    /// Generations trained since the last reset.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Food eaten by each animal in the current generation.
    pub fn fitness(&self) -> Vec<f32> {
        self.agents.iter().map(|a| a.satiation as f32).collect()
    }

    /// Computes one tick into fresh buffers and commits it only if every stage succeeded.
    fn try_step(&mut self) -> Result<(), KdTreeError> {
        let evo = &self.params.evolution;
        let (width, height) = (self.world.width, self.world.height);

        let food_tree = build_tree(&self.world.food)?;

        // movement, remembering the swept segment for collisions
        let mut animals = self.world.animals.clone();
        let mut segments = Vec::with_capacity(animals.len());
        for (animal, agent) in animals.iter_mut().zip(&self.agents) {
            let start = animal.pos();
            let [dx, dy] = animal.heading();
            let end = [start[0] + dx * agent.speed, start[1] + dy * agent.speed];
            animal.x = wrap(end[0], width);
            animal.y = wrap(end[1], height);
            segments.push((start, end, agent.speed));
        }

        // eating: each food point feeds at most one animal and respawns elsewhere;
        // `end` is left unwrapped, so food is measured at its image nearest `start`
        let mut food = self.world.food.clone();
        let mut eaten = vec![false; food.len()];
        let mut meals = vec![0u32; animals.len()];
        for (i, (start, end, speed)) in segments.iter().enumerate() {
            let reach = speed + evo.eat_radius;
            for food_id in within_wrapped(&food_tree, *start, reach, width, height) {
                let [fx, fy] = food[food_id].pos();
                let image = [
                    start[0] + toroidal_delta(start[0], fx, width),
                    start[1] + toroidal_delta(start[1], fy, height),
                ];
                if !eaten[food_id] && line_circle_distance(*start, *end, image) <= evo.eat_radius {
                    eaten[food_id] = true;
                    meals[i] += 1;
                }
            }
        }
        for (item, _) in food.iter_mut().zip(&eaten).filter(|(_, e)| **e) {
            *item = Food::new_random(&mut self.rng, width, height);
        }

        // perception and decisions against the post-tick food layout
        let food_tree = build_tree(&food)?;
        let visions: Vec<Vec<f32>> = animals
            .par_iter()
            .map(|animal| perceive(animal, &food, &food_tree, evo, [width, height]))
            .collect();
        let decisions: Vec<Array1<f32>> = self
            .agents
            .par_iter()
            .zip(visions.par_iter())
            .map(|(agent, vision)| agent.brain.think(&Array1::from_vec(vision.clone())))
            .collect();

        for (((animal, agent), vision), decision) in animals
            .iter_mut()
            .zip(self.agents.iter_mut())
            .zip(visions)
            .zip(decisions)
        {
            agent.speed =
                (agent.speed + decision[0] * evo.speed_accel).clamp(evo.speed_min, evo.speed_max);
            animal.rotation += decision[1] * evo.rotation_accel;
            animal.vision = vision;
        }
        for (agent, meals) in self.agents.iter_mut().zip(meals) {
            agent.satiation += meals;
        }

        self.world.animals = animals;
        self.world.food = food;
        Ok(())
    }
}

impl SteppingEngine for EvolutionEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::External
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn step(&mut self) {
        if let Err(e) = self.try_step() {
            log::warn!("evolution engine skipped a tick: {e:?}");
        }
    }

    fn train(&mut self) {
        let population: Vec<Individual> = self
            .agents
            .iter()
            .map(|agent| Individual {
                fitness: agent.satiation as f32,
                chromosome: agent.brain.to_chromosome(),
            })
            .collect();
        let stats = GenerationStats::from_fitness(self.generation, &self.fitness());

        let children = self.ga.evolve(&mut self.rng, &population);
        self.agents = children
            .iter()
            .map(|genes| {
                Agent::new(
                    Brain::from_chromosome(&self.topology, genes),
                    &self.params.evolution,
                )
            })
            .collect();

        let rng = &mut self.rng;
        let params = &self.params;
        self.world.animals = self
            .agents
            .iter()
            .map(|_| {
                let mut animal = Animal::new_random(rng, params);
                animal.vision.fill(0.0);
                animal
            })
            .collect();
        self.world.food = world::random_food(rng, params);

        log::info!(
            "generation {} done: min={:.2} max={:.2} avg={:.2}",
            stats.generation,
            stats.min_fitness,
            stats.max_fitness,
            stats.avg_fitness
        );
        self.generation += 1;
        self.last_generation = Some(stats);
    }

    fn reset(&mut self) {
        self.world = World::new_random(&mut self.rng, &self.params);
        self.agents = random_agents(&mut self.rng, &self.params, &self.topology);
        self.generation = 0;
        self.last_generation = None;
    }

    fn last_generation(&self) -> Option<GenerationStats> {
        self.last_generation
    }
}

fn validate_evolution(params: &EvolutionParams) -> Result<(), ParamsError> {
    if params.fov_range.is_nan() || params.fov_range <= 0.0 {
        return Err(ParamsError::Evolution("fov_range must be positive"));
    }
    let speed_range_ok = params.speed_min >= 0.0 && params.speed_min <= params.speed_max;
    if !speed_range_ok {
        return Err(ParamsError::Evolution("speed_min must lie in 0..=speed_max"));
    }
    if params.hidden_size == 0 {
        return Err(ParamsError::Evolution("hidden_size must be at least 1"));
    }
    Ok(())
}

fn random_agents(rng: &mut SimRng, params: &Params, topology: &[usize]) -> Vec<Agent> {
    (0..params.n_animals)
        .map(|_| Agent::new(Brain::new_random(rng, topology), &params.evolution))
        .collect()
}

fn build_tree(food: &[Food]) -> Result<Tree2D, KdTreeError> {
    let mut tree = KdTree::with_capacity(2, food.len().max(1));
    for (i, item) in food.iter().enumerate() {
        tree.add(item.pos().to_vec(), i)?;
    }
    Ok(tree)
}

/// Food ids within `radius` of `point` on the torus, found by also querying the
/// images of `point` across every seam the disc overlaps. Sorted, no repeats.
fn within_wrapped(
    tree: &Tree2D,
    point: [f32; 2],
    radius: f32,
    width: f32,
    height: f32,
) -> Vec<usize> {
    let mut ids = Vec::new();
    for shift_x in seam_shifts(point[0], radius, width) {
        for shift_y in seam_shifts(point[1], radius, height) {
            let query = [point[0] + shift_x, point[1] + shift_y];
            let found = tree
                .within(&query, radius * radius, &squared_euclidean)
                .unwrap_or_default();
            ids.extend(found.into_iter().map(|(_, &id)| id));
        }
    }
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Ray sensor: every food point within `fov_range` adds to the sector it lies in,
/// more strongly the closer it is. Distances and bearings follow the shortest
/// way round the `[width, height]` torus.
fn perceive(
    animal: &Animal,
    food: &[Food],
    tree: &Tree2D,
    params: &EvolutionParams,
    [width, height]: [f32; 2],
) -> Vec<f32> {
    let sectors = animal.vision.len();
    let mut readings = vec![0.0; sectors];

    for food_id in within_wrapped(tree, animal.pos(), params.fov_range, width, height) {
        let target = &food[food_id];
        let dx = toroidal_delta(animal.x, target.x, width);
        let dy = toroidal_delta(animal.y, target.y, height);
        let distance = dx.hypot(dy);
        if distance <= f32::EPSILON || distance > params.fov_range {
            continue;
        }

        let bearing = dy.atan2(dx);
        let relative = normalize_angle(bearing - animal.rotation);
        let sector = ((relative / TAU) * sectors as f32) as usize;
        readings[sector.min(sectors - 1)] += (params.fov_range - distance) / params.fov_range;
    }

    readings
}
