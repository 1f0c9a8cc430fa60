//! Genetic algorithm over flat `f32` chromosomes.
//!
//! Selection is roulette-wheel by fitness, crossover picks each gene from either
//! parent with equal chance, and mutation nudges a gene by a bounded random amount.

use rand::Rng;
use rand::seq::IndexedRandom;

/// A chromosome together with the fitness it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// How well the individual did; must be non-negative.
    pub fitness: f32,
    /// Genes of the individual.
    pub chromosome: Vec<f32>,
}

/// Selection, crossover and mutation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticAlgorithm {
    /// Probability that a single gene mutates.
    pub mutation_chance: f32,
    /// Largest absolute change applied to a mutated gene.
    pub mutation_coeff: f32,
}

impl GeneticAlgorithm {
    /// Creates the algorithm. `mutation_chance` must lie in `[0, 1]`.
    pub fn new(mutation_chance: f32, mutation_coeff: f32) -> Self {
        Self {
            mutation_chance,
            mutation_coeff,
        }
    }

    /// Breeds a new population of the same size.
    pub fn evolve(&self, rng: &mut impl Rng, population: &[Individual]) -> Vec<Vec<f32>> {
        (0..population.len())
            .filter_map(|_| {
                let parent_a = select(rng, population)?;
                let parent_b = select(rng, population)?;
                let mut child = crossover(rng, &parent_a.chromosome, &parent_b.chromosome);
                self.mutate(rng, &mut child);
                Some(child)
            })
            .collect()
    }

    /// Mutates genes in place.
    pub fn mutate(&self, rng: &mut impl Rng, chromosome: &mut [f32]) {
        for gene in chromosome.iter_mut() {
            if rng.random_bool(f64::from(self.mutation_chance)) {
                let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
                *gene += sign * self.mutation_coeff * rng.random::<f32>();
            }
        }
    }
}

/// Roulette-wheel selection. Falls back to a uniform pick when nobody scored.
pub fn select<'a>(rng: &mut impl Rng, population: &'a [Individual]) -> Option<&'a Individual> {
    population
        .choose_weighted(rng, |individual| individual.fitness.max(0.0))
        .ok()
        .or_else(|| population.choose(rng))
}

/// Uniform crossover: every gene comes from either parent with equal chance.
pub fn crossover(rng: &mut impl Rng, parent_a: &[f32], parent_b: &[f32]) -> Vec<f32> {
    parent_a
        .iter()
        .zip(parent_b)
        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng;

    fn individual(fitness: f32, genes: &[f32]) -> Individual {
        Individual {
            fitness,
            chromosome: genes.to_vec(),
        }
    }

    #[test]
    fn selection_favours_fitter_individuals() {
        let mut rng = rng::seeded(Some(0));
        let population = vec![
            individual(1.0, &[0.0]),
            individual(2.0, &[1.0]),
            individual(3.0, &[2.0]),
            individual(4.0, &[3.0]),
        ];

        let mut counts = [0usize; 4];
        for _ in 0..1000 {
            let chosen = select(&mut rng, &population).unwrap();
            counts[chosen.chromosome[0] as usize] += 1;
        }

        assert!(counts[3] > counts[0]);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn selection_with_zero_fitness_still_picks() {
        let mut rng = rng::seeded(Some(1));
        let population = vec![individual(0.0, &[1.0]), individual(0.0, &[2.0])];
        assert!(select(&mut rng, &population).is_some());
        assert!(select(&mut rng, &[]).is_none());
    }

    #[test]
    fn crossover_takes_genes_from_parents() {
        let mut rng = rng::seeded(Some(2));
        let a: Vec<f32> = (0..100).map(|_| 0.0).collect();
        let b: Vec<f32> = (0..100).map(|_| 1.0).collect();
        let child = crossover(&mut rng, &a, &b);

        assert_eq!(child.len(), 100);
        let from_b = child.iter().filter(|&&g| g == 1.0).count();
        assert!(from_b > 30 && from_b < 70);
        assert!(child.iter().all(|&g| g == 0.0 || g == 1.0));
    }

    #[test]
    fn mutation_respects_chance_and_coeff() {
        let mut rng = rng::seeded(Some(3));
        let untouched = GeneticAlgorithm::new(0.0, 0.5);
        let mut genes = vec![1.0; 50];
        untouched.mutate(&mut rng, &mut genes);
        assert!(genes.iter().all(|&g| g == 1.0));

        let always = GeneticAlgorithm::new(1.0, 0.5);
        always.mutate(&mut rng, &mut genes);
        assert!(genes.iter().any(|&g| g != 1.0));
        assert!(genes.iter().all(|&g| (g - 1.0).abs() <= 0.5));
    }

    #[test]
    fn evolve_keeps_population_size() {
        let mut rng = rng::seeded(Some(4));
        let ga = GeneticAlgorithm::new(0.1, 0.3);
        let population = vec![
            individual(0.0, &[0.0, 0.0, 0.0]),
            individual(1.0, &[1.0, 1.0, 1.0]),
            individual(2.0, &[1.0, 2.0, 1.0]),
        ];

        let next = ga.evolve(&mut rng, &population);
        assert_eq!(next.len(), 3);
        assert!(next.iter().all(|c| c.len() == 3));
    }
}
