//! Feed-forward neural network driving animals in the evolution engine.
//!
//! A brain is a stack of fully connected [`Layer`]s with tanh activation. For the
//! genetic algorithm it flattens into a chromosome and is rebuilt from one.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One fully connected layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Layer {
    /// Creates a layer with weights and biases uniform in `[-scale, scale)`.
    pub fn new_random(
        rng: &mut impl Rng,
        input_size: usize,
        output_size: usize,
        scale: f32,
    ) -> Self {
        Self {
            weights: Array2::from_shape_fn((output_size, input_size), |_| {
                rng.random_range(-scale..scale)
            }),
            biases: Array1::from_shape_fn(output_size, |_| rng.random_range(-scale..scale)),
        }
    }

    /// Builds a layer from `genes`, biases first, then weights row by row.
    fn from_genes(input_size: usize, output_size: usize, genes: &[f32]) -> Self {
        let (biases, weights) = genes.split_at(output_size);
        Self {
            weights: Array2::from_shape_fn((output_size, input_size), |(row, col)| {
                weights[row * input_size + col]
            }),
            biases: Array1::from_vec(biases.to_vec()),
        }
    }

    /// Number of genes this layer occupies in a chromosome.
    fn gene_count(input_size: usize, output_size: usize) -> usize {
        output_size * (input_size + 1)
    }

    /// Performs forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }
}

/// Multi-layer perceptron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Layer>,
}

impl Brain {
    /// Creates a brain with random weights for the given layer sizes.
    pub fn new_random(rng: &mut impl Rng, topology: &[usize]) -> Self {
        let layers = topology
            .windows(2)
            .map(|pair| Layer::new_random(rng, pair[0], pair[1], 1.0))
            .collect();

        Self { layers }
    }

    /// Chromosome length of a brain with this topology.
    pub fn chromosome_len(topology: &[usize]) -> usize {
        topology
            .windows(2)
            .map(|pair| Layer::gene_count(pair[0], pair[1]))
            .sum()
    }

    /// Rebuilds a brain from a chromosome produced by [`Brain::to_chromosome`].
    ///
    /// `genes` must hold exactly [`Brain::chromosome_len`] values.
    pub fn from_chromosome(topology: &[usize], genes: &[f32]) -> Self {
        debug_assert_eq!(genes.len(), Self::chromosome_len(topology));

        let mut offset = 0;
        let layers = topology
            .windows(2)
            .map(|pair| {
                let len = Layer::gene_count(pair[0], pair[1]);
                let layer = Layer::from_genes(pair[0], pair[1], &genes[offset..offset + len]);
                offset += len;
                layer
            })
            .collect();

        Self { layers }
    }

    /// Flattens all biases and weights into a single vector.
    pub fn to_chromosome(&self) -> Vec<f32> {
        let mut flat = Vec::new();
        for layer in &self.layers {
            flat.extend(layer.biases.iter().copied());
            flat.extend(layer.weights.iter().copied());
        }
        flat
    }

    /// Runs a forward pass through the brain.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }
}
