//! # Shorelark - Artificial Life Simulation Driver
//!
//! A small world of animals and food, advanced tick by tick by a pluggable
//! stepping engine and generation by generation through training.
//!
//! ## Features
//!
//! - Neural network brains (MLP with tanh activation) evolved by a genetic algorithm
//! - Ray-cast vision over food, split into sectors
//! - A self-contained fallback engine used whenever the evolution engine cannot be built
//! - Frame pacing at a configurable tick rate, with no catch-up after pauses
//! - Periodic auto-training while the simulation runs
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::driver`] - Engine selection and the step/train/reset entry points
//! - [`simulation::engine`] - The stepping engine trait and its implementations
//! - [`simulation::control`] - Run control, generation counter and terminal log
//! - [`simulation::pacing`] - Frame pacing for the render loop
//! - [`simulation::auto_train`] - Periodic training coordinator

/// Core simulation logic and data structures.
pub mod simulation {
    /// Periodic training while the simulation runs.
    pub mod auto_train;
    /// Neural network implementation for animal brains.
    pub mod brain;
    /// Run control tying the driver to the render loop and the control panel.
    pub mod control;
    /// Owner of the world and entry point for step, train and reset.
    pub mod driver;
    /// Stepping engines that advance the world.
    pub mod engine;
    /// Error types.
    pub mod error;
    /// Bounded log of control messages.
    pub mod event_log;
    /// Food points animals can eat.
    pub mod food;
    /// Selection, crossover and mutation over flat chromosomes.
    pub mod genetics;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Frame pacing for the render loop.
    pub mod pacing;
    /// Simulation parameters.
    pub mod params;
    /// Seedable random number generation.
    pub mod rng;
    /// World state: bounds, animals and food.
    pub mod world;
}
