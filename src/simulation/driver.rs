//! Simulation driver: owns the world through the selected stepping engine.
//!
//! The driver is the only entry point the render loop and controls use. It picks
//! an engine once in [`SimulationDriver::initialize`] and forwards `step`, `train`
//! and `reset` to it. Calls made before initialization are silently ignored.

use super::engine::{EngineKind, EngineSource, FallbackEngine, GenerationStats, SteppingEngine};
use super::error::InitError;
use super::params::Params;
use super::rng::{self, SimRng};
use super::world::World;

/// Successful initialization, naming the engine that ended up in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    /// Engine variant selected at initialization.
    pub engine: EngineKind,
}

/// Owner of the simulation state.
pub struct SimulationDriver {
    params: Params,
    source: EngineSource,
    engine: Option<Box<dyn SteppingEngine>>,
    rng: Option<SimRng>,
}

impl SimulationDriver {
    /// Creates an uninitialized driver. The RNG is seeded from `params.seed`.
    pub fn new(params: Params, source: EngineSource) -> Self {
        let rng = rng::seeded(params.seed);
        Self::with_rng(params, source, rng)
    }

    /// Creates an uninitialized driver that will hand `rng` to the selected engine.
    pub fn with_rng(params: Params, source: EngineSource, rng: SimRng) -> Self {
        Self {
            params,
            source,
            engine: None,
            rng: Some(rng),
        }
    }

    /// Selects the stepping engine.
    ///
    /// The external engine is tried first; any failure to construct it falls back
    /// to [`FallbackEngine`] and still succeeds. Only a failure of the fallback
    /// itself is reported. Calling this again once initialized changes nothing.
    pub fn initialize(&mut self) -> Result<Ready, InitError> {
        if let Some(engine) = &self.engine {
            return Ok(Ready {
                engine: engine.kind(),
            });
        }

        let rng = self.rng.take().unwrap_or_else(|| rng::seeded(self.params.seed));
        let engine: Box<dyn SteppingEngine> =
            match self.source.construct(&self.params, rng.clone()) {
                Ok(engine) => {
                    log::info!("simulation initialized with the external engine");
                    engine
                }
                Err(e) => {
                    log::warn!("external engine unavailable, using fallback: {e}");
                    match FallbackEngine::new(self.params.clone(), rng.clone()) {
                        Ok(engine) => Box::new(engine),
                        Err(e) => {
                            log::error!("fallback engine failed: {e}");
                            self.rng = Some(rng);
                            return Err(InitError::NoEngine(e));
                        }
                    }
                }
            };

        let kind = engine.kind();
        self.engine = Some(engine);
        Ok(Ready { engine: kind })
    }

    /// True once an engine has been selected.
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Engine variant in charge, if initialized.
    pub fn engine_kind(&self) -> Option<EngineKind> {
        self.engine.as_ref().map(|e| e.kind())
    }

    /// Current world, or `None` before initialization.
    ///
    /// The borrow ends before the next mutating call, so callers always see a
    /// fully advanced world.
    pub fn world(&self) -> Option<&World> {
        self.engine.as_deref().map(|engine| engine.world())
    }

    /// Advances the world by one tick. No-op before initialization.
    pub fn step(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.step();
        }
    }

    /// Advances the simulation by one generation. No-op before initialization.
    pub fn train(&mut self) {
        match self.engine.as_mut() {
            Some(engine) => engine.train(),
            None => log::debug!("train ignored: simulation not initialized"),
        }
    }

    /// Replaces the world with a fresh initial one. No-op before initialization.
    pub fn reset(&mut self) {
        match self.engine.as_mut() {
            Some(engine) => {
                engine.reset();
                log::info!("simulation reset");
            }
            None => log::debug!("reset ignored: simulation not initialized"),
        }
    }

    /// Statistics of the last trained generation, when the engine tracks them.
    pub fn last_generation(&self) -> Option<GenerationStats> {
        self.engine.as_ref().and_then(|e| e.last_generation())
    }

    /// Parameters the driver was created with.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl std::fmt::Debug for SimulationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationDriver")
            .field("source", &self.source)
            .field("engine", &self.engine_kind())
            .finish_non_exhaustive()
    }
}
