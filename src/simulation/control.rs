//! Run control: everything the control panel can ask of the simulation.
//!
//! [`Controller`] owns the driver together with the two cooperating loops (the
//! frame pacer and the auto-train coordinator), the generation counter and the
//! terminal log. The host calls [`Controller::frame`] once per rendered frame;
//! every other method is a direct user action. All of it runs on one thread and
//! each call finishes before the next begins, so a train or reset always lands
//! between two steps.

use super::auto_train::AutoTrainCoordinator;
use super::driver::{Ready, SimulationDriver};
use super::engine::{EngineKind, EngineSource, GenerationStats};
use super::error::{ControlError, InitError};
use super::event_log::{EventColor, EventLog};
use super::pacing::{FramePacer, FrameRequest};
use super::params::Params;
use super::world::World;

const WELCOME: [&str; 4] = [
    "Welcome to Shorelark Simulation!",
    "This is a simulation of artificial life and evolution.",
    "Use the controls to start, pause, and adjust the simulation.",
    "Train the simulation to evolve better organisms over generations.",
];

/// Called with the freshly stepped world after every step.
pub type StepObserver = Box<dyn FnMut(&World)>;

/// What happened during one host frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The world advanced by one tick.
    pub stepped: bool,
    /// Auto-train advanced a generation.
    pub trained: bool,
}

/// Owner of the driver and its run state.
pub struct Controller {
    driver: SimulationDriver,
    pacer: FramePacer,
    pending_frame: Option<FrameRequest>,
    auto_train: AutoTrainCoordinator,
    generation: u32,
    log: EventLog,
    stats: Vec<GenerationStats>,
    step_observer: Option<StepObserver>,
    /// Timestamp of the latest frame, used to stamp log messages.
    clock: f64,
}

impl Controller {
    /// Creates a paused controller around an uninitialized driver.
    pub fn new(params: Params, source: EngineSource) -> Self {
        Self::with_driver(SimulationDriver::new(params, source))
    }

    /// Creates a paused controller around `driver`.
    pub fn with_driver(driver: SimulationDriver) -> Self {
        let mut log = EventLog::default();
        for line in WELCOME {
            log.log(0.0, line, EventColor::Info);
        }

        Self {
            driver,
            pacer: FramePacer::default(),
            pending_frame: None,
            auto_train: AutoTrainCoordinator::default(),
            generation: 0,
            log,
            stats: Vec::new(),
            step_observer: None,
            clock: 0.0,
        }
    }

    /// Initializes the driver, logging which engine took charge.
    ///
    /// Safe to call again after a failure; once initialized it only reports
    /// the engine in use.
    pub fn initialize(&mut self) -> Result<Ready, InitError> {
        let first = !self.driver.is_initialized();
        match self.driver.initialize() {
            Ok(ready) => {
                if first {
                    match ready.engine {
                        EngineKind::External => self.log.log(
                            self.clock,
                            "Simulation engine loaded.",
                            EventColor::Info,
                        ),
                        EngineKind::Fallback => self.log.log(
                            self.clock,
                            "Simulation engine unavailable, running the fallback engine.",
                            EventColor::Warning,
                        ),
                    }
                }
                Ok(ready)
            }
            Err(e) => {
                self.log.log(
                    self.clock,
                    format!("Initialization failed: {e}"),
                    EventColor::Warning,
                );
                Err(e)
            }
        }
    }

    /// Registers a callback run with the world after every step.
    pub fn set_step_observer(&mut self, observer: impl FnMut(&World) + 'static) {
        self.step_observer = Some(Box::new(observer));
    }

    /// Starts or pauses the run.
    pub fn set_running(&mut self, running: bool) {
        if running {
            if let Some(request) = self.pacer.start() {
                self.pending_frame = Some(request);
            }
        } else {
            self.pacer.stop();
            self.pending_frame = None;
        }
        self.auto_train.set_running(running);
    }

    /// Flips between running and paused.
    pub fn toggle_running(&mut self) {
        self.set_running(!self.is_running());
    }

    /// Manually advances one generation. The run is paused first.
    ///
    /// Rejected while auto-train is enabled. Ignored before initialization.
    pub fn train(&mut self) -> Result<(), ControlError> {
        if self.auto_train.is_enabled() {
            self.log.log(
                self.clock,
                "Manual training is disabled while auto-training is on.",
                EventColor::Warning,
            );
            return Err(ControlError::AutoTrainActive);
        }
        if !self.driver.is_initialized() {
            log::debug!("manual train ignored: simulation not initialized");
            return Ok(());
        }

        self.set_running(false);
        self.log.log(
            self.clock,
            format!("Training generation {}...", self.generation + 1),
            EventColor::Training,
        );
        self.advance_generation();
        self.log.log(
            self.clock,
            format!("Training complete for generation {}!", self.generation),
            EventColor::Training,
        );
        Ok(())
    }

    /// Pauses and starts over from a fresh world at generation 0.
    ///
    /// Ignored before initialization.
    pub fn reset(&mut self) {
        if !self.driver.is_initialized() {
            log::debug!("reset ignored: simulation not initialized");
            return;
        }

        self.set_running(false);
        self.driver.reset();
        self.generation = 0;
        self.stats.clear();
        self.log.log(
            self.clock,
            "Simulation reset to initial state.",
            EventColor::Reset,
        );
    }

    /// Sets the tick rate in steps per second.
    pub fn set_speed(&mut self, rate: f32) -> Result<(), ControlError> {
        self.pacer.set_target_rate(rate).inspect_err(|e| {
            log::warn!("{e}");
        })?;
        Ok(())
    }

    /// Switches auto-train on or off.
    pub fn set_auto_train(&mut self, enabled: bool) {
        if enabled == self.auto_train.is_enabled() {
            return;
        }

        self.auto_train.set_enabled(enabled);
        let state = if enabled { "enabled" } else { "disabled" };
        self.log.log(self.clock, format!("Auto-training {state}."), EventColor::Info);
        if enabled {
            self.log.log(
                self.clock,
                format!(
                    "Will automatically train every {} seconds.",
                    self.auto_train.interval_secs()
                ),
                EventColor::Info,
            );
        }
    }

    /// Sets the auto-train interval in seconds.
    pub fn set_auto_train_interval(&mut self, secs: u64) -> Result<(), ControlError> {
        if secs == self.auto_train.interval_secs() {
            return Ok(());
        }
        self.auto_train.set_interval_secs(secs).inspect_err(|e| {
            log::warn!("{e}");
        })?;
        self.log.log(
            self.clock,
            format!("Auto-train interval set to {secs} seconds."),
            EventColor::Info,
        );
        Ok(())
    }

    /// Runs one host frame at timestamp `now` (ms).
    ///
    /// A due auto-train runs first, so the step in the same frame already sees
    /// the new generation.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        self.clock = now;
        let mut report = FrameReport::default();

        if self.auto_train.poll(now) && self.advance_generation() {
            self.log.log(
                now,
                format!("Auto-trained generation {}.", self.generation),
                EventColor::Training,
            );
            report.trained = true;
        }

        if let Some(request) = self.pending_frame.take() {
            let outcome = self.pacer.on_frame(request, now);
            if outcome.is_step() && self.driver.is_initialized() {
                self.driver.step();
                if let (Some(observer), Some(world)) =
                    (self.step_observer.as_mut(), self.driver.world())
                {
                    observer(world);
                }
                report.stepped = true;
            }
            self.pending_frame = outcome.next();
        }

        report
    }

    /// Current world, or `None` before initialization.
    pub fn world(&self) -> Option<&World> {
        self.driver.world()
    }

    /// Generations trained since start or the last reset.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Terminal messages.
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Fitness statistics of every generation trained since the last reset.
    pub fn stats_history(&self) -> &[GenerationStats] {
        &self.stats
    }

    /// Engine in charge, if initialized.
    pub fn engine_kind(&self) -> Option<EngineKind> {
        self.driver.engine_kind()
    }

    /// True once an engine has been selected.
    pub fn is_initialized(&self) -> bool {
        self.driver.is_initialized()
    }

    /// True while the frame loop is scheduled.
    pub fn is_running(&self) -> bool {
        self.pacer.is_running()
    }

    /// Tick rate in steps per second.
    pub fn speed(&self) -> f32 {
        self.pacer.target_rate()
    }

    /// Whether auto-train is switched on.
    pub fn auto_train_enabled(&self) -> bool {
        self.auto_train.is_enabled()
    }

    /// Auto-train interval in seconds.
    pub fn auto_train_interval_secs(&self) -> u64 {
        self.auto_train.interval_secs()
    }

    /// Time accumulated towards the next auto-train, in milliseconds.
    pub fn auto_train_elapsed_ms(&self) -> f64 {
        self.auto_train.elapsed_ms()
    }

    /// The driver, for read access to its parameters and statistics.
    pub fn driver(&self) -> &SimulationDriver {
        &self.driver
    }

    fn advance_generation(&mut self) -> bool {
        if !self.driver.is_initialized() {
            return false;
        }
        self.driver.train();
        self.generation += 1;
        if let Some(stats) = self.driver.last_generation() {
            self.stats.push(stats);
        }
        log::info!("generation {} trained", self.generation);
        true
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("driver", &self.driver)
            .field("running", &self.is_running())
            .field("generation", &self.generation)
            .field("auto_train", &self.auto_train)
            .finish_non_exhaustive()
    }
}
