//! Frame pacing for the render loop.
//!
//! The host calls back once per frame with a millisecond timestamp. The pacer
//! decides whether that frame advances the simulation: a step happens when at
//! least `1000 / target_rate` ms passed since the previous step. Time that
//! passes while paused or between frames is never caught up.
//!
//! Every scheduled frame carries a [`FrameRequest`]. Stopping the loop
//! invalidates all outstanding requests, so a frame that was already queued
//! when the stop arrived cannot step.

use super::error::ConfigError;

/// Slowest accepted tick rate.
pub const MIN_TARGET_RATE: f32 = 1.0;
/// Fastest accepted tick rate.
pub const MAX_TARGET_RATE: f32 = 60.0;
/// Tick rate used when none is configured.
pub const DEFAULT_TARGET_RATE: f32 = 30.0;

/// Token for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    epoch: u64,
}

/// Decision for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Step the simulation and repaint, then schedule `next`.
    Step {
        /// Request for the following frame.
        next: FrameRequest,
    },
    /// Too early to step; schedule `next` without stepping.
    Wait {
        /// Request for the following frame.
        next: FrameRequest,
    },
    /// The request was cancelled by a stop; nothing is rescheduled.
    Cancelled,
}

impl FrameOutcome {
    /// True when the frame should advance the simulation.
    pub fn is_step(&self) -> bool {
        matches!(self, FrameOutcome::Step { .. })
    }

    /// Request for the next frame, unless cancelled.
    pub fn next(&self) -> Option<FrameRequest> {
        match self {
            FrameOutcome::Step { next } | FrameOutcome::Wait { next } => Some(*next),
            FrameOutcome::Cancelled => None,
        }
    }
}

/// Timestamp-driven step gate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    target_rate: f32,
    running: bool,
    epoch: u64,
    last_step_time: Option<f64>,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self {
            target_rate: DEFAULT_TARGET_RATE,
            running: false,
            epoch: 0,
            last_step_time: None,
        }
    }
}

impl FramePacer {
    /// Creates a stopped pacer with the given tick rate.
    pub fn new(target_rate: f32) -> Result<Self, ConfigError> {
        let mut pacer = Self::default();
        pacer.set_target_rate(target_rate)?;
        Ok(pacer)
    }

    /// Ticks per second the loop aims for.
    pub fn target_rate(&self) -> f32 {
        self.target_rate
    }

    /// Changes the tick rate. Out-of-range values are rejected and the old rate kept.
    ///
    /// Takes effect at the next frame decision.
    pub fn set_target_rate(&mut self, rate: f32) -> Result<(), ConfigError> {
        if !(MIN_TARGET_RATE..=MAX_TARGET_RATE).contains(&rate) {
            return Err(ConfigError::TargetRate(rate));
        }
        self.target_rate = rate;
        Ok(())
    }

    /// Minimum time between two steps, in milliseconds.
    pub fn frame_delay_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_rate)
    }

    /// True while the loop is scheduled.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the loop and returns the first frame request.
    ///
    /// Returns `None` when already running. A restart forgets the previous
    /// step time, so the first frame after it steps right away.
    pub fn start(&mut self) -> Option<FrameRequest> {
        if self.running {
            return None;
        }
        self.running = true;
        self.epoch += 1;
        self.last_step_time = None;
        log::debug!("frame loop started at {} ticks/s", self.target_rate);
        Some(FrameRequest { epoch: self.epoch })
    }

    /// Stops the loop and cancels every outstanding frame request.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("frame loop stopped");
        }
        self.running = false;
        self.epoch += 1;
    }

    /// Decides what the frame scheduled with `request` does at time `now` (ms).
    pub fn on_frame(&mut self, request: FrameRequest, now: f64) -> FrameOutcome {
        if !self.running || request.epoch != self.epoch {
            return FrameOutcome::Cancelled;
        }

        let next = FrameRequest { epoch: self.epoch };
        let due = match self.last_step_time {
            Some(last) => now - last >= self.frame_delay_ms(),
            None => true,
        };

        if due {
            self.last_step_time = Some(now);
            FrameOutcome::Step { next }
        } else {
            FrameOutcome::Wait { next }
        }
    }
}
