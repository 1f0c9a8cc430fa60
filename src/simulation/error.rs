//! Error types for the simulation driver and its control layer.

use thiserror::Error;

/// Rejected simulation parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// Arena width or height is not a positive finite number.
    #[error("arena bounds must be positive, got {width} x {height}")]
    NonPositiveBounds {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// Animals need at least one vision sector.
    #[error("vision must have at least one sector")]
    NoVisionSectors,
    /// Food capacity cannot hold the default food count.
    #[error("food capacity {capacity} is below the initial food count {food}")]
    CapacityBelowDefault {
        /// Configured capacity.
        capacity: usize,
        /// Configured initial food count.
        food: usize,
    },
    /// A probability outside of `[0, 1]`.
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability {
        /// Name of the offending field.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Evolution engine tuning that cannot produce a working population.
    #[error("invalid evolution parameters: {0}")]
    Evolution(&'static str),
    /// Failed to read a parameter file.
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    /// Parameter file is not valid JSON for [`super::params::Params`].
    #[error("failed to parse parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to construct a stepping engine.
///
/// The driver absorbs these for the external engine and switches to the fallback.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be loaded or constructed.
    #[error("simulation engine unavailable: {0}")]
    Unavailable(String),
    /// The engine speaks a different interface version.
    #[error("simulation engine api version {found} is incompatible with {expected}")]
    Incompatible {
        /// Version the driver understands.
        expected: u32,
        /// Version reported by the engine.
        found: u32,
    },
    /// The engine rejected its parameters.
    #[error(transparent)]
    InvalidParams(#[from] ParamsError),
}

/// Fatal initialization failure: no engine at all could be constructed.
#[derive(Debug, Error)]
pub enum InitError {
    /// Neither the external nor the fallback engine could be built.
    #[error("no simulation engine could be constructed: {0}")]
    NoEngine(#[source] EngineError),
}

/// Out-of-range control setting. The previous value is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Tick rate outside of the accepted range.
    #[error("tick rate {0} is outside 1..=60 ticks per second")]
    TargetRate(f32),
    /// Auto-train interval outside of the accepted range.
    #[error("auto-train interval {0} s is outside 1..=30 seconds")]
    AutoTrainInterval(u64),
}

/// Rejected control request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// Manual training is disabled while auto-train is active.
    #[error("manual training is disabled while auto-train is enabled")]
    AutoTrainActive,
    /// A control setting was out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
