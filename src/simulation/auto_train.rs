//! Periodic training while the simulation runs.
//!
//! The coordinator is polled from the host loop. While both auto-train and the
//! run are enabled it keeps a scheduled check that accumulates wall time in
//! slices of `interval / 50`; once a full interval has accumulated it reports a
//! due train and starts counting from zero. Turning either flag off tears the
//! check down, and turning it back on starts from a fresh, empty interval.

use super::error::ConfigError;

/// Shortest accepted interval, in seconds.
pub const MIN_INTERVAL_SECS: u64 = 1;
/// Longest accepted interval, in seconds.
pub const MAX_INTERVAL_SECS: u64 = 30;
/// Interval used when none is configured, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;
/// Poll slices per interval.
const POLLS_PER_INTERVAL: f64 = 50.0;

/// A scheduled periodic check. Dropping it cancels it.
#[derive(Debug, Clone, PartialEq)]
struct PeriodicCheck {
    last_poll: f64,
    elapsed_ms: f64,
}

/// Fires `train` at a fixed interval while running with auto-train enabled.
#[derive(Debug, Clone)]
pub struct AutoTrainCoordinator {
    enabled: bool,
    running: bool,
    interval_ms: f64,
    check: Option<PeriodicCheck>,
}

impl Default for AutoTrainCoordinator {
    fn default() -> Self {
        Self {
            enabled: false,
            running: false,
            interval_ms: DEFAULT_INTERVAL_SECS as f64 * 1000.0,
            check: None,
        }
    }
}

impl AutoTrainCoordinator {
    /// Creates a disabled coordinator with the given interval in seconds.
    pub fn new(interval_secs: u64) -> Result<Self, ConfigError> {
        let mut coordinator = Self::default();
        coordinator.set_interval_secs(interval_secs)?;
        Ok(coordinator)
    }

    /// Whether auto-train is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the check is currently scheduled.
    pub fn is_active(&self) -> bool {
        self.enabled && self.running
    }

    /// Interval between trains, in whole seconds.
    pub fn interval_secs(&self) -> u64 {
        (self.interval_ms / 1000.0) as u64
    }

    /// Time accumulated towards the next train, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.check.as_ref().map_or(0.0, |c| c.elapsed_ms)
    }

    /// Switches auto-train on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.refresh();
    }

    /// Tells the coordinator whether the simulation is running.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        self.refresh();
    }

    /// Changes the interval. Out-of-range values are rejected and the old one kept.
    pub fn set_interval_secs(&mut self, secs: u64) -> Result<(), ConfigError> {
        if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) {
            return Err(ConfigError::AutoTrainInterval(secs));
        }
        self.interval_ms = secs as f64 * 1000.0;
        Ok(())
    }

    /// Polls the check at time `now` (ms). Returns true when a train is due.
    ///
    /// The first poll after activation only anchors the clock.
    pub fn poll(&mut self, now: f64) -> bool {
        if !self.is_active() {
            return false;
        }

        let poll_period = self.interval_ms / POLLS_PER_INTERVAL;
        let Some(check) = self.check.as_mut() else {
            self.check = Some(PeriodicCheck {
                last_poll: now,
                elapsed_ms: 0.0,
            });
            return false;
        };

        let delta = now - check.last_poll;
        if delta < poll_period {
            return false;
        }
        check.last_poll = now;
        check.elapsed_ms += delta;

        if check.elapsed_ms >= self.interval_ms {
            check.elapsed_ms = 0.0;
            log::debug!("auto-train due after {} ms", self.interval_ms);
            return true;
        }
        false
    }

    fn refresh(&mut self) {
        if !self.is_active() && self.check.take().is_some() {
            log::debug!("auto-train check cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_enabled_and_running() {
        let mut coordinator = AutoTrainCoordinator::new(1).unwrap();
        coordinator.set_running(true);
        for t in 0..100 {
            assert!(!coordinator.poll(f64::from(t) * 100.0));
        }

        coordinator.set_enabled(true);
        assert!(coordinator.is_active());
    }

    #[test]
    fn rejects_out_of_range_interval() {
        let mut coordinator = AutoTrainCoordinator::default();
        assert_eq!(
            coordinator.set_interval_secs(0),
            Err(ConfigError::AutoTrainInterval(0))
        );
        assert_eq!(
            coordinator.set_interval_secs(31),
            Err(ConfigError::AutoTrainInterval(31))
        );
        assert_eq!(coordinator.interval_secs(), DEFAULT_INTERVAL_SECS);
    }

    #[test]
    fn polls_closer_than_a_slice_do_not_accumulate() {
        let mut coordinator = AutoTrainCoordinator::new(5).unwrap();
        coordinator.set_enabled(true);
        coordinator.set_running(true);

        assert!(!coordinator.poll(0.0));
        assert!(!coordinator.poll(50.0));
        assert_eq!(coordinator.elapsed_ms(), 0.0);
        assert!(!coordinator.poll(100.0));
        assert_eq!(coordinator.elapsed_ms(), 100.0);
    }
}
