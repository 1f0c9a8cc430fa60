//! Terminal log of control messages for display in the UI.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Messages kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

/// A logged message for display in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Host timestamp in milliseconds when the message was logged
    pub time: f64,
    /// Human-readable description of the event
    pub description: String,
    /// Color hint for the event (for UI display)
    pub color: EventColor,
}

/// Color categories for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventColor {
    /// General information (white)
    Info,
    /// Training and generation changes (green)
    Training,
    /// Resets (yellow)
    Reset,
    /// Rejected requests and degraded operation (red)
    Warning,
}

/// Bounded log of recent control messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f64, description: impl Into<String>, color: EventColor) {
        self.events.push_front(LoggedEvent {
            time,
            description: description.into(),
            color,
        });

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Iterates events oldest first, the order a terminal prints them in
    pub fn chronological(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.events.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_most_recent() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.log(f64::from(i), format!("message {i}"), EventColor::Info);
        }

        assert_eq!(log.events().len(), 3);
        assert_eq!(log.events()[0].description, "message 4");
        let order: Vec<&str> = log.chronological().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["message 2", "message 3", "message 4"]);
    }
}
