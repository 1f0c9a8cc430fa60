// UI module - handles all user interface rendering

mod controls;
mod stats;
mod ui;

// Re-export the public interface
pub use ui::{
    CONTROL_PANEL_WIDTH, STATS_PANEL_WIDTH, UIState, apply_requests, draw_ui, process_egui,
};
