use egui_macroquad::egui;
use shorelark::simulation::control::{Controller, FrameReport};

/// Width of the left control panel in points.
pub const CONTROL_PANEL_WIDTH: f32 = 280.0;
/// Width of the right stats panel in points.
pub const STATS_PANEL_WIDTH: f32 = 300.0;

/// Widget values and requests collected during one egui pass.
///
/// Buttons only raise `*_requested` flags; [`apply_requests`] turns them into
/// controller calls once the UI pass is over.
#[allow(clippy::struct_excessive_bools)]
pub struct UIState {
    pub speed: f32,
    pub auto_train: bool,
    pub auto_train_interval: u64,
    pub toggle_run_requested: bool,
    pub train_requested: bool,
    pub reset_requested: bool,
    pub retry_requested: bool,
    pub status_message: Option<String>,
    pub init_error: Option<String>,
    pub actual_steps_per_sec: f32,
    steps_in_window: u32,
    window_start: f64,
}

impl UIState {
    pub fn new(controller: &Controller) -> Self {
        Self {
            speed: controller.speed(),
            auto_train: controller.auto_train_enabled(),
            auto_train_interval: controller.auto_train_interval_secs(),
            toggle_run_requested: false,
            train_requested: false,
            reset_requested: false,
            retry_requested: false,
            status_message: None,
            init_error: None,
            actual_steps_per_sec: 0.0,
            steps_in_window: 0,
            window_start: 0.0,
        }
    }

    /// Counts steps over one-second windows of host time (ms).
    pub fn record_frame(&mut self, report: FrameReport, now: f64) {
        if report.stepped {
            self.steps_in_window += 1;
        }
        let elapsed = now - self.window_start;
        if elapsed >= 1000.0 {
            self.actual_steps_per_sec = (f64::from(self.steps_in_window) * 1000.0 / elapsed) as f32;
            self.steps_in_window = 0;
            self.window_start = now;
        }
    }
}

pub fn draw_ui(state: &mut UIState, controller: &Controller) {
    egui_macroquad::ui(|egui_ctx| {
        // Configure brighter text and UI
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        visuals.widgets.inactive.fg_stroke.color = egui::Color32::from_rgb(200, 200, 200);
        visuals.widgets.hovered.fg_stroke.color = egui::Color32::WHITE;
        visuals.widgets.active.fg_stroke.color = egui::Color32::WHITE;
        egui_ctx.set_visuals(visuals);

        if let Some(error) = state.init_error.clone() {
            draw_init_error(egui_ctx, state, &error);
            return;
        }

        super::controls::draw_control_panel(egui_ctx, state, controller);
        super::stats::draw_stats_panel(egui_ctx, state, controller);
    });
}

fn draw_init_error(egui_ctx: &egui::Context, state: &mut UIState, error: &str) {
    egui::CentralPanel::default().show(egui_ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("The simulation could not be started");
            ui.add_space(10.0);
            ui.colored_label(egui::Color32::from_rgb(255, 120, 120), error);
            ui.add_space(20.0);
            if ui.button("🔄 Retry").clicked() {
                state.retry_requested = true;
            }
        });
    });
}

/// Applies everything the last UI pass asked for.
pub fn apply_requests(state: &mut UIState, controller: &mut Controller) {
    if std::mem::take(&mut state.retry_requested) {
        match controller.initialize() {
            Ok(ready) => {
                log::info!("initialized with the {} engine", ready.engine);
                state.init_error = None;
            }
            Err(e) => state.init_error = Some(e.to_string()),
        }
    }

    if std::mem::take(&mut state.toggle_run_requested) {
        controller.toggle_running();
    }
    if std::mem::take(&mut state.train_requested) {
        if let Err(e) = controller.train() {
            state.status_message = Some(e.to_string());
        }
    }
    if std::mem::take(&mut state.reset_requested) {
        controller.reset();
        state.status_message = None;
    }

    if (state.speed - controller.speed()).abs() > f32::EPSILON {
        if let Err(e) = controller.set_speed(state.speed) {
            state.status_message = Some(e.to_string());
            state.speed = controller.speed();
        }
    }
    if state.auto_train_interval != controller.auto_train_interval_secs() {
        if let Err(e) = controller.set_auto_train_interval(state.auto_train_interval) {
            state.status_message = Some(e.to_string());
            state.auto_train_interval = controller.auto_train_interval_secs();
        }
    }
    if state.auto_train != controller.auto_train_enabled() {
        controller.set_auto_train(state.auto_train);
    }
}

pub fn process_egui() {
    egui_macroquad::draw();
}
