use egui_macroquad::egui;
use shorelark::simulation::auto_train::{MAX_INTERVAL_SECS, MIN_INTERVAL_SECS};
use shorelark::simulation::control::Controller;
use shorelark::simulation::event_log::EventColor;
use shorelark::simulation::pacing::{MAX_TARGET_RATE, MIN_TARGET_RATE};

use super::ui::{CONTROL_PANEL_WIDTH, UIState};

fn event_color(color: EventColor) -> egui::Color32 {
    match color {
        EventColor::Info => egui::Color32::from_rgb(220, 220, 220),
        EventColor::Training => egui::Color32::from_rgb(100, 255, 100),
        EventColor::Reset => egui::Color32::from_rgb(255, 255, 100),
        EventColor::Warning => egui::Color32::from_rgb(255, 100, 100),
    }
}

pub(super) fn draw_control_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    controller: &Controller,
) {
    egui::SidePanel::left("control_panel")
        .exact_width(CONTROL_PANEL_WIDTH)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.heading("Controls");
            ui.separator();

            ui.horizontal(|ui| {
                let run_text = if controller.is_running() {
                    "⏸ Pause"
                } else {
                    "▶ Run"
                };
                if ui.button(run_text).clicked() {
                    state.toggle_run_requested = true;
                }
                // manual training conflicts with the periodic one
                if ui
                    .add_enabled(!state.auto_train, egui::Button::new("🧬 Train"))
                    .clicked()
                {
                    state.train_requested = true;
                }
                if ui.button("🔄 Reset").clicked() {
                    state.reset_requested = true;
                }
            });

            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            ui.label("Simulation Speed");
            ui.add(
                egui::Slider::new(&mut state.speed, MIN_TARGET_RATE..=MAX_TARGET_RATE)
                    .step_by(1.0)
                    .text("ticks/s"),
            );

            ui.separator();

            ui.checkbox(&mut state.auto_train, "Auto-train");
            ui.add(
                egui::Slider::new(
                    &mut state.auto_train_interval,
                    MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS,
                )
                .text("s interval"),
            );
            if controller.auto_train_enabled() && controller.is_running() {
                let progress = controller.auto_train_elapsed_ms()
                    / (controller.auto_train_interval_secs() as f64 * 1000.0);
                ui.add(egui::ProgressBar::new(progress as f32).text("next generation"));
            }

            ui.separator();

            ui.label("Terminal");
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for event in controller.event_log().chronological() {
                        ui.label(
                            egui::RichText::new(format!(
                                "[{:>7.1}s] {}",
                                event.time / 1000.0,
                                event.description
                            ))
                                .monospace()
                                .color(event_color(event.color)),
                        );
                    }
                });
        });
}
