use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use shorelark::simulation::control::Controller;
use shorelark::simulation::engine::{EngineKind, GenerationStats};

use super::ui::{STATS_PANEL_WIDTH, UIState};

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &UIState,
    controller: &Controller,
) {
    egui::SidePanel::right("stats_panel")
        .exact_width(STATS_PANEL_WIDTH)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.heading("Simulation Stats");
            ui.separator();

            let status = if controller.is_running() {
                "Running"
            } else {
                "Paused"
            };
            ui.label(format!("Status: {}", status));
            if let Some(kind) = controller.engine_kind() {
                ui.label(format!("Engine: {}", kind));
            }
            ui.label(format!("Generation: {}", controller.generation()));
            ui.label(format!("Steps/sec: {:.1}", state.actual_steps_per_sec));

            ui.separator();

            let params = controller.driver().params();
            if let Some(world) = controller.world() {
                ui.label(format!("Animals: {}", world.animals.len()));
                ui.label(format!(
                    "Food: {}/{}",
                    world.food.len(),
                    params.food_capacity
                ));
                ui.label(format!("Arena: {} x {}", world.width, world.height));
            }

            ui.separator();

            ui.label("Fitness per Generation");
            if controller.engine_kind() == Some(EngineKind::Fallback) {
                ui.label("The fallback engine does not track fitness.");
            } else {
                draw_fitness_plot(ui, controller.stats_history());
            }
        });
}

fn draw_fitness_plot(ui: &mut egui::Ui, history: &[GenerationStats]) {
    if history.is_empty() {
        ui.label("Train a generation to collect fitness data.");
        return;
    }

    Plot::new("fitness_plot")
        .height(200.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}: Generation: {:.0}, Fitness: {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let series: [(&str, fn(&GenerationStats) -> f32, egui::Color32); 3] = [
                ("max", |s| s.max_fitness, egui::Color32::from_rgb(100, 255, 100)),
                ("avg", |s| s.avg_fitness, egui::Color32::from_rgb(100, 150, 255)),
                ("min", |s| s.min_fitness, egui::Color32::from_rgb(255, 100, 100)),
            ];
            for (name, value, color) in series {
                let points: PlotPoints = history
                    .iter()
                    .map(|stats| [stats.generation as f64, value(stats) as f64])
                    .collect();
                plot_ui.line(Line::new(points).color(color).name(name));
            }
        });
}
