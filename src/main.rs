use std::path::PathBuf;

use clap::Parser;
use macroquad::prelude::*;
use shorelark::simulation::control::Controller;
use shorelark::simulation::engine::EngineSource;
use shorelark::simulation::params::Params;

mod graphics;
mod ui;

/// Shorelark: animals with evolving brains hunting for food
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the evolution engine and run the fallback engine
    #[arg(long)]
    fallback: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Shorelark".to_owned(),
        window_width: 1400,
        window_height: 720,
        ..Default::default()
    }
}

fn load_params(args: &Args) -> Params {
    let mut params = match &args.config {
        Some(path) => match Params::load(path) {
            Ok(params) => params,
            Err(e) => {
                log::error!("{}: {e}, using default parameters", path.display());
                Params::default()
            }
        },
        None => Params::default(),
    };
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    params
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = load_params(&args);
    let source = if args.fallback {
        EngineSource::Unavailable("disabled on the command line".to_owned())
    } else {
        EngineSource::Evolution
    };

    log::info!("Starting shorelark simulation");

    let mut controller = Controller::new(params, source);
    let mut ui_state = ui::UIState::new(&controller);
    if let Err(e) = controller.initialize() {
        log::error!("{e}");
        ui_state.init_error = Some(e.to_string());
    }

    loop {
        clear_background(Color::from_rgba(30, 30, 30, 255));

        let now = get_time() * 1000.0;
        let report = controller.frame(now);
        ui_state.record_frame(report, now);

        // read the world fresh every frame
        if let Some(world) = controller.world() {
            let area = Rect::new(
                ui::CONTROL_PANEL_WIDTH,
                0.0,
                (screen_width() - ui::CONTROL_PANEL_WIDTH - ui::STATS_PANEL_WIDTH).max(0.0),
                screen_height(),
            );
            let viewport = graphics::Viewport::fit(world, area);
            graphics::draw_world(world, &viewport);
        }

        ui::draw_ui(&mut ui_state, &controller);
        ui::process_egui();
        ui::apply_requests(&mut ui_state, &mut controller);

        next_frame().await
    }
}
