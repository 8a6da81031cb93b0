#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod bridge;
mod controller;
mod io;
mod model;
mod ui;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let paths = io::settings::AppPaths::resolve();
    info!(
        config = %paths.config_dir.display(),
        data = %paths.data_dir.display(),
        "starting efficiency board"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 680.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("Efficiency Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Efficiency Board",
        options,
        Box::new(|cc| Ok(Box::new(app::EfficiencyApp::new(cc, paths)))),
    )
}
