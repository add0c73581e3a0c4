mod app;
mod ui;

use std::path::Path;

use app::GroundwaterApp;
use eframe::egui;
use groundwater_dash::config::DatasetConfig;
use groundwater_dash::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DatasetConfig::from_env().unwrap_or_else(|e| {
        log::error!("Falling back to default configuration: {e:#}");
        DatasetConfig::default()
    });
    let mut state = AppState::new(config);
    if let Some(path) = std::env::args_os().nth(1) {
        state.load_path(Path::new(&path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Groundwater Levels – Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(GroundwaterApp::new(state)))),
    )
}
