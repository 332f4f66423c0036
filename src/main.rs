mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod views;

use app::VnlExplorerApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    let app = match data::loader::load(&config.data_path) {
        Ok(dataset) => VnlExplorerApp::Ready(Box::new(AppState::new(dataset, &config))),
        Err(e) => {
            log::error!("{e}");
            VnlExplorerApp::Unavailable(e)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Volleyball Nations League 2023 EDA",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
