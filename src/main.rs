mod app;
mod data;
mod format;
mod gbm;
mod resources;
mod state;
mod ui;
mod viewmodel;

use app::SalaryDashApp;
use eframe::egui;
use resources::ResourceCache;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dash – HR Salary Prediction",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashApp::new(ResourceCache::new())))),
    )
}
