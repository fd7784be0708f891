#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod chart;
mod config;
mod error;
mod io;
mod model;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("Gantt Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Gantt Planner",
        options,
        Box::new(|cc| Ok(Box::new(app::GanttApp::new(cc)))),
    )
}
