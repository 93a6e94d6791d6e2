mod app;
mod color;
mod data;
mod render;
mod state;
mod ui;

use std::path::PathBuf;

use app::LiteraryCompassApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path on the command line; errors fall back to an
    // empty session with the message in the status line.
    let initial = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Literary Compass – Books Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch cover thumbnails.
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut app = LiteraryCompassApp::default();
            if let Some(path) = initial {
                match data::loader::load_file(&path) {
                    Ok(dataset) => {
                        log::info!("Loaded {} books from {}", dataset.len(), path.display());
                        app = LiteraryCompassApp::with_dataset(dataset);
                    }
                    Err(e) => {
                        log::error!("Failed to load {}: {e:#}", path.display());
                        app.state.status_message = Some(format!("Error: {e:#}"));
                    }
                }
            }
            Ok(Box::new(app))
        }),
    )
}
