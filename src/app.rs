use std::path::PathBuf;
use crate::config::config::*;
use crate::config::settings::CarouselConfig;
use crate::core::file_manager::FileManager;
use crate::ui::viewer::CarouselApp;
use tracing::{error, info, warn};

pub fn run(args: Vec<PathBuf>) {
    let config = CarouselConfig::load();

    let (image_paths, initial_index) = match FileManager::collect_from_args(&args) {
        Ok(found) => found,
        Err(e) => {
            warn!("no se pudieron leer las rutas indicadas: {e}");
            (Vec::new(), 0)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    info!(version = APP_VERSION, images = image_paths.len(), "iniciando");
    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| {
            let mut app = CarouselApp::new(config)?;
            if !image_paths.is_empty() {
                app.set_images(image_paths, initial_index);
            }
            Ok(Box::new(app))
        }),
    );

    if let Err(e) = result {
        error!("error al iniciar la aplicación: {e}");
        std::process::exit(1);
    }
}
