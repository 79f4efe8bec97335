use std::path::{Path, PathBuf};
use crate::carousel::Carousel;
use crate::config::config::*;
use crate::config::settings::CarouselConfig;
use crate::core::file_manager::FileManager;
use crate::core::image_cache::ImageCache;
use crate::core::preload_manager::PreloadManager;
use crate::i18n::es::*;
use crate::ui::carousel_widget::CarouselView;
use eframe::egui;
use rayon::ThreadPoolBuildError;
use rfd::FileDialog;
use tracing::{error, info};

// Teclas pulsadas en un fotograma
#[derive(Debug, Default, Clone, Copy)]
struct KeyActions {
    next: bool,
    previous: bool,
    first: bool,
    last: bool,
    toggle_fullscreen: bool,
    leave_fullscreen: bool,
}

// Mientras se arrastra manda el puntero; las teclas de navegación se ignoran
fn navigate(carousel: &mut Carousel, keys: KeyActions, now: f64) {
    if carousel.is_dragging() {
        return;
    }
    if keys.next {
        carousel.next(now);
    }
    if keys.previous {
        carousel.previous(now);
    }
    if keys.first {
        carousel.go_to(0);
    }
    if keys.last {
        carousel.go_to(usize::MAX);
    }
}

pub struct CarouselApp {
    config: CarouselConfig,
    carousel: Carousel,
    view: CarouselView,
    image_cache: ImageCache,
    preload_manager: PreloadManager,
    last_preloaded: Option<usize>,
    fullscreen: bool,
    image_dir: Option<PathBuf>,
    show_about: bool,
}

impl CarouselApp {
    pub fn new(config: CarouselConfig) -> Result<Self, ThreadPoolBuildError> {
        Ok(Self {
            carousel: Carousel::empty(config.clone()),
            view: CarouselView::new(),
            image_cache: ImageCache::new(config.cache_size),
            preload_manager: PreloadManager::new(config.preload_range)?,
            last_preloaded: None,
            fullscreen: false,
            image_dir: None,
            show_about: false,
            config,
        })
    }

    // Descarta el carrusel anterior, su arrastre y las texturas
    pub fn set_images(&mut self, paths: Vec<PathBuf>, initial_index: usize) {
        self.view.release(&mut self.carousel);
        self.image_cache.clear();
        self.preload_manager.reset();
        self.last_preloaded = None;

        let images = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        self.carousel = Carousel::new(images, self.config.clone());
        self.carousel.go_to(initial_index);
        info!(total = self.carousel.len(), index = ?self.carousel.current_index(), "lista de imágenes cargada");
    }

    fn load_images_from_folder(&mut self, path: &Path) {
        match FileManager::scan_around_file(path) {
            Ok((image_paths, initial_index)) => {
                self.image_dir = path.parent().map(Path::to_path_buf);
                self.set_images(image_paths, initial_index);
            }
            Err(e) => {
                error!(path = %path.display(), "error escaneando directorio: {e}");
            }
        }
    }

    fn preload_if_moved(&mut self, ctx: &egui::Context) {
        let current = self.carousel.current_index();
        // Puede haber salido de la caché sin cambiar de índice
        let evicted = self
            .carousel
            .current_image()
            .is_some_and(|src| !self.image_cache.contains(src));
        if current == self.last_preloaded && !evicted {
            return;
        }
        if let Some(index) = current {
            self.preload_manager.preload_images_around_index(
                ctx,
                self.carousel.images(),
                index,
                &self.image_cache,
            );
        }
        self.last_preloaded = current;
    }

    fn set_fullscreen(&mut self, ctx: &egui::Context, fullscreen: bool) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        self.fullscreen = fullscreen;
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (keys, now) = ctx.input(|i| {
            let keys = KeyActions {
                next: i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space),
                previous: i.key_pressed(egui::Key::ArrowLeft),
                first: i.key_pressed(egui::Key::Home),
                last: i.key_pressed(egui::Key::End),
                toggle_fullscreen: i.key_pressed(egui::Key::F11),
                leave_fullscreen: i.key_pressed(egui::Key::Escape),
            };
            (keys, i.time)
        });

        navigate(&mut self.carousel, keys, now);
        if keys.leave_fullscreen && self.fullscreen {
            self.set_fullscreen(ctx, false);
        }
        if keys.toggle_fullscreen {
            self.set_fullscreen(ctx, !self.fullscreen);
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.show_file_controls(ui);
                ui.separator();
                self.show_navigation_controls(ui);
                ui.separator();
                self.show_view_controls(ui, ctx);
                self.show_image_info(ui);
            });
        });
    }

    fn show_file_controls(&mut self, ui: &mut egui::Ui) {
        if ui.button(format!("📂 {}", BTN_OPEN)).clicked() {
            let (filter_name, extensions) = FileManager::get_supported_file_filter();
            let mut dialog = FileDialog::new().add_filter(filter_name, &extensions);
            if let Some(dir) = &self.image_dir {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.pick_file() {
                self.load_images_from_folder(&path);
            }
        }
    }

    fn show_navigation_controls(&mut self, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);
        let can_go_prev = self.carousel.can_go_previous();
        let can_go_next = self.carousel.can_go_next();

        if ui.add_enabled(can_go_prev, egui::Button::new(format!("⬅ {}", BTN_PREV))).clicked() {
            self.carousel.previous(now);
        }

        if ui.add_enabled(can_go_next, egui::Button::new(format!("➡ {}", BTN_NEXT))).clicked() {
            self.carousel.next(now);
        }
    }

    fn show_view_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if ui.button(format!("🖥 {}", BTN_FULLSCREEN)).clicked() {
            self.set_fullscreen(ctx, true);
        }

        if ui.button(format!("ℹ {}", BTN_ABOUT)).clicked() {
            self.show_about = true;
        }
    }

    fn show_image_info(&self, ui: &mut egui::Ui) {
        if let Some(position) = self.carousel.position_label() {
            ui.separator();
            ui.label(position);

            if let Some(file_name) = self.carousel.current_image().and_then(|src| Path::new(src).file_name()) {
                ui.label(file_name.to_string_lossy());
            }
        }
    }

    fn show_about_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        egui::Window::new(BTN_ABOUT)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.heading(APP_NAME);
                    ui.label(format!("v{}", APP_VERSION));
                    ui.label(format!("{}{}", TEXT_AUTHOR, APP_AUTHOR));
                    ui.label(TEXT_LICENSE);
                    ui.label(TEXT_INFOAPP);
                    ui.add_space(6.0);
                    ui.small(TEXT_ROWSORSPACE);
                    ui.small(TEXT_F11FULLSCREEN);
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::RIGHT), |ui| {
                    if ui.button(BTN_CLOSE).clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn show_main_content(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.show(ui, &mut self.carousel, &mut self.image_cache);
        });
    }
}

impl eframe::App for CarouselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        // Texturas recién decodificadas
        self.preload_manager.process_loaded_images(ctx, &mut self.image_cache);

        if !self.fullscreen {
            self.show_toolbar(ctx);
        }

        self.show_about_dialog(ctx);
        self.show_main_content(ctx);
        self.preload_if_moved(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel {
        let images = (0..n).map(|i| format!("img_{i}.png")).collect();
        Carousel::new(images, CarouselConfig::default())
    }

    #[test]
    fn keys_are_ignored_while_dragging() {
        let mut c = carousel(5);
        c.go_to(2);
        assert!(c.begin_drag(0.0));

        let keys = KeyActions { next: true, last: true, ..Default::default() };
        navigate(&mut c, keys, 1.0);
        assert_eq!(c.current_index(), Some(2));
        assert!(!c.is_animating());

        c.update_drag(-100.0);
        assert_eq!(c.current_index(), Some(3));
        c.end_drag();

        navigate(&mut c, KeyActions { next: true, ..Default::default() }, 2.0);
        assert_eq!(c.current_index(), Some(4));
    }

    #[test]
    fn keys_navigate_without_drag() {
        let mut c = carousel(4);
        navigate(&mut c, KeyActions { last: true, ..Default::default() }, 0.0);
        assert_eq!(c.current_index(), Some(3));
        navigate(&mut c, KeyActions { first: true, ..Default::default() }, 0.0);
        assert_eq!(c.current_index(), Some(0));
        navigate(&mut c, KeyActions { previous: true, ..Default::default() }, 0.0);
        assert_eq!(c.current_index(), Some(0));
    }
}
