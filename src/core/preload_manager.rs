use std::collections::HashSet;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use egui::{ColorImage, Context};
use tracing::{debug, warn};
use crate::core::image_cache::ImageCache;
use crate::core::image_loader_factory::ImageLoaderFactory;

enum Loaded {
    Image { generation: u64, source: String, image: ColorImage },
    Failed { generation: u64, source: String },
}

pub struct PreloadManager {
    image_receiver: mpsc::Receiver<Loaded>,
    image_sender: mpsc::Sender<Loaded>,
    loading: Arc<Mutex<HashSet<String>>>,
    preload_range: usize,
    loader_factory: ImageLoaderFactory,
    pool: Arc<ThreadPool>,
    // Sube con cada lista nueva
    generation: u64,
}

// Primero la actual, luego las vecinas de dentro hacia fuera
pub fn preload_order(len: usize, current: usize, range: usize) -> Vec<usize> {
    if current >= len {
        return Vec::new();
    }
    let mut order = vec![current];
    for distance in 1..=range {
        if let Some(next) = current.checked_add(distance).filter(|&i| i < len) {
            order.push(next);
        }
        if let Some(prev) = current.checked_sub(distance) {
            order.push(prev);
        }
    }
    order
}

impl PreloadManager {
    pub fn new(preload_range: usize) -> Result<Self, ThreadPoolBuildError> {
        let (sender, receiver) = mpsc::channel();
        let threads = num_cpus::get().clamp(1, 4);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("decodificador-{i}"))
            .build()?;
        debug!(threads, "pool de decodificación creado");

        Ok(Self {
            image_receiver: receiver,
            image_sender: sender,
            loading: Arc::new(Mutex::new(HashSet::new())),
            preload_range,
            loader_factory: ImageLoaderFactory::new(),
            pool: Arc::new(pool),
            generation: 0,
        })
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "descartando decodificaciones pendientes");
    }

    pub fn preload_images_around_index(
        &self,
        ctx: &Context,
        images: &[String],
        current_index: usize,
        image_cache: &ImageCache,
    ) {
        let to_load: Vec<String> = preload_order(images.len(), current_index, self.preload_range)
            .into_iter()
            .map(|i| &images[i])
            .filter(|source| !image_cache.contains(source))
            .cloned()
            .collect();

        if !to_load.is_empty() {
            self.spawn_loading(ctx.clone(), to_load);
        }
    }

    fn spawn_loading(&self, ctx: Context, sources: Vec<String>) {
        let sender = self.image_sender.clone();
        let loading = Arc::clone(&self.loading);
        let factory = self.loader_factory.clone();
        let generation = self.generation;

        self.pool.spawn(move || {
            sources.into_par_iter()
                .filter(|source| {
                    // Ya se está cargando en otro hilo
                    loading
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(source.clone())
                })
                .for_each(|source| {
                    let result = match factory.load_image(&source) {
                        Ok(image) => Loaded::Image {
                            generation,
                            source: source.clone(),
                            image,
                        },
                        Err(e) => {
                            warn!(%source, "no se pudo cargar la imagen: {e}");
                            Loaded::Failed {
                                generation,
                                source: source.clone(),
                            }
                        }
                    };

                    loading
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(&source);

                    if sender.send(result).is_ok() {
                        ctx.request_repaint();
                    }
                });
        });
    }

    pub fn process_loaded_images(&self, ctx: &Context, image_cache: &mut ImageCache) {
        while let Ok(loaded) = self.image_receiver.try_recv() {
            match loaded {
                Loaded::Image { generation, source, .. } | Loaded::Failed { generation, source }
                    if generation != self.generation =>
                {
                    debug!(%source, "decodificación de una lista anterior descartada");
                }
                Loaded::Image { source, image, .. } => {
                    let texture = ctx.load_texture(
                        format!("image_{source}"),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    image_cache.insert(source, texture);
                    debug!(cached = image_cache.len(), "textura lista");
                }
                Loaded::Failed { source, .. } => image_cache.insert_failed(source),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn current_first_then_outwards() {
        assert_eq!(preload_order(10, 5, 2), [5, 6, 4, 7, 3]);
    }

    #[test]
    fn order_is_clipped_to_the_list() {
        assert_eq!(preload_order(3, 0, 2), [0, 1, 2]);
        assert_eq!(preload_order(3, 2, 1), [2, 1]);
        assert!(preload_order(0, 0, 2).is_empty());
    }

    #[test]
    fn loads_and_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.png");
        image::RgbaImage::new(4, 4).save(&good).unwrap();
        let images = vec![
            good.to_string_lossy().into_owned(),
            dir.path().join("falta.png").to_string_lossy().into_owned(),
        ];

        let ctx = Context::default();
        let manager = PreloadManager::new(1).unwrap();
        let mut cache = ImageCache::new(4);
        manager.preload_images_around_index(&ctx, &images, 0, &cache);

        let deadline = Instant::now() + Duration::from_secs(10);
        while cache.len() < 2 && Instant::now() < deadline {
            manager.process_loaded_images(&ctx, &mut cache);
            std::thread::sleep(Duration::from_millis(10));
        }

        assert!(matches!(cache.get(&images[0]), Some(crate::core::image_cache::Slot::Ready(_))));
        assert!(matches!(cache.get(&images[1]), Some(crate::core::image_cache::Slot::Failed)));
    }

    #[test]
    fn results_from_a_replaced_list_are_dropped() {
        let ctx = Context::default();
        let mut manager = PreloadManager::new(1).unwrap();
        let mut cache = ImageCache::new(4);

        let stale = manager.generation;
        manager.reset();
        manager
            .image_sender
            .send(Loaded::Image {
                generation: stale,
                source: "vieja.png".to_owned(),
                image: ColorImage::new([2, 2], egui::Color32::WHITE),
            })
            .unwrap();
        manager
            .image_sender
            .send(Loaded::Failed { generation: stale, source: "rota.png".to_owned() })
            .unwrap();
        manager
            .image_sender
            .send(Loaded::Failed { generation: manager.generation, source: "nueva.png".to_owned() })
            .unwrap();

        manager.process_loaded_images(&ctx, &mut cache);

        assert!(!cache.contains("vieja.png"));
        assert!(!cache.contains("rota.png"));
        assert!(matches!(cache.get("nueva.png"), Some(crate::core::image_cache::Slot::Failed)));
        assert_eq!(cache.len(), 1);
    }
}
