use egui::ColorImage;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use crate::config::config::MAX_DECODE_SIZE;
use crate::core::image_format::ImageFormat;

pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<ColorImage, LoadError>;
    fn supports_format(&self, format: &ImageFormat) -> bool;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("error de decodificación: {0}")]
    Decode(String),
    #[error("error de formato: {0}")]
    Format(String),
    #[error("formato no soportado")]
    UnsupportedFormat,
}

pub struct RasterImageLoader;

impl ImageLoader for RasterImageLoader {
    fn load(&self, path: &Path) -> Result<ColorImage, LoadError> {
        use image::ImageReader;

        let reader = ImageReader::open(path)?
            .with_guessed_format()?;
        if reader.format().is_none() {
            return Err(LoadError::Format(format!("no se reconoce {}", path.display())));
        }

        let img = reader.decode()
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let (max_w, max_h) = MAX_DECODE_SIZE;
        let img = if img.width() > max_w || img.height() > max_h {
            img.resize(max_w, max_h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        let rgba_img = img.to_rgba8();
        let size = [rgba_img.width() as usize, rgba_img.height() as usize];
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba_img.as_raw()))
    }

    fn supports_format(&self, _format: &ImageFormat) -> bool {
        true
    }
}

#[derive(Clone)]
pub struct ImageLoaderFactory {
    loaders: Arc<Vec<Box<dyn ImageLoader>>>,
}

impl Default for ImageLoaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoaderFactory {
    pub fn new() -> Self {
        Self {
            loaders: Arc::new(vec![Box::new(RasterImageLoader)]),
        }
    }

    pub fn load_image(&self, source: &str) -> Result<ColorImage, LoadError> {
        let path = Path::new(source);
        let format = ImageFormat::from_path(path).ok_or(LoadError::UnsupportedFormat)?;

        self.loaders
            .iter()
            .find(|loader| loader.supports_format(&format))
            .ok_or(LoadError::UnsupportedFormat)?
            .load(path)
    }
}
