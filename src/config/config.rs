pub const APP_NAME: &str = "Carrusel de Imágenes";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = "thepuag";

pub const CONFIG_DIR_NAME: &str = "carrusel";

pub const WINDOW_SIZE: [f32; 2] = [1024.0, 768.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [400.0, 300.0];

// Imágenes mayores se reducen al decodificar
pub const MAX_DECODE_SIZE: (u32, u32) = (1920, 1080);
