pub mod file_manager;
pub mod image_cache;
pub mod image_format;
pub mod image_loader_factory;
pub mod preload_manager;
