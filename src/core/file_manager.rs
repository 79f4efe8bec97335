
use std::path::{Path, PathBuf};
use std::fs;
use crate::core::image_format::ImageFormat;

pub struct FileManager;

impl FileManager {
    pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut image_paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && ImageFormat::is_supported(p))
            .collect();

        image_paths.sort();
        Ok(image_paths)
    }

    pub fn find_index_of_file(paths: &[PathBuf], target: &Path) -> Option<usize> {
        paths.iter().position(|p| p == target)
    }

    pub fn scan_around_file(file: &Path) -> Result<(Vec<PathBuf>, usize), std::io::Error> {
        let parent = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let image_paths = Self::scan_directory(parent)?;
        let index = Self::find_index_of_file(&image_paths, &parent.join(file.file_name().unwrap_or_default()))
            .unwrap_or(0);
        Ok((image_paths, index))
    }

    // Una carpeta, un archivo dentro de su carpeta, o varios archivos en orden
    pub fn collect_from_args(args: &[PathBuf]) -> Result<(Vec<PathBuf>, usize), std::io::Error> {
        match args {
            [] => Ok((Vec::new(), 0)),
            [single] if single.is_dir() => Ok((Self::scan_directory(single)?, 0)),
            [single] => Self::scan_around_file(single),
            many => {
                let files = many
                    .iter()
                    .filter(|p| ImageFormat::is_supported(p))
                    .cloned()
                    .collect();
                Ok((files, 0))
            }
        }
    }

    pub fn get_supported_file_filter() -> (&'static str, Vec<&'static str>) {
        ("Imagen", ImageFormat::get_supported_extensions())
    }
}
