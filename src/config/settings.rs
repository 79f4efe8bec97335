use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::config::CONFIG_DIR_NAME;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se pudo leer {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuración inválida en {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("valor inválido para `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    // Píxeles de arrastre por imagen
    pub step_threshold: f32,
    pub drag_damping: f32,
    pub slide_distance: f32,
    // Segundos por cada mitad de la transición
    pub slide_duration: f64,
    pub preload_range: usize,
    pub cache_size: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            step_threshold: 100.0,
            drag_damping: 0.3,
            slide_distance: 100.0,
            slide_duration: 0.5,
            preload_range: 2,
            cache_size: 8,
        }
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_threshold.is_finite() && self.step_threshold > 0.0) {
            return Err(ConfigError::Invalid {
                field: "step_threshold",
                reason: "debe ser finito y mayor que cero",
            });
        }
        if !(0.0..1.0).contains(&self.drag_damping) {
            return Err(ConfigError::Invalid {
                field: "drag_damping",
                reason: "debe estar en [0, 1)",
            });
        }
        if !(self.slide_distance.is_finite() && self.slide_distance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "slide_distance",
                reason: "debe ser finito y no negativo",
            });
        }
        // Con una duración infinita la transición nunca termina
        if !(self.slide_duration.is_finite() && self.slide_duration >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "slide_duration",
                reason: "debe ser finito y no negativo",
            });
        }
        // La imagen actual y sus vecinas precargadas tienen que caber a la vez
        if self.cache_size < self.preload_window() {
            return Err(ConfigError::Invalid {
                field: "cache_size",
                reason: "debe ser al menos 2 * preload_range + 1",
            });
        }
        Ok(())
    }

    pub fn preload_window(&self) -> usize {
        self.preload_range.saturating_mul(2).saturating_add(1)
    }

    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(config) => {
                info!(path = %path.display(), "configuración cargada");
                config
            }
            Err(e) => {
                warn!("{e}; usando valores por defecto");
                Self::default()
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CarouselConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step_threshold, 100.0);
        assert_eq!(config.drag_damping, 0.3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = CarouselConfig::parse("step_threshold = 80.0\n", Path::new("test.toml")).unwrap();
        assert_eq!(config.step_threshold, 80.0);
        assert_eq!(config.slide_duration, 0.5);
        assert_eq!(config.cache_size, 8);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = CarouselConfig::parse("step_threshold = 0.0", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "step_threshold", .. }));

        let err = CarouselConfig::parse("drag_damping = 1.5", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "drag_damping", .. }));

        let err = CarouselConfig::parse("slide_duration = -1.0", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slide_duration", .. }));

        let err = CarouselConfig::parse("slide_duration = inf", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slide_duration", .. }));

        let err = CarouselConfig::parse("slide_duration = nan", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slide_duration", .. }));

        let err = CarouselConfig::parse("slide_distance = -100.0", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slide_distance", .. }));

        let err = CarouselConfig::parse("slide_distance = nan", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slide_distance", .. }));

        let err = CarouselConfig::parse("step_threshold = inf", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "step_threshold", .. }));
    }

    #[test]
    fn cache_must_hold_the_preload_window() {
        let err = CarouselConfig::parse("cache_size = 1\npreload_range = 1", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cache_size", .. }));

        let err = CarouselConfig::parse("cache_size = 0\npreload_range = 0", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cache_size", .. }));

        let config = CarouselConfig::parse("cache_size = 3\npreload_range = 1", Path::new("a.toml")).unwrap();
        assert_eq!(config.preload_window(), 3);
        assert!(CarouselConfig::default().cache_size >= CarouselConfig::default().preload_window());
    }

    #[test]
    fn reports_parse_errors() {
        let err = CarouselConfig::parse("step_threshold = \"mucho\"", Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "drag_damping = 0.5\npreload_range = 1").unwrap();

        let config = CarouselConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.drag_damping, 0.5);
        assert_eq!(config.preload_range, 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CarouselConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
