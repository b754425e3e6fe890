use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::rendering::RenderConfig;
use super::window::WindowConfig;
use crate::utils::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub rendering: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            rendering: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`AppConfig::load`], but any failure falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config, {} not loaded: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quadgl.toml");
        fs::write(
            &path,
            r#"
            log_level = "debug"

            [rendering]
            shader_path = "shaders/Other.shader"
            "#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(
            config.rendering.shader_path,
            PathBuf::from("shaders/Other.shader")
        );
        assert!(config.rendering.vsync);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quadgl.toml");
        fs::write(&path, "[window\nwidth = ").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_missing_config_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Io(_))));
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
