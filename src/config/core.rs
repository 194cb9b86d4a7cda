use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::rendering::RenderConfig;
use super::window::WindowConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FUTIUM_CONFIG";
const CONFIG_FILE: &str = "futium.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Couldn't determine config directory")]
    NoConfigDir,

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub rendering: RenderConfig,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            rendering: RenderConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, writing the defaults there first if it doesn't exist.
    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = EngineConfig::default();
            config.save(path)?;
            return Ok(config);
        }
        Self::from_path(path)
    }

    /// Like [`load_or_create_at`](Self::load_or_create_at), but any failure
    /// yields the defaults along with the error that caused the fallback.
    pub fn load_or_default_at(path: &Path) -> LoadedConfig {
        match Self::load_or_create_at(path) {
            Ok(config) => LoadedConfig {
                config,
                fallback: None,
            },
            Err(e) => LoadedConfig::defaults(e),
        }
    }

    /// An explicit `FUTIUM_CONFIG` file must load; the platform config file
    /// falls back to the defaults.
    pub fn load_or_default() -> Result<LoadedConfig, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(LoadedConfig {
                config: Self::from_path(Path::new(&path))?,
                fallback: None,
            });
        }

        Ok(match default_config_path() {
            Ok(path) => Self::load_or_default_at(&path),
            Err(e) => LoadedConfig::defaults(e),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                window.width, window.height
            )));
        }
        if window.gl_version() < WindowConfig::MIN_GL_VERSION {
            let (major, minor) = WindowConfig::MIN_GL_VERSION;
            return Err(ConfigError::Invalid(format!(
                "OpenGL {}.{} requested, at least {}.{} is required",
                window.gl_major, window.gl_minor, major, minor
            )));
        }

        let colors = [
            ("clear_color", &self.rendering.clear_color),
            ("triangle_color", &self.rendering.triangle_color),
        ];
        for (name, color) in colors {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::Invalid(format!(
                    "{} components must be within [0, 1], got {:?}",
                    name, color
                )));
            }
        }
        Ok(())
    }
}

/// Config picked at startup.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: EngineConfig,
    /// Why the defaults are in use, if they are.
    pub fallback: Option<ConfigError>,
}

impl LoadedConfig {
    fn defaults(reason: ConfigError) -> Self {
        Self {
            config: EngineConfig::default(),
            fallback: Some(reason),
        }
    }
}

fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "futium", "Futium").ok_or(ConfigError::NoConfigDir)?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_original_program() {
        let config = EngineConfig::default();
        assert_eq!(config.window.title, "Futium Game Engine");
        assert_eq!((config.window.width, config.window.height), (800, 800));
        assert_eq!(config.window.gl_version(), (3, 3));
        assert_eq!(config.rendering.clear_color, [0.93, 1.0, 0.99, 1.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            log_level = "debug"

            [window]
            title = "Tiny"
            vsync = false
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.window.title, "Tiny");
        assert!(!config.window.vsync);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.rendering, RenderConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero = EngineConfig::from_toml_str("[window]\nwidth = 0\n");
        assert!(matches!(zero, Err(ConfigError::Invalid(_))));

        let old_gl = EngineConfig::from_toml_str("[window]\ngl_major = 2\ngl_minor = 1\n");
        assert!(matches!(old_gl, Err(ConfigError::Invalid(_))));

        let color = EngineConfig::from_toml_str("[rendering]\nclear_color = [1.5, 0.0, 0.0, 1.0]\n");
        assert!(matches!(color, Err(ConfigError::Invalid(_))));

        let newer_gl = EngineConfig::from_toml_str("[window]\ngl_major = 4\ngl_minor = 1\n");
        assert!(newer_gl.is_ok());
    }

    #[test]
    fn test_fractional_minor_version_is_rejected() {
        let result = EngineConfig::from_toml_str("[window]\ngl_minor = 3.3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let created = EngineConfig::load_or_create_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, EngineConfig::default());

        let mut changed = created.clone();
        changed.window.title = "Reloaded".to_string();
        changed.save(&path).unwrap();

        let loaded = EngineConfig::load_or_create_at(&path).unwrap();
        assert_eq!(loaded.window.title, "Reloaded");
    }

    #[test]
    fn test_unwritable_config_dir_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("futium");
        fs::write(&blocker, "not a directory").unwrap();

        let loaded = EngineConfig::load_or_default_at(&blocker.join(CONFIG_FILE));
        assert_eq!(loaded.config, EngineConfig::default());
        assert!(matches!(loaded.fallback, Some(ConfigError::Io { .. })));
    }

    #[test]
    fn test_broken_config_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[window]\nwidth = \"wide\"\n").unwrap();

        let loaded = EngineConfig::load_or_default_at(&path);
        assert_eq!(loaded.config, EngineConfig::default());
        assert!(matches!(loaded.fallback, Some(ConfigError::Parse(_))));
    }

    #[test]
    fn test_readable_config_has_no_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "log_level = \"warn\"\n").unwrap();

        let loaded = EngineConfig::load_or_default_at(&path);
        assert_eq!(loaded.config.log_level, "warn");
        assert!(loaded.fallback.is_none());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match EngineConfig::from_path(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
