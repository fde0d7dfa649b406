//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//! The configuration carries the render defaults shared by every topology.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use skyline::DiagramError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for DiagramError {
    fn from(err: ConfigError) -> Self {
        DiagramError::Configuration(err.to_string())
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render defaults applied to every topology.
    #[serde(default)]
    render: RenderDefaults,
}

impl AppConfig {
    /// Returns the render defaults.
    pub fn render(&self) -> &RenderDefaults {
        &self.render
    }
}

/// Graph-level render defaults.
///
/// The defaults are the values the TechModa diagrams were originally
/// published with: a 24pt title and 1.5in of padding.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderDefaults {
    #[serde(default = "default_font_size")]
    font_size: f32,

    #[serde(default = "default_pad")]
    pad: f32,
}

impl RenderDefaults {
    /// Returns the title font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the padding factor.
    pub fn pad(&self) -> f32 {
        self.pad
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            pad: default_pad(),
        }
    }
}

fn default_font_size() -> f32 {
    24.0
}

fn default_pad() -> f32 {
    1.5
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (skyline/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DiagramError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("skyline/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "skyline", "skyline") {
        let config_dir = proj_dirs.config_dir();
        let system_config = config_dir.join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, DiagramError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_diagram_attrs() {
        let config = AppConfig::default();
        assert_eq!(config.render().font_size(), 24.0);
        assert_eq!(config.render().pad(), 1.5);
    }

    #[test]
    fn test_partial_config_falls_back_per_field() {
        let config: AppConfig = toml::from_str("[render]\nfont_size = 18.0\n").unwrap();
        assert_eq!(config.render().font_size(), 18.0);
        assert_eq!(config.render().pad(), 1.5);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.render().font_size(), 24.0);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, DiagramError::Configuration(_)));
    }
}
