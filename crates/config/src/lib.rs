#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for tkbuild
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (./tkbuild.toml or ~/.config/tkbuild/config.toml)
//! - Environment variables
//! - CLI flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tkbuild_errors::{ConfigError, Error};
use tkbuild_types::{BuildProfile, ColorChoice};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Project layout configuration
///
/// The artifact fragment identifies packageable build products by file name.
/// It is an external naming convention of the built project, which is exactly
/// why it lives in configuration rather than code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Source directory; defaults to the current working directory
    pub source_dir: Option<PathBuf>,
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    #[serde(default = "default_package_dir")]
    pub package_dir: String,
    #[serde(default = "default_include_dir")]
    pub include_dir: String,
    #[serde(default = "default_artifact")]
    pub artifact: String,
    #[serde(default = "default_coverage_target")]
    pub coverage_target: String,
}

/// External tool configuration
///
/// Bare program names resolve via PATH; absolute paths pin a specific
/// installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_cmake")]
    pub cmake: String,
    #[serde(default = "default_ctest")]
    pub ctest: String,
    #[serde(default = "default_lipo")]
    pub lipo: String,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            build_dir: default_build_dir(),
            package_dir: default_package_dir(),
            include_dir: default_include_dir(),
            artifact: default_artifact(),
            coverage_target: default_coverage_target(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cmake: default_cmake(),
            ctest: default_ctest(),
            lipo: default_lipo(),
        }
    }
}

// Default value functions for serde

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_package_dir() -> String {
    "package".to_string()
}

fn default_include_dir() -> String {
    "include".to_string()
}

fn default_artifact() -> String {
    "Tracekit".to_string()
}

fn default_coverage_target() -> String {
    "cov".to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

fn default_ctest() -> String {
    "ctest".to_string()
}

fn default_lipo() -> String {
    "lipo".to_string()
}

impl Config {
    /// Get the default config file path in the user config directory
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("tkbuild").join("config.toml"))
    }

    /// Get the project-local config file path (`tkbuild.toml` in the cwd)
    #[must_use]
    pub fn project_path() -> PathBuf {
        PathBuf::from("tkbuild.toml")
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        debug!("loading configuration from {}", path.display());

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// Lookup order: project-local `tkbuild.toml`, then the user config
    /// directory, then hard-coded defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let project_path = Self::project_path();
        if project_path.exists() {
            return Self::load_from_file(&project_path).await;
        }

        let config_path = Self::default_path()?;
        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: &Option<std::path::PathBuf>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // TKBUILD_COLOR
        if let Ok(color) = std::env::var("TKBUILD_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "TKBUILD_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // TKBUILD_ARTIFACT
        if let Ok(artifact) = std::env::var("TKBUILD_ARTIFACT") {
            if artifact.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "TKBUILD_ARTIFACT".to_string(),
                    value: artifact,
                }
                .into());
            }
            self.project.artifact = artifact;
        }

        // TKBUILD_BUILD_DIR
        if let Ok(build_dir) = std::env::var("TKBUILD_BUILD_DIR") {
            if build_dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "TKBUILD_BUILD_DIR".to_string(),
                    value: build_dir,
                }
                .into());
            }
            self.project.build_dir = build_dir;
        }

        // TKBUILD_CMAKE
        if let Ok(cmake) = std::env::var("TKBUILD_CMAKE") {
            if cmake.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "TKBUILD_CMAKE".to_string(),
                    value: cmake,
                }
                .into());
            }
            self.tools.cmake = cmake;
        }

        // TKBUILD_CTEST
        if let Ok(ctest) = std::env::var("TKBUILD_CTEST") {
            if ctest.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "TKBUILD_CTEST".to_string(),
                    value: ctest,
                }
                .into());
            }
            self.tools.ctest = ctest;
        }

        Ok(())
    }

    /// Get the source directory (with default)
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.project
            .source_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the build output directory
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.source_dir().join(&self.project.build_dir)
    }

    /// Get the package directory under the build output directory
    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.build_dir().join(&self.project.package_dir)
    }

    /// Get the include directory shipped with the package
    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.source_dir().join(&self.project.include_dir)
    }

    /// Get the tool-defined artifact location for a configuration profile
    #[must_use]
    pub fn profile_dir(&self, profile: BuildProfile) -> PathBuf {
        self.build_dir().join(profile.as_str())
    }

    /// Get the log directory used by `--debug`
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.build_dir().join("logs")
    }
}
