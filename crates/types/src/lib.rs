#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for tkbuild
//!
//! This crate provides the fundamental types shared across the system:
//! the target platform and build profile selectors, the build stage
//! enumeration, and the final build report.

pub mod reports;

pub use reports::BuildReport;

use serde::{Deserialize, Serialize};

/// Target platform the native library is built for
///
/// The serialized name is also the value passed to the build tool as the
/// platform definition flag, so it must stay in sync with the CMake side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    LinuxX64,
    LinuxX86,
    Osx,
    Win32,
    Win64,
    Uwp,
}

impl Platform {
    /// Identifier as passed on the command line and to the build tool
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinuxX64 => "linux_x64",
            Self::LinuxX86 => "linux_x86",
            Self::Osx => "osx",
            Self::Win32 => "win32",
            Self::Win64 => "win64",
            Self::Uwp => "uwp",
        }
    }

    /// Whether this target uses Windows-style tooling for directory listings
    ///
    /// Matches on the `win` identifier prefix, so `uwp` is intentionally
    /// not included.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.as_str().starts_with("win")
    }

    /// Whether the configure step selects the Xcode generator
    #[must_use]
    pub fn uses_xcode_generator(&self) -> bool {
        matches!(self, Self::Osx)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Implement clap::ValueEnum for Platform so CLI names match the serde names
impl clap::ValueEnum for Platform {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::LinuxX64,
            Self::LinuxX86,
            Self::Osx,
            Self::Win32,
            Self::Win64,
            Self::Uwp,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Build configuration profile passed to every profile-aware tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildProfile {
    Release,
    Debug,
}

impl BuildProfile {
    /// Profile name as the build and test tools expect it
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
        }
    }
}

impl std::fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Implement clap::ValueEnum for BuildProfile; the capitalized names are the
// tool-facing convention and the CLI keeps them verbatim
impl clap::ValueEnum for BuildProfile {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Release, Self::Debug]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self::Debug
    }
}

/// One step of the fixed configure, build, test, coverage, package
/// sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Configure,
    Build,
    Test,
    Coverage,
    Package,
}

impl Stage {
    /// Lowercase stage name for display and logging
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Build => "build",
            Self::Test => "test",
            Self::Coverage => "coverage",
            Self::Package => "package",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
