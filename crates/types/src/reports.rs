//! Report type for a completed run

use crate::{BuildProfile, Platform, Stage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a tkbuild run
///
/// Produced by the orchestrator after the last requested stage and rendered
/// by the CLI, either as human-readable lines or as JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildReport {
    /// Target platform of the run
    pub platform: Platform,
    /// Configuration profile used for build and test
    pub profile: BuildProfile,
    /// Stages that actually ran, in order
    pub stages: Vec<Stage>,
    /// Artifact files copied into the package directory
    pub artifacts: Vec<PathBuf>,
    /// Package directory, when the packaging stage was reached
    pub package_dir: Option<PathBuf>,
    /// Total execution time
    pub duration_ms: u64,
}

impl BuildReport {
    /// Whether the run stopped before packaging because a later stage was
    /// not requested
    #[must_use]
    pub fn short_circuited(&self) -> bool {
        self.package_dir.is_none()
    }
}
