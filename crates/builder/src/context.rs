//! Build context for an orchestrated run

use std::path::PathBuf;
use tkbuild_config::Config;
use tkbuild_events::{EventEmitter, EventSender};
use tkbuild_types::{BuildProfile, Platform};

/// Build context describing one orchestrated run
///
/// Parsed once at process start and immutable afterwards; every stage reads
/// its inputs from here.
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Target platform
    pub platform: Platform,
    /// Configuration profile passed to build and test
    pub profile: BuildProfile,
    /// Run the build stage
    pub build: bool,
    /// Run the test stage
    pub test: bool,
    /// Instrument coverage and aggregate a coverage report
    pub coverage: bool,
    /// Layered configuration (paths, artifact fragment, tool programs)
    pub config: Config,
    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildContext {
    /// Create new build context
    #[must_use]
    pub fn new(platform: Platform, profile: BuildProfile, config: Config) -> Self {
        Self {
            platform,
            profile,
            build: false,
            test: false,
            coverage: false,
            config,
            event_sender: None,
        }
    }

    /// Enable the build stage
    #[must_use]
    pub fn with_build(mut self, build: bool) -> Self {
        self.build = build;
        self
    }

    /// Enable the test stage
    #[must_use]
    pub fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Enable coverage instrumentation and aggregation
    #[must_use]
    pub fn with_coverage(mut self, coverage: bool) -> Self {
        self.coverage = coverage;
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Source directory of the orchestrated project
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.config.source_dir()
    }

    /// Build output directory handed to the build tool
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.config.build_dir()
    }

    /// Tool-defined artifact location for the selected profile
    #[must_use]
    pub fn profile_dir(&self) -> PathBuf {
        self.config.profile_dir(self.profile)
    }

    /// Package directory assembled by the packaging stage
    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.config.package_dir()
    }

    /// Include tree shipped with the package
    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.config.include_dir()
    }

    /// Short operation description for events and logs
    #[must_use]
    pub fn operation(&self) -> String {
        format!("build {} ({})", self.platform, self.profile)
    }
}
