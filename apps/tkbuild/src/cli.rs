//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;
use tkbuild_types::{BuildProfile, ColorChoice, Platform};

/// tkbuild - build, test, and packaging driver for the Tracekit native SDK
#[derive(Parser)]
#[command(name = "tkbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build, test, and package the Tracekit native SDK")]
#[command(long_about = None)]
pub struct Cli {
    /// Platform to build for
    #[arg(long, value_enum)]
    pub platform: Platform,

    /// Configuration type
    #[arg(long = "cfg", value_enum, default_value_t = BuildProfile::Debug)]
    pub cfg: BuildProfile,

    /// Execute the build step
    #[arg(long)]
    pub build: bool,

    /// Execute the test step
    #[arg(long)]
    pub test: bool,

    /// Generate code coverage report
    #[arg(long)]
    pub coverage: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global output and configuration arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output the final report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to the build log directory
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Requested steps for the startup log line
    pub fn requested_steps(&self) -> Vec<&'static str> {
        let mut steps = vec!["configure"];
        if self.build {
            steps.push("build");
        }
        if self.test {
            steps.push("test");
        }
        if self.coverage {
            steps.push("coverage");
        }
        steps
    }
}
