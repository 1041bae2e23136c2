#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Build orchestration for the Tracekit native SDK
//!
//! Drives CMake and CTest through a fixed stage sequence: configure, then
//! optionally build, test, coverage aggregation, and packaging. External
//! tools run as structured subprocesses with inherited stdio; their own
//! output is the diagnostic when something fails, and a failed command
//! aborts the remainder of the sequence immediately.
//!
//! The sequence short-circuits the way its flags nest: without `build`
//! nothing past configure runs, and without `test` nothing past build runs.
//! Packaging and the coverage target are only reachable on the full path.

mod cmake;
mod commands;
mod context;
mod inspect;
mod packaging;

pub use cmake::{build_args, configure_args, coverage_args, test_args};
pub use commands::execute;
pub use context::BuildContext;
pub use inspect::{inspect_artifacts, list_package_dir, listing_invocation};
pub use packaging::package_artifacts;

use std::path::PathBuf;
use std::time::Instant;
use tkbuild_errors::{Error, Result};
use tkbuild_events::EventEmitter;
use tkbuild_types::{BuildReport, Platform, Stage};
use tokio::fs;

/// Run the staged sequence described by the context
///
/// Returns a report covering the stages that ran. Wraps the run in
/// operation lifecycle events for the CLI's renderer.
///
/// # Errors
///
/// Returns an error when an external command fails or cannot be spawned,
/// or when packaging hits a filesystem error. The first failure aborts the
/// sequence.
pub async fn run(ctx: &BuildContext) -> Result<BuildReport> {
    let operation = ctx.operation();
    ctx.emit_operation_started(operation.clone());

    match run_stages(ctx).await {
        Ok(report) => {
            ctx.emit_operation_completed(operation, true);
            Ok(report)
        }
        Err(e) => {
            ctx.emit_operation_failed(operation, e.to_string());
            Err(e)
        }
    }
}

async fn run_stages(ctx: &BuildContext) -> Result<BuildReport> {
    let started = Instant::now();
    let mut stages = Vec::new();

    let build_dir = ctx.build_dir();
    fs::create_dir_all(&build_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, &build_dir))?;

    // Configure
    ctx.emit_stage_started(Stage::Configure);
    let args = cmake::configure_args(&build_dir, &ctx.source_dir(), ctx.platform, ctx.coverage);
    commands::execute(ctx, &ctx.config.tools.cmake, &args, None).await?;
    ctx.emit_stage_completed(Stage::Configure);
    stages.push(Stage::Configure);

    if !ctx.build {
        return Ok(finish(ctx, stages, Vec::new(), None, started));
    }

    // Build
    ctx.emit_stage_started(Stage::Build);
    let args = cmake::build_args(&build_dir, ctx.profile);
    commands::execute(ctx, &ctx.config.tools.cmake, &args, None).await?;
    ctx.emit_stage_completed(Stage::Build);
    stages.push(Stage::Build);

    if !ctx.test {
        return Ok(finish(ctx, stages, Vec::new(), None, started));
    }

    // Test, from inside the build directory
    ctx.emit_stage_started(Stage::Test);
    let args = cmake::test_args(ctx.profile);
    commands::execute(ctx, &ctx.config.tools.ctest, &args, Some(&build_dir)).await?;
    ctx.emit_stage_completed(Stage::Test);
    stages.push(Stage::Test);

    // Coverage aggregation, only when requested
    if ctx.coverage {
        ctx.emit_stage_started(Stage::Coverage);
        let args = cmake::coverage_args(&build_dir, &ctx.config.project.coverage_target);
        commands::execute(ctx, &ctx.config.tools.cmake, &args, Some(&build_dir)).await?;
        ctx.emit_stage_completed(Stage::Coverage);
        stages.push(Stage::Coverage);
    }

    // Package and list; osx additionally reports artifact architectures
    ctx.emit_stage_started(Stage::Package);
    let artifacts = packaging::package_artifacts(ctx).await?;
    inspect::list_package_dir(ctx).await?;
    if ctx.platform == Platform::Osx {
        inspect::inspect_artifacts(ctx, &artifacts).await?;
    }
    ctx.emit_stage_completed(Stage::Package);
    stages.push(Stage::Package);

    let package_dir = Some(ctx.package_dir());
    Ok(finish(ctx, stages, artifacts, package_dir, started))
}

fn finish(
    ctx: &BuildContext,
    stages: Vec<Stage>,
    artifacts: Vec<PathBuf>,
    package_dir: Option<PathBuf>,
    started: Instant,
) -> BuildReport {
    BuildReport {
        platform: ctx.platform,
        profile: ctx.profile,
        stages,
        artifacts,
        package_dir,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}
