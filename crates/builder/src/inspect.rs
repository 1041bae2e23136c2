//! Package content listing and artifact inspection

use std::path::{Path, PathBuf};
use tkbuild_errors::Result;
use tkbuild_events::EventEmitter;
use tkbuild_types::Platform;

use crate::commands;
use crate::context::BuildContext;

/// Program and arguments used to list the package directory
///
/// Windows targets go through `cmd /C dir` since `dir` is a shell builtin
/// with no standalone executable; everything else, uwp included, uses
/// `ls -la`.
#[must_use]
pub fn listing_invocation(platform: Platform, package_dir: &Path) -> (String, Vec<String>) {
    if platform.is_windows() {
        (
            "cmd".to_string(),
            vec![
                "/C".to_string(),
                "dir".to_string(),
                package_dir.display().to_string(),
            ],
        )
    } else {
        (
            "ls".to_string(),
            vec!["-la".to_string(), package_dir.display().to_string()],
        )
    }
}

/// List the assembled package directory with the platform's native tool
///
/// # Errors
///
/// Returns an error if the listing command cannot be spawned or fails.
pub async fn list_package_dir(ctx: &BuildContext) -> Result<()> {
    let (program, args) = listing_invocation(ctx.platform, &ctx.package_dir());
    commands::execute(ctx, &program, &args, None).await
}

/// Report artifact architectures with `lipo -info`
///
/// Only meaningful on osx. When no artifacts were copied the inspection is
/// skipped with a warning instead of invoking the tool with an empty file
/// list.
///
/// # Errors
///
/// Returns an error if `lipo` cannot be spawned or fails.
pub async fn inspect_artifacts(ctx: &BuildContext, artifacts: &[PathBuf]) -> Result<()> {
    if artifacts.is_empty() {
        ctx.emit_warning("no artifacts in package, skipping architecture inspection");
        return Ok(());
    }

    let mut args = vec!["-info".to_string()];
    args.extend(artifacts.iter().map(|p| p.display().to_string()));
    commands::execute(ctx, &ctx.config.tools.lipo, &args, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_invocation_windows_targets() {
        let pkg = PathBuf::from("/src/build/package");
        for platform in [Platform::Win32, Platform::Win64] {
            let (program, args) = listing_invocation(platform, &pkg);
            assert_eq!(program, "cmd");
            assert_eq!(args, vec!["/C", "dir", "/src/build/package"]);
        }
    }

    #[test]
    fn test_listing_invocation_unix_targets() {
        let pkg = PathBuf::from("/src/build/package");
        for platform in [
            Platform::LinuxX64,
            Platform::LinuxX86,
            Platform::Osx,
            Platform::Uwp,
        ] {
            let (program, args) = listing_invocation(platform, &pkg);
            assert_eq!(program, "ls", "{platform} should list with ls");
            assert_eq!(args, vec!["-la", "/src/build/package"]);
        }
    }
}
