//! Package assembly for built artifacts
//!
//! Copies the profile output's artifact files flat into the package
//! directory, then merges the project's include tree on top. Zero artifact
//! matches is a valid outcome; a missing include tree is not.

use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use tkbuild_errors::{BuildError, Error, Result};
use tkbuild_events::{AppEvent, BuildEvent, EventEmitter};
use tokio::fs;

use crate::context::BuildContext;

/// Assemble the package directory
///
/// Creates `<build_dir>/package/`, copies every file in the profile output
/// directory whose name matches `*<artifact>.*`, then copies the include
/// tree into the package. Returns the in-package paths of the copied
/// artifacts, sorted by file name.
///
/// # Errors
///
/// Returns an error if the artifact fragment produces an invalid glob or a
/// filesystem operation fails. An absent profile output directory is not an
/// error; it simply yields zero artifacts.
pub async fn package_artifacts(ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let package_dir = ctx.package_dir();
    fs::create_dir_all(&package_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, &package_dir))?;

    let matcher = artifact_matcher(&ctx.config.project.artifact)?;
    let artifacts = copy_artifacts(ctx, &matcher, &package_dir).await?;

    let include_dest = package_dir.join(&ctx.config.project.include_dir);
    copy_tree(&ctx.include_dir(), &include_dest).await?;

    ctx.emit(AppEvent::Build(BuildEvent::PackageReady {
        package_dir,
        artifact_count: artifacts.len(),
    }));

    Ok(artifacts)
}

/// Build the file-name matcher for the configured artifact fragment
fn artifact_matcher(artifact: &str) -> Result<GlobMatcher> {
    let pattern = format!("*{artifact}.*");
    let glob = Glob::new(&pattern).map_err(|e| {
        Error::from(BuildError::InvalidArtifactPattern {
            pattern,
            message: e.to_string(),
        })
    })?;
    Ok(glob.compile_matcher())
}

/// Copy matching files from the profile output directory into the package
///
/// The listing is flat; artifact files never live in subdirectories of the
/// profile output.
async fn copy_artifacts(
    ctx: &BuildContext,
    matcher: &GlobMatcher,
    package_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let profile_dir = ctx.profile_dir();

    let Ok(mut entries) = fs::read_dir(&profile_dir).await else {
        ctx.emit_debug(format!(
            "no profile output at {}, skipping artifact copy",
            profile_dir.display()
        ));
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(&e, &profile_dir))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::io_with_path(&e, entry.path()))?;
        if file_type.is_file() && matcher.is_match(entry.file_name()) {
            names.push(entry.file_name());
        }
    }
    names.sort();

    let mut copied = Vec::with_capacity(names.len());
    for name in names {
        let source = profile_dir.join(&name);
        let dest = package_dir.join(&name);
        fs::copy(&source, &dest)
            .await
            .map_err(|e| Error::io_with_path(&e, &source))?;
        ctx.emit(AppEvent::Build(BuildEvent::ArtifactCopied {
            file: dest.clone(),
        }));
        copied.push(dest);
    }

    if copied.is_empty() {
        ctx.emit_debug(format!(
            "no files matching *{}.* in {}",
            ctx.config.project.artifact,
            profile_dir.display()
        ));
    }

    Ok(copied)
}

/// Recursively copy a directory tree
///
/// Directories are created as needed and existing destination files are
/// overwritten; extra files already in the destination are left alone.
async fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    let mut stack = vec![(src.to_path_buf(), dest.to_path_buf())];

    while let Some((from, to)) = stack.pop() {
        let mut entries = fs::read_dir(&from)
            .await
            .map_err(|e| Error::io_with_path(&e, &from))?;
        fs::create_dir_all(&to)
            .await
            .map_err(|e| Error::io_with_path(&e, &to))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io_with_path(&e, &from))?
        {
            let source = entry.path();
            let target = to.join(entry.file_name());
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Error::io_with_path(&e, &source))?;
            if file_type.is_dir() {
                stack.push((source, target));
            } else {
                fs::copy(&source, &target)
                    .await
                    .map_err(|e| Error::io_with_path(&e, &source))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_artifact_matcher_names() {
        let matcher = artifact_matcher("Tracekit").unwrap();

        assert!(matcher.is_match("libTracekit.dylib"));
        assert!(matcher.is_match("libTracekit.so"));
        assert!(matcher.is_match("Tracekit.dll"));
        assert!(matcher.is_match("libTracekit.a"));

        assert!(!matcher.is_match("libTracekit"));
        assert!(!matcher.is_match("libOther.so"));
        assert!(!matcher.is_match("TracekitExtra.so"));
    }

    #[test]
    fn test_artifact_matcher_rejects_bad_fragment() {
        let err = artifact_matcher("Trace[kit").unwrap_err();
        assert!(err.to_string().contains("*Trace[kit.*"));
    }

    #[tokio::test]
    async fn test_copy_tree_merges_and_overwrites() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("include");
        let dest = temp.path().join("package").join("include");

        fs::create_dir_all(src.join("nested")).await.unwrap();
        fs::write(src.join("api.h"), "new").await.unwrap();
        fs::write(src.join("nested").join("detail.h"), "x").await.unwrap();

        fs::create_dir_all(&dest).await.unwrap();
        fs::write(dest.join("api.h"), "old").await.unwrap();
        fs::write(dest.join("stale.h"), "keep").await.unwrap();

        copy_tree(&src, &dest).await.unwrap();

        assert_eq!(fs::read_to_string(dest.join("api.h")).await.unwrap(), "new");
        assert_eq!(
            fs::read_to_string(dest.join("nested").join("detail.h"))
                .await
                .unwrap(),
            "x"
        );
        // Pre-existing files not present in the source stay put
        assert_eq!(
            fs::read_to_string(dest.join("stale.h")).await.unwrap(),
            "keep"
        );
    }

    #[tokio::test]
    async fn test_copy_tree_missing_source_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("include");
        let dest = temp.path().join("out");

        let err = copy_tree(&missing, &dest).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
