//! Argument construction for the CMake and CTest invocations
//!
//! Pure functions so every vector can be unit tested without spawning
//! anything. The orchestrator feeds these to the command executor verbatim.

use std::path::Path;
use tkbuild_types::{BuildProfile, Platform};

/// Arguments for the configure step
///
/// The Xcode generator is selected for osx only; the platform define is
/// always passed; the coverage define is appended whenever coverage was
/// requested, independent of the build and test flags.
#[must_use]
pub fn configure_args(
    build_dir: &Path,
    source_dir: &Path,
    platform: Platform,
    coverage: bool,
) -> Vec<String> {
    let mut args = vec![
        "-B".to_string(),
        build_dir.display().to_string(),
        "-S".to_string(),
        source_dir.display().to_string(),
    ];

    if platform.uses_xcode_generator() {
        args.push("-G".to_string());
        args.push("Xcode".to_string());
    }

    args.push(format!("-DPLATFORM:STRING={}", platform.as_str()));

    if coverage {
        args.push("-DENABLE_COVERAGE=ON".to_string());
    }

    args
}

/// Arguments for the build step
#[must_use]
pub fn build_args(build_dir: &Path, profile: BuildProfile) -> Vec<String> {
    vec![
        "--build".to_string(),
        build_dir.display().to_string(),
        "--config".to_string(),
        profile.as_str().to_string(),
    ]
}

/// Arguments for the test step (run with the build directory as cwd)
#[must_use]
pub fn test_args(profile: BuildProfile) -> Vec<String> {
    vec![
        "--build-config".to_string(),
        profile.as_str().to_string(),
        "--verbose".to_string(),
        "--output-on-failure".to_string(),
    ]
}

/// Arguments for the coverage aggregation step
///
/// Drives the coverage custom target through the build tool; runs with the
/// build directory as cwd like the test step.
#[must_use]
pub fn coverage_args(build_dir: &Path, target: &str) -> Vec<String> {
    vec![
        "--build".to_string(),
        build_dir.display().to_string(),
        "--target".to_string(),
        target.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configure_args_linux() {
        let build = PathBuf::from("/src/build");
        let source = PathBuf::from("/src");
        let args = configure_args(&build, &source, Platform::LinuxX64, false);

        assert_eq!(
            args,
            vec![
                "-B",
                "/src/build",
                "-S",
                "/src",
                "-DPLATFORM:STRING=linux_x64"
            ]
        );
    }

    #[test]
    fn test_configure_args_osx_uses_xcode_generator() {
        let build = PathBuf::from("/src/build");
        let source = PathBuf::from("/src");
        let args = configure_args(&build, &source, Platform::Osx, false);

        assert_eq!(
            args,
            vec!["-B", "/src/build", "-S", "/src", "-G", "Xcode", "-DPLATFORM:STRING=osx"]
        );
    }

    #[test]
    fn test_configure_args_coverage_define() {
        let build = PathBuf::from("/src/build");
        let source = PathBuf::from("/src");
        let args = configure_args(&build, &source, Platform::Win64, true);

        assert_eq!(*args.last().unwrap(), "-DENABLE_COVERAGE=ON");
        assert!(args.iter().any(|a| a == "-DPLATFORM:STRING=win64"));
        assert!(!args.iter().any(|a| a == "Xcode"));
    }

    #[test]
    fn test_configure_args_no_generator_outside_osx() {
        let build = PathBuf::from("b");
        let source = PathBuf::from("s");
        for platform in [
            Platform::LinuxX64,
            Platform::LinuxX86,
            Platform::Win32,
            Platform::Win64,
            Platform::Uwp,
        ] {
            let args = configure_args(&build, &source, platform, false);
            assert!(!args.iter().any(|a| a == "-G"), "{platform} got a generator");
        }
    }

    #[test]
    fn test_build_args() {
        let build = PathBuf::from("/src/build");
        assert_eq!(
            build_args(&build, BuildProfile::Release),
            vec!["--build", "/src/build", "--config", "Release"]
        );
        assert_eq!(
            build_args(&build, BuildProfile::Debug),
            vec!["--build", "/src/build", "--config", "Debug"]
        );
    }

    #[test]
    fn test_test_args() {
        assert_eq!(
            test_args(BuildProfile::Debug),
            vec!["--build-config", "Debug", "--verbose", "--output-on-failure"]
        );
    }

    #[test]
    fn test_coverage_args() {
        let build = PathBuf::from("/src/build");
        assert_eq!(
            coverage_args(&build, "cov"),
            vec!["--build", "/src/build", "--target", "cov"]
        );
    }
}
