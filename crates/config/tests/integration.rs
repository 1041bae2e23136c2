//! Integration tests for config

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;
    use tkbuild_config::*;
    use tkbuild_types::{BuildProfile, ColorChoice};

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
color = "never"

[project]
source_dir = "/work/tracekit"
build_dir = "out"
artifact = "Telemetry"

[tools]
cmake = "/opt/cmake/bin/cmake"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(
            config.project.source_dir,
            Some(PathBuf::from("/work/tracekit"))
        );
        assert_eq!(config.project.build_dir, "out");
        assert_eq!(config.project.artifact, "Telemetry");
        // Unset fields fall back to defaults
        assert_eq!(config.project.package_dir, "package");
        assert_eq!(config.project.coverage_target, "cov");
        assert_eq!(config.tools.cmake, "/opt/cmake/bin/cmake");
        assert_eq!(config.tools.ctest, "ctest");

        assert_eq!(config.build_dir(), PathBuf::from("/work/tracekit/out"));
        assert_eq!(
            config.profile_dir(BuildProfile::Debug),
            PathBuf::from("/work/tracekit/out/Debug")
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Config::load_from_file(std::path::Path::new("/nonexistent/tkbuild.toml")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[project\nbuild_dir = ").unwrap();

        let result = Config::load_from_file(temp_file.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // Clean up any existing env vars first
        std::env::remove_var("TKBUILD_COLOR");
        std::env::remove_var("TKBUILD_ARTIFACT");
        std::env::remove_var("TKBUILD_CMAKE");

        std::env::set_var("TKBUILD_COLOR", "always");
        std::env::set_var("TKBUILD_ARTIFACT", "Telemetry");
        std::env::set_var("TKBUILD_CMAKE", "/usr/local/bin/cmake");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.project.artifact, "Telemetry");
        assert_eq!(config.tools.cmake, "/usr/local/bin/cmake");

        // Clean up
        std::env::remove_var("TKBUILD_COLOR");
        std::env::remove_var("TKBUILD_ARTIFACT");
        std::env::remove_var("TKBUILD_CMAKE");
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("TKBUILD_COLOR");
        std::env::set_var("TKBUILD_COLOR", "invalid");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        std::env::remove_var("TKBUILD_COLOR");
    }

    #[test]
    fn test_empty_artifact_env_rejected() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var("TKBUILD_ARTIFACT");
        std::env::set_var("TKBUILD_ARTIFACT", "");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        std::env::remove_var("TKBUILD_ARTIFACT");
    }

    #[test]
    fn test_empty_tool_env_rejected() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        // An empty tool path would only surface later as a spawn failure,
        // so it is rejected at merge time like the other variables
        for var in ["TKBUILD_CMAKE", "TKBUILD_CTEST"] {
            std::env::remove_var(var);
            std::env::set_var(var, "");

            let mut config = Config::default();
            let result = config.merge_env();
            assert!(result.is_err(), "{var} should reject an empty value");

            std::env::remove_var(var);
        }

        // Defaults stay intact after the rejection
        let config = Config::default();
        assert_eq!(config.tools.cmake, "cmake");
        assert_eq!(config.tools.ctest, "ctest");
    }
}
