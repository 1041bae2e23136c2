//! Integration tests for error types

#[cfg(test)]
mod tests {
    use tkbuild_errors::*;

    #[test]
    fn test_error_conversion() {
        let build_err = BuildError::CommandSpawn {
            program: "cmake".into(),
            message: "No such file or directory".into(),
        };
        let err: Error = build_err.into();
        assert!(matches!(err, Error::Build(_)));

        let config_err = ConfigError::ParseError {
            message: "expected table".into(),
        };
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BuildError::CommandFailed {
            program: "ctest".into(),
            exit_code: Some(8),
        };
        assert_eq!(err.to_string(), "command failed: ctest exited with code 8");

        let err = BuildError::CommandFailed {
            program: "cmake".into(),
            exit_code: None,
        };
        assert_eq!(err.to_string(), "command failed: cmake exited with signal");

        let err = ConfigError::InvalidValue {
            field: "TKBUILD_COLOR".into(),
            value: "purple".into(),
        };
        assert_eq!(err.to_string(), "invalid value for TKBUILD_COLOR: purple");
    }

    #[test]
    fn test_error_clone() {
        let err = BuildError::InvalidArtifactPattern {
            pattern: "*[.*".into(),
            message: "unclosed character class".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_exit_code_propagation() {
        // A failed child's exit status becomes the process exit code
        let err: Error = BuildError::CommandFailed {
            program: "cmake".into(),
            exit_code: Some(2),
        }
        .into();
        assert_eq!(err.exit_code(), 2);

        // Signal-killed children have no code to propagate
        let err: Error = BuildError::CommandFailed {
            program: "cmake".into(),
            exit_code: None,
        }
        .into();
        assert_eq!(err.exit_code(), 1);

        // Internal and config errors exit 1
        assert_eq!(Error::internal("boom").exit_code(), 1);
        let err: Error = ConfigError::NotFound {
            path: "/tmp/none.toml".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
    }

    #[test]
    fn test_user_facing_codes() {
        let err: Error = BuildError::CommandFailed {
            program: "cmake".into(),
            exit_code: Some(1),
        }
        .into();
        assert_eq!(err.user_code(), Some("build.command_failed"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());

        let err: Error = ConfigError::ParseError {
            message: "bad toml".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("config.parse_error"));
    }
}
