use std::path::PathBuf;
use std::time::Duration;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(cycle_radar::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum CycleRadarError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(cycle_radar::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error("Invalid entity manifest '{path}'")]
    #[diagnostic(
        code(cycle_radar::entity_parse_error),
        help("Entity manifests must be a JSON array of objects with 'filePath' and 'dependencies'")
    )]
    EntityParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(cycle_radar::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(cycle_radar::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(cycle_radar::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(cycle_radar::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Invalid exclude pattern '{pattern}'")]
    #[diagnostic(
        code(cycle_radar::invalid_glob),
        help("Exclude patterns use glob syntax, e.g. 'src/generated/**'")
    )]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Failures of the external cycle detector.
///
/// These never leave the detector: a failing external source contributes
/// zero cycles and the run continues with internal analysis.
#[derive(Error, Debug, Diagnostic)]
pub enum ExternalToolError {
    #[error("Failed to launch external tool '{program}'")]
    #[diagnostic(
        code(cycle_radar::external::spawn),
        help("Install the tool or disable it with enable_external_tool = false")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External tool '{program}' timed out after {timeout:?}")]
    #[diagnostic(code(cycle_radar::external::timeout))]
    Timeout { program: String, timeout: Duration },

    #[error("External tool '{program}' exited with status {code:?}")]
    #[diagnostic(code(cycle_radar::external::exit_status))]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("External tool '{program}' produced malformed output")]
    #[diagnostic(
        code(cycle_radar::external::malformed_output),
        help("Expected a JSON array of cycles, each an array of file paths")
    )]
    MalformedOutput {
        program: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error while talking to external tool '{program}'")]
    #[diagnostic(code(cycle_radar::external::io))]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_toml_parse_error_display() {
        let source_code = "invalid = toml content";
        let toml_err = toml::from_str::<toml::Value>(source_code).unwrap_err();

        let error = TomlParseError {
            file: "cycle-radar.toml".to_string(),
            source_code: NamedSource::new("cycle-radar.toml", source_code.to_string()),
            span: Some((10, 4).into()),
            source: toml_err,
        };

        assert_eq!(
            error.to_string(),
            "Invalid TOML syntax in 'cycle-radar.toml'"
        );
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = CycleRadarError::FileReadError {
            path: PathBuf::from("/tmp/missing.json"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.json'");
    }

    #[test]
    fn test_entity_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error = CycleRadarError::EntityParseError {
            path: PathBuf::from("entities.json"),
            source: json_err,
        };

        assert_eq!(error.to_string(), "Invalid entity manifest 'entities.json'");
    }

    #[test]
    fn test_configuration_error() {
        let error = CycleRadarError::ConfigurationError {
            message: "max_cycle_length must be at least 2".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: max_cycle_length must be at least 2"
        );
    }

    #[test]
    fn test_external_tool_timeout_display() {
        let error = ExternalToolError::Timeout {
            program: "madge".to_string(),
            timeout: Duration::from_secs(60),
        };

        assert_eq!(
            error.to_string(),
            "External tool 'madge' timed out after 60s"
        );
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let file_err = CycleRadarError::FileReadError {
            path: PathBuf::from("test.txt"),
            source: io_err,
        };

        assert!(file_err.code().is_some());
        assert!(file_err.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let err: CycleRadarError = io_err.into();

        match err {
            CycleRadarError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let err: CycleRadarError = json_err.into();

        match err {
            CycleRadarError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }
}
