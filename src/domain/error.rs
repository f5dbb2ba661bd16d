use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::permissions::PermissionFailure;
use super::persistence::PersistenceError;

/// Library-wide error type for lci operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Install configuration has not been published yet.
    #[error("Install config not found at {}. Run 'lci install' first.", .0.display())]
    ConfigMissing(PathBuf),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// The PHP executable could not be run.
    #[error("PHP executable '{0}' not found or not runnable")]
    RuntimeNotFound(String),

    /// Running PHP version is below the configured minimum.
    #[error("PHP {current} is not supported. Minimum required version is {minimum}")]
    UnsupportedVersion { current: String, minimum: String },

    /// Required extensions or modules are not available.
    #[error("Missing required extensions/modules: {}", .0.join(", "))]
    MissingCapabilities(Vec<String>),

    /// Required paths do not carry the expected permissions.
    #[error("Permission check failed: {}", format_permission_failures(.0))]
    PermissionDenied(Vec<PermissionFailure>),

    /// Environment template (.env.example) is missing.
    #[error("Environment template not found: {}", .0.display())]
    EnvTemplateMissing(PathBuf),

    /// Active environment file is missing.
    #[error("Environment file not found: {}", .0.display())]
    EnvFileMissing(PathBuf),

    /// No active APP_KEY line to receive a generated key.
    #[error("Unable to set application key. No APP_KEY variable was found in {}", .0.display())]
    AppKeyLineMissing(PathBuf),

    /// Interactive prompt could not be completed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Operator interrupted an interactive prompt.
    #[error("Aborted by operator")]
    Aborted,

    /// Admin account could not be saved.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A setup step failed; wraps the underlying reason.
    #[error("{step} failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<AppError>,
    },
}

fn format_permission_failures(failures: &[PermissionFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{} (requires {})", failure.path, failure.mode))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParseError(_)
            | AppError::UnsupportedVersion { .. }
            | AppError::Prompt(_) => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_)
            | AppError::RuntimeNotFound(_)
            | AppError::MissingCapabilities(_)
            | AppError::EnvTemplateMissing(_)
            | AppError::EnvFileMissing(_)
            | AppError::AppKeyLineMissing(_) => io::ErrorKind::NotFound,
            AppError::PermissionDenied(_) => io::ErrorKind::PermissionDenied,
            AppError::Aborted => io::ErrorKind::Interrupted,
            AppError::Persistence(_) => io::ErrorKind::Other,
            AppError::StepFailed { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_reports_step_and_reason() {
        let err = AppError::StepFailed {
            step: "System Check".to_string(),
            source: Box::new(AppError::UnsupportedVersion {
                current: "7.4.0".to_string(),
                minimum: "8.0.0".to_string(),
            }),
        };

        let message = err.to_string();
        assert!(message.starts_with("System Check failed:"));
        assert!(message.contains("7.4.0"));
        assert!(message.contains("8.0.0"));
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_capabilities_lists_every_name() {
        let err = AppError::MissingCapabilities(vec![
            "php:openssl".to_string(),
            "apache:mod_rewrite".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required extensions/modules: php:openssl, apache:mod_rewrite"
        );
    }

    #[test]
    fn permission_failures_list_path_and_mode() {
        let err = AppError::PermissionDenied(vec![PermissionFailure {
            path: "storage/logs/".to_string(),
            mode: "775".to_string(),
        }]);
        assert!(err.to_string().contains("storage/logs/ (requires 775)"));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
