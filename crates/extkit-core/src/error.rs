//! Unified error handling for extkit core.
//!
//! This module provides the root error type that wraps domain and application
//! errors, plus the pipeline failure report that names the failing step.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for extkit core operations.
#[derive(Debug, Error, Clone)]
pub enum ExtkitError {
    /// Errors from the domain layer (validation, merge rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, rendering, formatting).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A pipeline step failed and the run was rolled back.
    ///
    /// `cause` is the originating error. `rollback_errors` are secondary
    /// diagnostics collected while undoing; they never replace `cause`.
    #[error("step '{step}' failed: {cause}{}", rollback_note(.rollback_errors))]
    StepFailed {
        step: &'static str,
        #[source]
        cause: Box<ExtkitError>,
        rollback_errors: Vec<ExtkitError>,
    },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn rollback_note(errors: &[ExtkitError]) -> String {
    match errors.len() {
        0 => String::new(),
        1 => " (1 error during rollback)".to_string(),
        n => format!(" ({n} errors during rollback)"),
    }
}

impl ExtkitError {
    /// The innermost originating error, looking through step reports.
    pub fn primary(&self) -> &ExtkitError {
        match self {
            Self::StepFailed { cause, .. } => cause.primary(),
            other => other,
        }
    }

    /// Name of the failed pipeline step, if this error came from one.
    pub fn failed_step(&self) -> Option<&'static str> {
        match self {
            Self::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Errors raised while rolling back, empty if the run never got that far.
    pub fn rollback_errors(&self) -> &[ExtkitError] {
        match self {
            Self::StepFailed {
                rollback_errors, ..
            } => rollback_errors,
            _ => &[],
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::StepFailed {
                cause,
                rollback_errors,
                ..
            } => {
                let mut out = cause.suggestions();
                if rollback_errors.is_empty() {
                    out.push("All changes from this run were rolled back".into());
                } else {
                    out.push(
                        "Some changes could not be rolled back; inspect the target directory"
                            .into(),
                    );
                }
                out
            }
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Merge => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::StepFailed { cause, .. } => cause.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// The failure kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => match e {
                DomainError::MalformedManifest { .. }
                | DomainError::UnexpectedManifestShape { .. } => ErrorKind::Merge,
                _ => ErrorKind::Validation,
            },
            Self::Application(e) => e.kind(),
            Self::StepFailed { cause, .. } => cause.kind(),
            Self::Configuration { .. } => ErrorKind::Validation,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// What went wrong, independent of which layer noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request or unknown extension type.
    Validation,
    /// Create, remove, read or write failure.
    Io,
    /// Template missing, unparsable or failed to render.
    Template,
    /// A formatter rejected generated content.
    Format,
    /// An existing manifest is invalid or wrongly shaped.
    Merge,
}

/// Convenient result type alias.
pub type ExtkitResult<T> = Result<T, ExtkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn io_error() -> ExtkitError {
        ApplicationError::FilesystemError {
            path: PathBuf::from("/tmp/x"),
            reason: "denied".into(),
        }
        .into()
    }

    #[test]
    fn step_failure_exposes_primary_cause() {
        let err = ExtkitError::StepFailed {
            step: "merge-manifests",
            cause: Box::new(DomainError::MalformedManifest {
                format: "JSON",
                reason: "eof".into(),
            }
            .into()),
            rollback_errors: vec![],
        };

        assert_eq!(err.failed_step(), Some("merge-manifests"));
        assert_eq!(err.kind(), ErrorKind::Merge);
        assert!(matches!(
            err.primary(),
            ExtkitError::Domain(DomainError::MalformedManifest { .. })
        ));
        assert!(err.to_string().starts_with("step 'merge-manifests' failed"));
    }

    #[test]
    fn rollback_errors_are_reported_not_substituted() {
        let err = ExtkitError::StepFailed {
            step: "create-root",
            cause: Box::new(io_error()),
            rollback_errors: vec![io_error(), io_error()],
        };

        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.rollback_errors().len(), 2);
        assert!(err.to_string().ends_with("(2 errors during rollback)"));
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("could not be rolled back"))
        );
    }

    #[test]
    fn validation_errors_map_to_validation_kind() {
        let err: ExtkitError = DomainError::MissingRequiredField { field: "type" }.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.failed_step().is_none());
    }
}
