//! Error handling for the extkit CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use extkit_core::{domain::DomainError, error::ExtkitError};

pub use extkit_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `extkit-core` or the adapters.
    #[error("{0}")]
    Core(#[from] ExtkitError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialise output: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],

            Self::ConfigError { .. } => vec![
                "Check the file printed by 'extkit config path'".into(),
                "Run 'extkit init --force' to write a fresh default config".into(),
            ],

            Self::Core(core) => {
                let mut out = core.suggestions();
                if let ExtkitError::Domain(
                    DomainError::MissingRequiredField { field } | DomainError::BlankField { field },
                ) = core
                {
                    if let Some(hint) = flag_hint(field) {
                        out.insert(0, hint.to_string());
                    }
                }
                out
            }

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Serialization(_) => Vec::new(),

            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Serialization(_) => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Rollback failures that accompany a failed scaffold.
    fn rollback_errors(&self) -> &[ExtkitError] {
        match self {
            Self::Core(core) => core.rollback_errors(),
            _ => &[],
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = String::new();

        let _ = write!(out, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(out, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = write!(out, "\n  {} {}\n", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let rollback = self.rollback_errors();
        if !rollback.is_empty() {
            let _ = write!(
                out,
                "\n{}\n",
                "Rollback was incomplete; these paths need manual attention:"
                    .yellow()
                    .bold()
            );
            for err in rollback {
                let _ = writeln!(out, "  {err}");
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = write!(out, "\n{}\n", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = write!(
                out,
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        out
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let rollback = self.rollback_errors();
        if !rollback.is_empty() {
            out.push_str("\nRollback was incomplete; these paths need manual attention:\n");
            for err in rollback {
                let _ = writeln!(out, "  {err}");
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(step) = self.failed_step() {
            tracing::debug!(step, "Scaffold step failed; changes were rolled back");
        }
    }

    fn failed_step(&self) -> Option<&'static str> {
        match self {
            Self::Core(core) => core.failed_step(),
            _ => None,
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    Configuration,
    /// Internal/system error.
    Internal,
}

/// Where a request field comes from on the command line.
fn flag_hint(field: &str) -> Option<&'static str> {
    match field {
        "template_id" => Some("Pass --template <ID> or set defaults.template in the config file"),
        "renderer" => Some("Pass --renderer <NAME> or set defaults.renderer in the config file"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    use extkit_core::application::ApplicationError;

    fn step_failed(rollback_errors: Vec<ExtkitError>) -> CliError {
        CliError::Core(ExtkitError::StepFailed {
            step: "merge-manifests",
            cause: Box::new(
                ApplicationError::FilesystemError {
                    path: PathBuf::from("/tmp/ext/package.json"),
                    reason: "disk full".into(),
                }
                .into(),
            ),
            rollback_errors,
        })
    }

    #[test]
    fn unknown_type_is_not_found() {
        let err: CliError = DomainError::UnknownExtensionType {
            value: "post-purchase".into(),
            available: vec!["checkout-ui".into()],
        }
        .into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.suggestions().iter().any(|s| s.contains("checkout-ui")));
    }

    #[test]
    fn missing_field_is_a_user_error() {
        let err: CliError = DomainError::MissingRequiredField {
            field: "template_id",
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        let suggestions = err.suggestions();
        assert!(suggestions[0].contains("--template"));
        assert!(suggestions.iter().any(|s| s.contains("'template_id'")));
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let core = CliError::Core(ExtkitError::Configuration {
            message: "templates directory not found".into(),
        });
        assert_eq!(core.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        assert_eq!(step_failed(Vec::new()).exit_code(), 1);
    }

    #[test]
    fn cancelled_is_user_error() {
        assert_eq!(CliError::Cancelled.exit_code(), 2);
    }

    #[test]
    fn format_plain_names_failed_step() {
        let s = step_failed(Vec::new()).format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("merge-manifests"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains("Rollback was incomplete"));
    }

    #[test]
    fn format_plain_lists_rollback_failures() {
        let err = step_failed(vec![
            ApplicationError::RollbackFailed {
                path: PathBuf::from("/tmp/ext/README.md"),
                reason: "permission denied".into(),
            }
            .into(),
        ]);
        let s = err.format_plain(true);
        assert!(s.contains("Rollback was incomplete"));
        assert!(s.contains("/tmp/ext/README.md"));
        assert!(!s.contains("--verbose"));
    }
}
