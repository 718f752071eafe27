//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, ErrorKind};

/// Errors that occur while driving ports.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template path does not exist in the store.
    #[error("Template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// Template parsing or rendering failed.
    #[error("Rendering {template} failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// A formatter rejected generated content.
    #[error("Formatting {path} failed: {reason}")]
    FormattingFailed { path: PathBuf, reason: String },

    /// Compensating an already-applied change failed.
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateNotFound { path } => vec![
                format!("The template store has no entry {}", path.display()),
                "Check --templates-dir or EXTKIT_TEMPLATES_DIR".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Fix the Liquid syntax in {}", template),
                "Available variables: type, uuid, root_dir, build_dir, template_id, renderer_name, entries, formatted_type, uses_react, uses_typescript".into(),
            ],
            Self::FormattingFailed { path, .. } => vec![format!(
                "The generated {} is not valid for its file type; check the template that produced it",
                path.display()
            )],
            Self::RollbackFailed { path, .. } => vec![
                format!("Inspect {} manually", path.display()),
                "It may contain leftovers from the failed run".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. }
            | Self::RollbackFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::FormattingFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorKind::Io,
            Self::TemplateNotFound { .. } | Self::RenderingFailed { .. } => ErrorKind::Template,
            Self::FormattingFailed { .. } => ErrorKind::Format,
        }
    }
}
