// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside pipeline failure reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Field '{field}' must not be blank")]
    BlankField { field: &'static str },

    #[error("Invalid extension type '{value}': {reason}")]
    InvalidExtensionType { value: String, reason: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown extension type '{value}'")]
    UnknownExtensionType {
        value: String,
        available: Vec<String>,
    },

    // ========================================================================
    // Merge Errors
    // ========================================================================
    #[error("Existing {format} manifest is malformed: {reason}")]
    MalformedManifest { format: &'static str, reason: String },

    #[error("Existing manifest has an unexpected shape: {reason}")]
    UnexpectedManifestShape { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } | Self::BlankField { field } => vec![
                format!("Provide a value for '{}'", field),
                "A scaffold needs a type, a renderer, a template and a root directory".into(),
            ],
            Self::InvalidExtensionType { .. } => vec![
                "Extension types are lowercase slugs, e.g. checkout-ui".into(),
                "Try: extkit list".into(),
            ],
            Self::UnknownExtensionType { value, available } => {
                let mut out = vec![format!("No templates exist for '{}'", value)];
                if available.is_empty() {
                    out.push("The active template store is empty".into());
                } else {
                    out.push("Available types:".into());
                    out.extend(available.iter().map(|t| format!("  • {}", t)));
                }
                out
            }
            Self::MalformedManifest { format, .. } => vec![
                format!("Fix the existing {} file so it parses, then retry", format),
                "Nothing was changed on disk".into(),
            ],
            Self::UnexpectedManifestShape { .. } => vec![
                "dependencies and devDependencies must map package names to version strings"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::BlankField { .. }
            | Self::InvalidExtensionType { .. } => ErrorCategory::Validation,
            Self::UnknownExtensionType { .. } => ErrorCategory::NotFound,
            Self::MalformedManifest { .. } | Self::UnexpectedManifestShape { .. } => {
                ErrorCategory::Merge
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Merge,
}
