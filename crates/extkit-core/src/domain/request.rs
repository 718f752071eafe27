//! The scaffold request and its builder.
//!
//! A `ScaffoldRequest` is the validated entry contract: the four values every
//! scaffold needs (type, renderer, template, root directory) plus optional
//! overrides. The builder collects values from any source (CLI flags, config
//! defaults) and `build()` rejects missing or blank fields before anything
//! touches the filesystem.
//!
//! # Domain purity
//!
//! This module must not import `tracing` or perform I/O.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::error::DomainError;

/// Build directory used when the caller does not supply one.
pub const DEFAULT_BUILD_DIR: &str = "build";

// ── Request ───────────────────────────────────────────────────────────────────

/// A fully-validated scaffold request.
///
/// Invariants, enforced on construction:
/// - `extension_type`, `renderer_name` and `template_id` are non-blank
/// - `extension_type` is a lowercase slug (`[a-z0-9][a-z0-9_-]*`)
/// - `root_dir` is non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    extension_type: String,
    renderer_name: String,
    template_id: String,
    root_dir: PathBuf,
    build_dir: String,
    uuid: Option<Uuid>,
}

impl ScaffoldRequest {
    /// Start building a new request.
    pub fn builder() -> ScaffoldRequestBuilder {
        ScaffoldRequestBuilder::default()
    }

    pub fn extension_type(&self) -> &str {
        &self.extension_type
    }
    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }
    pub fn template_id(&self) -> &str {
        &self.template_id
    }
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
    pub fn build_dir(&self) -> &str {
        &self.build_dir
    }
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }
}

impl fmt::Display for ScaffoldRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {}) at {}",
            self.extension_type,
            self.renderer_name,
            self.template_id,
            self.root_dir.display()
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ScaffoldRequest`].
///
/// Setters accept anything string-like; an unset or blank required field is
/// reported by [`ScaffoldRequestBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct ScaffoldRequestBuilder {
    extension_type: Option<String>,
    renderer_name: Option<String>,
    template_id: Option<String>,
    root_dir: Option<PathBuf>,
    build_dir: Option<String>,
    uuid: Option<Uuid>,
}

impl ScaffoldRequestBuilder {
    pub fn extension_type(mut self, value: impl Into<String>) -> Self {
        self.extension_type = Some(value.into());
        self
    }

    pub fn renderer_name(mut self, value: impl Into<String>) -> Self {
        self.renderer_name = Some(value.into());
        self
    }

    pub fn template_id(mut self, value: impl Into<String>) -> Self {
        self.template_id = Some(value.into());
        self
    }

    pub fn root_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(value.into());
        self
    }

    /// Override the build directory (defaults to [`DEFAULT_BUILD_DIR`]).
    pub fn build_dir(mut self, value: impl Into<String>) -> Self {
        self.build_dir = Some(value.into());
        self
    }

    /// Pin the extension UUID instead of generating a fresh one.
    pub fn uuid(mut self, value: Uuid) -> Self {
        self.uuid = Some(value);
        self
    }

    /// Set a field only when a value is present.
    ///
    /// Convenient when layering CLI flags over configuration defaults.
    pub fn maybe_renderer_name(self, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.renderer_name(v),
            None => self,
        }
    }

    pub fn maybe_template_id(self, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.template_id(v),
            None => self,
        }
    }

    pub fn maybe_build_dir(self, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.build_dir(v),
            None => self,
        }
    }

    pub fn maybe_uuid(self, value: Option<Uuid>) -> Self {
        match value {
            Some(v) => self.uuid(v),
            None => self,
        }
    }

    /// Validate and build the request.
    ///
    /// Fields are checked in contract order: type, renderer, template_id, root_dir.
    pub fn build(self) -> Result<ScaffoldRequest, DomainError> {
        let extension_type = required("type", self.extension_type)?;
        validate_type_slug(&extension_type)?;
        let renderer_name = required("renderer", self.renderer_name)?;
        let template_id = required("template_id", self.template_id)?;

        let root_dir = self
            .root_dir
            .ok_or(DomainError::MissingRequiredField { field: "root_dir" })?;
        if root_dir.as_os_str().is_empty() {
            return Err(DomainError::BlankField { field: "root_dir" });
        }

        let build_dir = match self.build_dir {
            Some(dir) if dir.trim().is_empty() => {
                return Err(DomainError::BlankField { field: "build_dir" });
            }
            Some(dir) => dir,
            None => DEFAULT_BUILD_DIR.to_string(),
        };

        Ok(ScaffoldRequest {
            extension_type,
            renderer_name,
            template_id,
            root_dir,
            build_dir,
            uuid: self.uuid,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    let value = value.ok_or(DomainError::MissingRequiredField { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BlankField { field });
    }
    Ok(trimmed.to_string())
}

/// The type doubles as a template-store directory name, so it must not be
/// able to escape `types/`.
fn validate_type_slug(value: &str) -> Result<(), DomainError> {
    let mut chars = value.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let rest_ok =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if first_ok && rest_ok {
        Ok(())
    } else {
        Err(DomainError::InvalidExtensionType {
            value: value.to_string(),
            reason: "expected lowercase letters, digits, '-' or '_'".into(),
        })
    }
}
