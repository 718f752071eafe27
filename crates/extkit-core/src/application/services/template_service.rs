//! Template Service - read-only queries over the template store.
//!
//! Separated from ScaffoldService for single responsibility.

use std::path::Path;

use serde::Serialize;

use crate::{
    application::{
        layout::{self, MAIN_DIR, MANIFEST_DIR, SHARED_DIR, SOURCE_DIR, TEMPLATE_SUFFIX, TYPES_DIR},
        ports::TemplateStore,
    },
    domain::{DomainError, ManifestKind},
    error::ExtkitResult,
};

/// Information about an extension type for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionTypeInfo {
    pub name: String,
    /// Main bodies the type ships (`react`, `javascript`).
    pub main_bodies: Vec<String>,
    /// Manifest file names that will be copied or merged.
    pub manifests: Vec<String>,
    /// Number of additional source files.
    pub source_files: usize,
}

/// Service for template store queries.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Names of all extension types, sorted.
    pub fn type_names(&self) -> Vec<String> {
        self.store.subdirectories(Path::new(TYPES_DIR))
    }

    /// Describe every extension type.
    pub fn list(&self) -> Vec<ExtensionTypeInfo> {
        self.type_names()
            .into_iter()
            .map(|name| self.describe(name))
            .collect()
    }

    /// Describe one extension type.
    pub fn get(&self, name: &str) -> ExtkitResult<ExtensionTypeInfo> {
        if !self.store.contains(&layout::type_dir(name)) {
            return Err(DomainError::UnknownExtensionType {
                value: name.to_string(),
                available: self.type_names(),
            }
            .into());
        }
        Ok(self.describe(name.to_string()))
    }

    /// Shared template names with the marker stripped.
    pub fn shared_templates(&self) -> Vec<String> {
        file_names(&self.store.files_under(Path::new(SHARED_DIR)))
            .into_iter()
            .filter_map(|n| layout::strip_template_suffix(&n).map(str::to_string))
            .collect()
    }

    fn describe(&self, name: String) -> ExtensionTypeInfo {
        let mut main_bodies: Vec<String> =
            file_names(&self.store.files_under(&layout::type_subdir(&name, MAIN_DIR)))
                .into_iter()
                .filter_map(|n| {
                    let n = n.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&n);
                    n.split('.').next().map(str::to_string)
                })
                .collect();
        main_bodies.dedup();

        let manifests = self
            .store
            .files_under(&layout::type_subdir(&name, MANIFEST_DIR))
            .into_iter()
            .filter(|p| ManifestKind::from_path(p).is_some())
            .collect::<Vec<_>>();

        ExtensionTypeInfo {
            main_bodies,
            manifests: file_names(&manifests),
            source_files: self
                .store
                .files_under(&layout::type_subdir(&name, SOURCE_DIR))
                .len(),
            name,
        }
    }
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}
