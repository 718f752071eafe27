//! Filesystem-based template loader.
//!
//! Reads a template directory laid out like the built-in collection into an
//! [`InMemoryStore`]:
//!
//! ```text
//! <templates_dir>/
//! ├── shared/
//! │   ├── README.md.tpl
//! │   └── .extkit.yml.tpl
//! └── types/
//!     └── checkout-ui/
//!         ├── main/          react.js[.tpl], javascript.js[.tpl]
//!         ├── src/
//!         └── manifest/      package.json, extension.config.yml
//! ```
//!
//! The whole tree is read eagerly, once. Later edits to the directory are not
//! observed by a store that has already been loaded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use extkit_core::error::{ExtkitError, ExtkitResult};

use crate::template_store::InMemoryStore;

/// Loads an on-disk template directory into memory.
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Read every file and directory below the templates directory.
    ///
    /// Symlinks are followed. Paths in the store are relative to the
    /// templates directory.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load(&self) -> ExtkitResult<InMemoryStore> {
        if !self.templates_dir.is_dir() {
            return Err(config_error(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let mut builder = InMemoryStore::builder();
        let mut files = 0usize;

        for entry in WalkDir::new(&self.templates_dir)
            .follow_links(true)
            .sort_by_file_name()
            .min_depth(1)
        {
            let entry = entry.map_err(|e| {
                config_error(format!(
                    "failed to read templates directory '{}': {e}",
                    self.templates_dir.display()
                ))
            })?;

            let relative = entry
                .path()
                .strip_prefix(&self.templates_dir)
                .map_err(|e| config_error(e.to_string()))?
                .to_path_buf();

            if entry.file_type().is_dir() {
                builder = builder.dir(&relative);
            } else {
                let content = fs::read(entry.path()).map_err(|e| {
                    config_error(format!(
                        "failed to read template '{}': {e}",
                        entry.path().display()
                    ))
                })?;
                debug!(path = %relative.display(), bytes = content.len(), "loaded template file");
                builder = builder.file(relative, content);
                files += 1;
            }
        }

        info!(files, "templates loaded");
        Ok(builder.build())
    }
}

fn config_error(message: String) -> ExtkitError {
    ExtkitError::Configuration { message }
}
