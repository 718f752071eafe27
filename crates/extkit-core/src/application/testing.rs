//! Test doubles shared by the application unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::application::{
    ApplicationError,
    ports::{TemplateRenderer, TemplateStore},
};
use crate::domain::ProjectDescriptor;
use crate::error::ExtkitResult;

/// Minimal store over a sorted map; directories are derived from file paths
/// plus any listed explicitly.
#[derive(Debug, Default)]
pub struct FakeStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl FakeStore {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files.insert(path, content.as_bytes().to_vec());
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.add_dirs(Path::new(path));
        self
    }

    fn add_dirs(&mut self, dir: &Path) {
        let mut current = Some(dir);
        while let Some(d) = current {
            if d.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(d.to_path_buf());
            current = d.parent();
        }
    }
}

impl TemplateStore for FakeStore {
    fn open(&self, path: &Path) -> ExtkitResult<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn files_under(&self, subtree: &Path) -> Vec<PathBuf> {
        self.files
            .keys()
            .filter(|p| p.starts_with(subtree) && p.as_path() != subtree)
            .cloned()
            .collect()
    }

    fn dirs_under(&self, subtree: &Path) -> Vec<PathBuf> {
        self.dirs
            .iter()
            .filter(|p| p.starts_with(subtree) && p.as_path() != subtree)
            .cloned()
            .collect()
    }

    fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }
}

/// Renderer that returns the source untouched.
pub struct EchoRenderer;

impl TemplateRenderer for EchoRenderer {
    fn render(&self, _name: &str, source: &str, _: &ProjectDescriptor) -> ExtkitResult<String> {
        Ok(source.to_string())
    }
}
