//! Immutable in-memory template store.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use extkit_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::ExtkitResult,
};

/// Read-only template tree held in memory.
///
/// Built once through [`InMemoryStoreBuilder`] and never mutated afterwards.
/// Clones share the same tree, so handing a copy to each service is cheap and
/// needs no locking.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl InMemoryStore {
    /// Start building a store.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.inner.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.files.is_empty()
    }

    /// All file paths, sorted.
    pub fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.inner.files.keys().map(PathBuf::as_path)
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("files", &self.inner.files.len())
            .field("dirs", &self.inner.dirs.len())
            .finish()
    }
}

fn strictly_below(path: &Path, subtree: &Path) -> bool {
    path != subtree && path.starts_with(subtree)
}

impl TemplateStore for InMemoryStore {
    fn open(&self, path: &Path) -> ExtkitResult<Vec<u8>> {
        self.inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn files_under(&self, subtree: &Path) -> Vec<PathBuf> {
        self.inner
            .files
            .range(subtree.to_path_buf()..)
            .map(|(p, _)| p)
            .take_while(|p| p.starts_with(subtree))
            .filter(|p| strictly_below(p, subtree))
            .cloned()
            .collect()
    }

    fn dirs_under(&self, subtree: &Path) -> Vec<PathBuf> {
        self.inner
            .dirs
            .range(subtree.to_path_buf()..)
            .take_while(|p| p.starts_with(subtree))
            .filter(|p| strictly_below(p, subtree))
            .cloned()
            .collect()
    }

    fn contains(&self, path: &Path) -> bool {
        self.inner.files.contains_key(path) || self.inner.dirs.contains(path)
    }
}

/// Collects files and directories for an [`InMemoryStore`].
///
/// Ancestors of every added path are registered as directories, so the store
/// always describes a well-formed tree.
#[derive(Debug, Default)]
pub struct InMemoryStoreBuilder {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl InMemoryStoreBuilder {
    /// Add a file. A later file at the same path replaces the earlier one.
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, content.into());
        self
    }

    /// Add a directory, even one without files.
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    fn add_dir(&mut self, dir: &Path) {
        let mut current = Some(dir);
        while let Some(d) = current {
            if d.as_os_str().is_empty() || !self.dirs.insert(d.to_path_buf()) {
                break;
            }
            current = d.parent();
        }
    }

    pub fn build(self) -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(StoreInner {
                files: self.files,
                dirs: self.dirs,
            }),
        }
    }
}
