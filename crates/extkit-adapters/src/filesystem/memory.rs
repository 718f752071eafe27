//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use extkit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ExtkitResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree. Mirrors `std::fs` semantics where the
/// scaffolder depends on them: `create_dir` needs an existing parent and
/// `write_file` needs an existing parent directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem where `path` and its ancestors already exist.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.as_ref().components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        self
    }

    /// Seed a file, creating its ancestors.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref();
        let this = match path.parent() {
            Some(parent) => self.with_dir(parent),
            None => self,
        };
        if let Ok(mut inner) = this.inner.write() {
            inner.files.insert(path.to_path_buf(), content.into());
        }
        this
    }

    /// A file's content (testing helper).
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.inner.read().ok()?.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Sorted (path, bytes) pairs for every file plus every directory path,
    /// for before/after comparisons.
    pub fn snapshot(&self) -> (Vec<(PathBuf, Vec<u8>)>, Vec<PathBuf>) {
        self.inner
            .read()
            .map(|inner| {
                (
                    inner
                        .files
                        .iter()
                        .map(|(p, c)| (p.clone(), c.clone()))
                        .collect(),
                    inner.directories.iter().cloned().collect(),
                )
            })
            .unwrap_or_default()
    }

    fn read_guard(&self, path: &Path) -> ExtkitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned(path))
    }

    fn write_guard(
        &self,
        path: &Path,
    ) -> ExtkitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned(path))
    }
}

fn poisoned(path: &Path) -> extkit_core::error::ExtkitError {
    fs_error(path, "memory filesystem lock poisoned")
}

fn fs_error(path: &Path, reason: &str) -> extkit_core::error::ExtkitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn parent_exists(inner: &MemoryFilesystemInner, path: &Path) -> bool {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => inner.directories.contains(parent),
        _ => true,
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> ExtkitResult<()> {
        let mut inner = self.write_guard(path)?;
        if inner.directories.contains(path) || inner.files.contains_key(path) {
            return Err(fs_error(path, "already exists"));
        }
        if !parent_exists(&inner, path) {
            return Err(fs_error(path, "parent directory does not exist"));
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_file(&self, path: &Path) -> ExtkitResult<Vec<u8>> {
        self.read_guard(path)?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "no such file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ExtkitResult<()> {
        let mut inner = self.write_guard(path)?;
        if inner.directories.contains(path) {
            return Err(fs_error(path, "is a directory"));
        }
        if !parent_exists(&inner, path) {
            return Err(fs_error(path, "parent directory does not exist"));
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> ExtkitResult<()> {
        self.write_guard(path)?.files.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ExtkitResult<()> {
        let mut inner = self.write_guard(path)?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_needs_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), b"x").is_err());

        let fs = fs.with_dir("/a");
        fs.write_file(Path::new("/a/b.txt"), b"x").unwrap();
        assert_eq!(fs.contents(Path::new("/a/b.txt")).unwrap(), b"x");
    }

    #[test]
    fn remove_dir_all_drops_descendants() {
        let fs = MemoryFilesystem::new()
            .with_file("/r/a/x", "1")
            .with_file("/r/b", "2");

        fs.remove_dir_all(Path::new("/r/a")).unwrap();

        assert_eq!(fs.list_files(), vec![PathBuf::from("/r/b")]);
        assert!(!fs.exists(Path::new("/r/a")));
        assert!(fs.exists(Path::new("/r")));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new().with_dir("/r");
        let other = fs.clone();
        other.write_file(Path::new("/r/f"), b"z").unwrap();
        assert!(fs.exists(Path::new("/r/f")));
    }
}
