//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `extkit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::ProjectDescriptor;
use crate::error::ExtkitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `extkit_adapters::filesystem::LocalFilesystem` (production)
/// - `extkit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Only single-level primitives live here; the journal composes them into
/// recursive creation so that every directory it makes is recorded.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create one directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> ExtkitResult<()>;

    /// Check if a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> ExtkitResult<Vec<u8>>;

    /// Create or truncate a file and write `content`.
    fn write_file(&self, path: &Path, content: &[u8]) -> ExtkitResult<()>;

    /// Remove a file. Removing a missing file succeeds.
    fn remove_file(&self, path: &Path) -> ExtkitResult<()>;

    /// Remove a directory and all contents. Removing a missing directory
    /// succeeds.
    fn remove_dir_all(&self, path: &Path) -> ExtkitResult<()>;
}

// ── Template store ────────────────────────────────────────────────────────────

/// What a [`WalkEntry`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One item visited by [`TemplateStore::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub kind: EntryKind,
    /// Store-relative path of the template.
    pub source: PathBuf,
    /// Where the item lands: `target_root` joined with the path relative to
    /// the walked subtree.
    pub target: PathBuf,
}

/// Port for the read-only template tree.
///
/// Implemented by:
/// - `extkit_adapters::template_store::InMemoryStore` (built-in and loaded templates)
///
/// Implementors supply the raw listing; walking and the derived queries are
/// provided on top of it.
pub trait TemplateStore: Send + Sync {
    /// Read a template's bytes.
    ///
    /// # Errors
    ///
    /// `ApplicationError::TemplateNotFound` when no file exists at `path`.
    fn open(&self, path: &Path) -> ExtkitResult<Vec<u8>>;

    /// Every file strictly below `subtree`, store-relative, sorted.
    fn files_under(&self, subtree: &Path) -> Vec<PathBuf>;

    /// Every directory strictly below `subtree`, store-relative, sorted.
    fn dirs_under(&self, subtree: &Path) -> Vec<PathBuf>;

    /// Whether a file or directory exists at `path`.
    fn contains(&self, path: &Path) -> bool;

    /// Names of the immediate child directories of `dir`, sorted.
    fn subdirectories(&self, dir: &Path) -> Vec<String> {
        self.dirs_under(dir)
            .into_iter()
            .filter_map(|p| {
                let rest = p.strip_prefix(dir).ok()?;
                let mut components = rest.components();
                let first = components.next()?;
                components
                    .next()
                    .is_none()
                    .then(|| first.as_os_str().to_string_lossy().into_owned())
            })
            .collect()
    }

    /// Visit every directory, then every file, under `subtree`.
    ///
    /// Each entry's target is computed under `target_root`. With
    /// `skip_empty_dirs`, directories that contain no file at any depth are
    /// not visited. A missing subtree visits nothing. The first error
    /// returned by `visit` stops the walk and is propagated.
    fn walk(
        &self,
        subtree: &Path,
        target_root: &Path,
        skip_empty_dirs: bool,
        visit: &mut dyn FnMut(WalkEntry) -> ExtkitResult<()>,
    ) -> ExtkitResult<()> {
        let files = self.files_under(subtree);
        let target_of = |source: &Path| -> PathBuf {
            match source.strip_prefix(subtree) {
                Ok(rel) => target_root.join(rel),
                Err(_) => target_root.join(source),
            }
        };

        for dir in self.dirs_under(subtree) {
            if skip_empty_dirs && !files.iter().any(|f| f.starts_with(&dir)) {
                continue;
            }
            let target = target_of(&dir);
            visit(WalkEntry {
                kind: EntryKind::Directory,
                source: dir,
                target,
            })?;
        }

        for file in files {
            let target = target_of(&file);
            visit(WalkEntry {
                kind: EntryKind::File,
                source: file,
                target,
            })?;
        }

        Ok(())
    }
}

// ── Rendering & formatting ────────────────────────────────────────────────────

/// Port for template rendering.
///
/// Implemented by:
/// - `extkit_adapters::renderer::LiquidRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render `source` with the descriptor as binding context.
    ///
    /// `name` identifies the template in error messages.
    fn render(
        &self,
        name: &str,
        source: &str,
        descriptor: &ProjectDescriptor,
    ) -> ExtkitResult<String>;
}

/// Port for a content formatter bound to one file type.
///
/// Implemented by:
/// - `extkit_adapters::formatter::JsonFormatter`
/// - `extkit_adapters::formatter::YamlFormatter`
#[cfg_attr(test, mockall::automock)]
pub trait ContentFormatter: Send + Sync {
    /// Normalize `content` destined for `path`, or reject it with
    /// `ApplicationError::FormattingFailed`.
    fn format(&self, path: &Path, content: &str) -> ExtkitResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeStore;

    fn store() -> FakeStore {
        FakeStore::default()
            .with_file("types/a/src/util/helpers.js", "h")
            .with_file("types/a/src/z.js", "z")
            .with_dir("types/a/src/assets/empty")
            .with_dir("types/b")
    }

    fn collect(store: &FakeStore, subtree: &str, skip_empty: bool) -> Vec<(EntryKind, PathBuf)> {
        let mut seen = Vec::new();
        store
            .walk(Path::new(subtree), Path::new("/out"), skip_empty, &mut |e| {
                seen.push((e.kind, e.target));
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn walk_maps_targets_directories_first() {
        let seen = collect(&store(), "types/a/src", false);
        assert_eq!(
            seen,
            vec![
                (EntryKind::Directory, PathBuf::from("/out/assets")),
                (EntryKind::Directory, PathBuf::from("/out/assets/empty")),
                (EntryKind::Directory, PathBuf::from("/out/util")),
                (EntryKind::File, PathBuf::from("/out/util/helpers.js")),
                (EntryKind::File, PathBuf::from("/out/z.js")),
            ]
        );
    }

    #[test]
    fn walk_can_skip_directories_without_files() {
        let seen = collect(&store(), "types/a/src", true);
        assert_eq!(
            seen,
            vec![
                (EntryKind::Directory, PathBuf::from("/out/util")),
                (EntryKind::File, PathBuf::from("/out/util/helpers.js")),
                (EntryKind::File, PathBuf::from("/out/z.js")),
            ]
        );
    }

    #[test]
    fn walking_missing_subtree_visits_nothing() {
        assert!(collect(&store(), "types/missing", false).is_empty());
    }

    #[test]
    fn visit_error_stops_walk() {
        let mut calls = 0;
        let result = store().walk(
            Path::new("types/a/src"),
            Path::new("/out"),
            true,
            &mut |e| {
                calls += 1;
                Err(crate::application::ApplicationError::TemplateNotFound { path: e.source }
                    .into())
            },
        );
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn subdirectories_lists_immediate_children() {
        assert_eq!(store().subdirectories(Path::new("types")), vec!["a", "b"]);
    }
}
