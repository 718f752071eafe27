//! Change journal: records every filesystem mutation a task makes so the
//! task can compensate exactly those mutations.
//!
//! Entries are recorded *before* the mutation is attempted. An interrupted
//! write is therefore still compensated: removing a file that never appeared
//! is a no-op, and restoring a snapshot over an untouched file rewrites the
//! same bytes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::error::{ExtkitError, ExtkitResult};

/// Original bytes of a file captured before it was rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub original: Vec<u8>,
}

/// One recorded mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    CreatedDir(PathBuf),
    CreatedFile(PathBuf),
    Replaced(Snapshot),
}

impl Change {
    pub fn path(&self) -> &Path {
        match self {
            Self::CreatedDir(p) | Self::CreatedFile(p) => p,
            Self::Replaced(s) => &s.path,
        }
    }
}

/// Ordered record of the mutations one task performed.
#[derive(Debug, Default)]
pub struct Journal {
    changes: Vec<Change>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Create `path` and any missing ancestors, recording each directory
    /// actually created. Existing directories are left alone and not recorded.
    pub fn create_dir_all(&mut self, fs: &dyn Filesystem, path: &Path) -> ExtkitResult<()> {
        let mut missing = Vec::new();
        let mut current = Some(path);
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() || fs.exists(dir) {
                break;
            }
            missing.push(dir.to_path_buf());
            current = dir.parent();
        }

        for dir in missing.into_iter().rev() {
            self.changes.push(Change::CreatedDir(dir.clone()));
            fs.create_dir(&dir)?;
            debug!(path = %dir.display(), "Created directory");
        }
        Ok(())
    }

    /// Write `content` to `path`.
    ///
    /// An existing file is snapshotted first; otherwise missing parents are
    /// created and the file is recorded as new.
    pub fn write_file(
        &mut self,
        fs: &dyn Filesystem,
        path: &Path,
        content: &[u8],
    ) -> ExtkitResult<()> {
        if fs.exists(path) {
            let original = fs.read_file(path)?;
            return self.replace_file(fs, path, original, content);
        }

        if let Some(parent) = path.parent() {
            self.create_dir_all(fs, parent)?;
        }
        self.changes.push(Change::CreatedFile(path.to_path_buf()));
        fs.write_file(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }

    /// Overwrite an existing file whose bytes the caller already read.
    pub fn replace_file(
        &mut self,
        fs: &dyn Filesystem,
        path: &Path,
        original: Vec<u8>,
        content: &[u8],
    ) -> ExtkitResult<()> {
        self.changes.push(Change::Replaced(Snapshot {
            path: path.to_path_buf(),
            original,
        }));
        fs.write_file(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "Replaced file");
        Ok(())
    }

    /// Undo every recorded change, newest first, and clear the journal.
    ///
    /// Keeps going past failures. The first failure is returned; the rest
    /// are logged.
    pub fn rollback(&mut self, fs: &dyn Filesystem) -> ExtkitResult<()> {
        let mut first_error: Option<ExtkitError> = None;

        for change in std::mem::take(&mut self.changes).into_iter().rev() {
            let result = match &change {
                Change::CreatedDir(path) => fs.remove_dir_all(path),
                Change::CreatedFile(path) => fs.remove_file(path),
                Change::Replaced(snapshot) => fs.write_file(&snapshot.path, &snapshot.original),
            };

            if let Err(e) = result {
                let err = ExtkitError::from(ApplicationError::RollbackFailed {
                    path: change.path().to_path_buf(),
                    reason: e.to_string(),
                });
                warn!(error = %err, "Could not undo change");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::Sequence;

    fn fs_error(path: &Path) -> ExtkitError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "denied".into(),
        }
        .into()
    }

    #[test]
    fn create_dir_all_records_only_missing_ancestors() {
        let mut fs = MockFilesystem::new();
        let mut seq = Sequence::new();
        fs.expect_exists().returning(|p| p == Path::new("/a"));
        fs.expect_create_dir()
            .withf(|p| p == Path::new("/a/b"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_create_dir()
            .withf(|p| p == Path::new("/a/b/c"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut journal = Journal::new();
        journal.create_dir_all(&fs, Path::new("/a/b/c")).unwrap();

        assert_eq!(
            journal.changes(),
            &[
                Change::CreatedDir("/a/b".into()),
                Change::CreatedDir("/a/b/c".into()),
            ]
        );
    }

    #[test]
    fn existing_directory_is_not_recorded() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir().never();

        let mut journal = Journal::new();
        journal.create_dir_all(&fs, Path::new("/root")).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn overwrite_snapshots_original_bytes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_file().returning(|_| Ok(b"old".to_vec()));
        fs.expect_write_file()
            .withf(|_, content| content == b"new")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut journal = Journal::new();
        journal
            .write_file(&fs, Path::new("/r/package.json"), b"new")
            .unwrap();

        assert_eq!(
            journal.changes(),
            &[Change::Replaced(Snapshot {
                path: "/r/package.json".into(),
                original: b"old".to_vec(),
            })]
        );
    }

    #[test]
    fn failed_write_is_still_recorded() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/r"));
        fs.expect_write_file()
            .returning(|p, _| Err(fs_error(p)));

        let mut journal = Journal::new();
        assert!(journal.write_file(&fs, Path::new("/r/a.txt"), b"x").is_err());
        assert_eq!(journal.changes(), &[Change::CreatedFile("/r/a.txt".into())]);
    }

    #[test]
    fn rollback_undoes_newest_first() {
        let mut fs = MockFilesystem::new();
        let mut seq = Sequence::new();
        fs.expect_remove_file()
            .withf(|p| p == Path::new("/r/new/f"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| p == Path::new("/r/m.yml") && content == b"orig")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/r/new"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut journal = Journal {
            changes: vec![
                Change::CreatedDir("/r/new".into()),
                Change::Replaced(Snapshot {
                    path: "/r/m.yml".into(),
                    original: b"orig".to_vec(),
                }),
                Change::CreatedFile("/r/new/f".into()),
            ],
        };

        journal.rollback(&fs).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn rollback_continues_past_failures_and_reports_first() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_file().returning(|p| Err(fs_error(p)));
        fs.expect_remove_dir_all().times(1).returning(|_| Ok(()));

        let mut journal = Journal {
            changes: vec![
                Change::CreatedDir("/r".into()),
                Change::CreatedFile("/r/a".into()),
                Change::CreatedFile("/r/b".into()),
            ],
        };

        let err = journal.rollback(&fs).unwrap_err();
        match err {
            ExtkitError::Application(ApplicationError::RollbackFailed { path, .. }) => {
                assert_eq!(path, PathBuf::from("/r/b"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn second_rollback_is_a_no_op() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        let mut journal = Journal {
            changes: vec![Change::CreatedFile("/r/a".into())],
        };
        journal.rollback(&fs).unwrap();
        journal.rollback(&fs).unwrap();
    }
}
