//! Shared helpers for adapter integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use extkit_adapters::{LiquidRenderer, LocalFilesystem, default_registry};
use extkit_core::{
    application::{ApplicationError, ScaffoldService, ports::Filesystem, ports::TemplateStore},
    domain::ScaffoldRequest,
    error::ExtkitResult,
};
use walkdir::WalkDir;

// ── Fault injection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    CreateDir,
    Read,
    Write,
    RemoveFile,
    RemoveDir,
}

type Rule = dyn Fn(Op, &Path) -> bool + Send + Sync;

/// Real filesystem that fails any operation matching a rule, and counts
/// every mutating or reading call it sees.
#[derive(Clone)]
pub struct FaultInjectingFilesystem {
    inner: LocalFilesystem,
    rule: Arc<Rule>,
    calls: Arc<AtomicUsize>,
}

impl FaultInjectingFilesystem {
    pub fn new(rule: impl Fn(Op, &Path) -> bool + Send + Sync + 'static) -> Self {
        Self {
            inner: LocalFilesystem::new(),
            rule: Arc::new(rule),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn passthrough() -> Self {
        Self::new(|_, _| false)
    }

    /// Fail the first `op` on exactly `path`; later calls go through, so
    /// rollback can still touch the same path.
    pub fn failing(op: Op, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let fired = AtomicBool::new(false);
        Self::new(move |o, p| o == op && p == path.as_path() && !fired.swap(true, Ordering::SeqCst))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, op: Op, path: &Path) -> ExtkitResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if (self.rule)(op, path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("injected {op:?} failure"),
            }
            .into());
        }
        Ok(())
    }
}

impl Filesystem for FaultInjectingFilesystem {
    fn create_dir(&self, path: &Path) -> ExtkitResult<()> {
        self.check(Op::CreateDir, path)?;
        self.inner.create_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(path)
    }

    fn read_file(&self, path: &Path) -> ExtkitResult<Vec<u8>> {
        self.check(Op::Read, path)?;
        self.inner.read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> ExtkitResult<()> {
        self.check(Op::Write, path)?;
        self.inner.write_file(path, content)
    }

    fn remove_file(&self, path: &Path) -> ExtkitResult<()> {
        self.check(Op::RemoveFile, path)?;
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> ExtkitResult<()> {
        self.check(Op::RemoveDir, path)?;
        self.inner.remove_dir_all(path)
    }
}

// ── Tree snapshots ────────────────────────────────────────────────────────────

/// Every path below `root` (relative), with file bytes. Directories carry
/// `None`.
pub type Tree = Vec<(PathBuf, Option<Vec<u8>>)>;

pub fn snapshot(root: &Path) -> Tree {
    WalkDir::new(root)
        .sort_by_file_name()
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = entry
                .file_type()
                .is_file()
                .then(|| fs::read(entry.path()).unwrap());
            (rel, content)
        })
        .collect()
}

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ── Service wiring ────────────────────────────────────────────────────────────

pub fn service(
    store: impl TemplateStore + 'static,
    fs: impl Filesystem + 'static,
) -> ScaffoldService {
    ScaffoldService::new(Box::new(store), Box::new(LiquidRenderer), Box::new(fs))
        .with_formatters(default_registry())
}

pub fn request(extension_type: &str, template_id: &str, root: &Path) -> ScaffoldRequest {
    ScaffoldRequest::builder()
        .extension_type(extension_type)
        .renderer_name("react")
        .template_id(template_id)
        .root_dir(root)
        .build()
        .unwrap()
}
