//! Built-in templates and template-store resolution.
//!
//! The collection under `crates/extkit-adapters/templates/` is embedded into
//! the binary at compile time and materialized into an [`InMemoryStore`] the
//! first time it is needed. Every later call shares that one tree.
//!
//! # Store resolution order
//!
//! 1. An explicit directory (the CLI's `--templates-dir` or
//!    `templates.local_path` from the config file).
//! 2. **`$EXTKIT_TEMPLATES_DIR`**: environment variable override.
//! 3. The embedded built-in collection.
//!
//! A directory that is named but missing is an error rather than a silent
//! fallback to the built-ins.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use include_dir::{Dir, DirEntry, include_dir};
use tracing::{debug, info, instrument};

use extkit_core::error::ExtkitResult;

use crate::{template_loader::FilesystemTemplateLoader, template_store::InMemoryStore};

/// Environment variable naming a template directory.
pub const TEMPLATES_DIR_ENV: &str = "EXTKIT_TEMPLATES_DIR";

static BUILTIN_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

static BUILTIN_STORE: LazyLock<InMemoryStore> = LazyLock::new(|| {
    let store = collect(&BUILTIN_DIR, InMemoryStore::builder()).build();
    debug!(files = store.len(), "materialized built-in templates");
    store
});

fn collect(
    dir: &Dir<'_>,
    mut builder: crate::template_store::InMemoryStoreBuilder,
) -> crate::template_store::InMemoryStoreBuilder {
    for entry in dir.entries() {
        builder = match entry {
            DirEntry::Dir(sub) => collect(sub, builder.dir(sub.path())),
            DirEntry::File(file) => builder.file(file.path(), file.contents()),
        };
    }
    builder
}

/// The embedded template collection.
pub fn builtin_store() -> InMemoryStore {
    BUILTIN_STORE.clone()
}

/// Where a resolved store came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    Directory(PathBuf),
    Environment(PathBuf),
    Embedded,
}

impl fmt::Display for StoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(p) => write!(f, "{}", p.display()),
            Self::Environment(p) => write!(f, "{} (from ${})", p.display(), TEMPLATES_DIR_ENV),
            Self::Embedded => f.write_str("built-in templates"),
        }
    }
}

/// A loaded store and its origin.
#[derive(Debug, Clone)]
pub struct ResolvedStore {
    pub store: InMemoryStore,
    pub source: StoreSource,
}

/// Pick the template store for this process.
#[instrument]
pub fn resolve_store(explicit: Option<&Path>) -> ExtkitResult<ResolvedStore> {
    resolve_with(explicit, std::env::var(TEMPLATES_DIR_ENV).ok())
}

fn resolve_with(explicit: Option<&Path>, env_dir: Option<String>) -> ExtkitResult<ResolvedStore> {
    if let Some(dir) = explicit {
        let store = FilesystemTemplateLoader::new(dir).load()?;
        info!(path = %dir.display(), "using template directory");
        return Ok(ResolvedStore {
            store,
            source: StoreSource::Directory(dir.to_path_buf()),
        });
    }

    if let Some(dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        let dir = PathBuf::from(dir);
        let store = FilesystemTemplateLoader::new(&dir).load()?;
        info!(path = %dir.display(), "using template directory from ${}", TEMPLATES_DIR_ENV);
        return Ok(ResolvedStore {
            store,
            source: StoreSource::Environment(dir),
        });
    }

    debug!("using built-in templates");
    Ok(ResolvedStore {
        store: builtin_store(),
        source: StoreSource::Embedded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use extkit_core::application::ports::TemplateStore;

    #[test]
    fn builtin_collection_has_both_types() {
        let store = builtin_store();
        assert_eq!(
            store.subdirectories(Path::new("types")),
            vec!["checkout-ui", "product-subscription"]
        );
        assert!(store.contains(Path::new("shared/README.md.tpl")));
        assert!(store.contains(Path::new("shared/.extkit.yml.tpl")));
        assert!(store.contains(Path::new("types/checkout-ui/manifest/package.json")));
    }

    #[test]
    fn builtin_store_is_shared() {
        assert_eq!(builtin_store().len(), builtin_store().len());
        assert!(!builtin_store().is_empty());
    }

    #[test]
    fn explicit_directory_wins_over_environment() {
        let explicit = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(explicit.path().join("types/mine")).unwrap();

        let resolved = resolve_with(
            Some(explicit.path()),
            Some("/definitely/not/here".to_string()),
        )
        .unwrap();

        assert_eq!(
            resolved.source,
            StoreSource::Directory(explicit.path().to_path_buf())
        );
        assert_eq!(
            resolved.store.subdirectories(Path::new("types")),
            vec!["mine"]
        );
    }

    #[test]
    fn environment_directory_is_used_when_set() {
        let env_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(env_dir.path().join("types/env-type")).unwrap();

        let resolved =
            resolve_with(None, Some(env_dir.path().display().to_string())).unwrap();

        assert!(matches!(resolved.source, StoreSource::Environment(_)));
    }

    #[test]
    fn missing_named_directory_is_an_error() {
        assert!(resolve_with(None, Some("/definitely/not/here".to_string())).is_err());
    }

    #[test]
    fn falls_back_to_embedded() {
        let resolved = resolve_with(None, None).unwrap();
        assert_eq!(resolved.source, StoreSource::Embedded);

        let resolved = resolve_with(None, Some("  ".to_string())).unwrap();
        assert_eq!(resolved.source, StoreSource::Embedded);
    }
}
