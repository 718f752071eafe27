use tracing::{debug, info};

use crate::application::{
    journal::Journal,
    layout::{self, MANIFEST_DIR},
    pipeline::Task,
    ports::EntryKind,
};
use crate::domain::{DomainError, ManifestKind};
use crate::error::ExtkitResult;

use super::ScaffoldContext;

/// Copies the type's manifests into the root, merging into any that already
/// exist.
///
/// Only yml/yaml/json files take part. Merged JSON goes through the
/// formatter registry; merged YAML does not. Every overwritten manifest is
/// snapshotted, and undo restores all of them.
#[derive(Debug, Default)]
pub struct MergeManifests {
    journal: Journal,
}

impl MergeManifests {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Task<ScaffoldContext<'a>> for MergeManifests {
    fn name(&self) -> &'static str {
        "merge-manifests"
    }

    fn run(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        let root = ctx.descriptor.root_dir().to_path_buf();
        let subtree = layout::type_subdir(ctx.descriptor.extension_type(), MANIFEST_DIR);
        let fs = ctx.fs;
        let store = ctx.store;
        let formatters = ctx.formatters;
        let journal = &mut self.journal;

        store.walk(&subtree, &root, true, &mut |entry| {
            if entry.kind == EntryKind::Directory {
                return journal.create_dir_all(fs, &entry.target);
            }
            let Some(kind) = ManifestKind::from_path(&entry.source) else {
                return Ok(());
            };

            let fragment = store.open(&entry.source)?;
            let target = entry.target;

            if !fs.exists(&target) {
                journal.write_file(fs, &target, &fragment)?;
                debug!(path = %target.display(), "Copied manifest");
                return Ok(());
            }

            let original = fs.read_file(&target)?;
            let merged = kind.merge(&original, &fragment)?;
            // YAML is concatenated text and is written as-is.
            let merged = match kind {
                ManifestKind::Yaml => merged,
                ManifestKind::Json => {
                    let text = String::from_utf8(merged).map_err(|e| {
                        DomainError::MalformedManifest {
                            format: kind.as_str(),
                            reason: e.to_string(),
                        }
                    })?;
                    formatters.format(&target, text)?.into_bytes()
                }
            };
            journal.replace_file(fs, &target, original, &merged)?;
            info!(path = %target.display(), format = kind.as_str(), "Merged manifest");
            Ok(())
        })
    }

    fn undo(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        self.journal.rollback(ctx.fs)
    }
}
