use std::path::PathBuf;

use tracing::debug;

use crate::application::{
    journal::Journal,
    layout::{self, SOURCE_DIR, TEMPLATE_SUFFIX},
    pipeline::Task,
    ports::EntryKind,
};
use crate::domain::MAIN_ENTRY;
use crate::error::ExtkitResult;

use super::{ScaffoldContext, render_template};

/// Writes the main entry point and the type's other source files into
/// `<root>/src`, and records `entries["main"]`.
#[derive(Debug, Default)]
pub struct EmitSourceFiles {
    journal: Journal,
    /// `Some(previous)` once `entries["main"]` has been set.
    previous_main: Option<Option<String>>,
}

impl EmitSourceFiles {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_main(&mut self, ctx: &mut ScaffoldContext<'_>) -> ExtkitResult<()> {
        let flavor = ctx.descriptor.flavor();
        let body = layout::main_body_path(ctx.descriptor.extension_type(), flavor.main_body());
        let marked = {
            let mut s = body.clone().into_os_string();
            s.push(TEMPLATE_SUFFIX);
            PathBuf::from(s)
        };

        let content = if ctx.store.contains(&marked) {
            render_template(ctx, &marked)?.into_bytes()
        } else {
            ctx.store.open(&body)?
        };

        let entry = format!("{SOURCE_DIR}/{}", flavor.entry_filename());
        let target = ctx.descriptor.root_dir().join(&entry);
        self.journal.write_file(ctx.fs, &target, &content)?;

        self.previous_main = Some(ctx.descriptor.set_entry(MAIN_ENTRY, entry));
        debug!(flavor = %flavor, path = %target.display(), "Emitted main entry");
        Ok(())
    }
}

impl<'a> Task<ScaffoldContext<'a>> for EmitSourceFiles {
    fn name(&self) -> &'static str {
        "emit-source-files"
    }

    fn run(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        let src_dir = ctx.descriptor.root_dir().join(SOURCE_DIR);
        self.journal.create_dir_all(ctx.fs, &src_dir)?;

        self.emit_main(ctx)?;

        let fs = ctx.fs;
        let store = ctx.store;
        let journal = &mut self.journal;
        let subtree = layout::type_subdir(ctx.descriptor.extension_type(), SOURCE_DIR);

        store.walk(&subtree, &src_dir, true, &mut |entry| match entry.kind {
            EntryKind::Directory => journal.create_dir_all(fs, &entry.target),
            EntryKind::File => {
                let bytes = store.open(&entry.source)?;
                journal.write_file(fs, &entry.target, &bytes)
            }
        })
    }

    fn undo(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        if let Some(previous) = self.previous_main.take() {
            ctx.descriptor.restore_entry(MAIN_ENTRY, previous);
        }
        self.journal.rollback(ctx.fs)
    }
}
