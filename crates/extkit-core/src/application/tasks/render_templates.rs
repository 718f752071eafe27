use std::path::Path;

use tracing::debug;

use crate::application::{
    journal::Journal,
    layout::{self, SHARED_DIR},
    pipeline::Task,
    ports::EntryKind,
};
use crate::error::ExtkitResult;

use super::{ScaffoldContext, render_template};

/// Renders every `.tpl` file of the shared subtree into the root, marker
/// stripped and formatted by extension. Files without the marker are ignored.
#[derive(Debug, Default)]
pub struct RenderGenericTemplates {
    journal: Journal,
}

impl RenderGenericTemplates {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Task<ScaffoldContext<'a>> for RenderGenericTemplates {
    fn name(&self) -> &'static str {
        "render-generic-templates"
    }

    fn run(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        let root = ctx.descriptor.root_dir().to_path_buf();
        let shared: &ScaffoldContext<'a> = ctx;
        let journal = &mut self.journal;

        shared
            .store
            .walk(Path::new(SHARED_DIR), &root, false, &mut |entry| {
                match entry.kind {
                    EntryKind::Directory => journal.create_dir_all(shared.fs, &entry.target),
                    EntryKind::File => {
                        let Some(stripped) = entry
                            .target
                            .file_name()
                            .and_then(|n| n.to_str())
                            .and_then(layout::strip_template_suffix)
                        else {
                            return Ok(());
                        };
                        let target = entry.target.with_file_name(stripped);

                        let rendered = render_template(shared, &entry.source)?;
                        let formatted = shared.formatters.format(&target, rendered)?;
                        journal.write_file(shared.fs, &target, formatted.as_bytes())?;
                        debug!(template = %entry.source.display(), "Rendered generic template");
                        Ok(())
                    }
                }
            })
    }

    fn undo(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        self.journal.rollback(ctx.fs)
    }
}
