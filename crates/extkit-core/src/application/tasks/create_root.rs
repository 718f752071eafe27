use crate::application::{journal::Journal, pipeline::Task};
use crate::error::ExtkitResult;

use super::ScaffoldContext;

/// Creates the root directory and any missing parents.
///
/// Undo removes only directories this task created, so a pre-existing root
/// survives rollback untouched.
#[derive(Debug, Default)]
pub struct CreateRoot {
    journal: Journal,
}

impl CreateRoot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Task<ScaffoldContext<'a>> for CreateRoot {
    fn name(&self) -> &'static str {
        "create-root"
    }

    fn run(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        let root = ctx.descriptor.root_dir().to_path_buf();
        self.journal.create_dir_all(ctx.fs, &root)
    }

    fn undo(&mut self, ctx: &mut ScaffoldContext<'a>) -> ExtkitResult<()> {
        self.journal.rollback(ctx.fs)
    }
}
