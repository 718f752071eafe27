//! The four scaffolding tasks and the context they share.
//!
//! Each task owns a [`Journal`](crate::application::journal::Journal) of what
//! it changed, so its `undo` compensates exactly its own effects.

mod create_root;
mod emit_sources;
mod merge_manifests;
mod render_templates;

pub use create_root::CreateRoot;
pub use emit_sources::EmitSourceFiles;
pub use merge_manifests::MergeManifests;
pub use render_templates::RenderGenericTemplates;

use std::path::Path;

use crate::application::{
    ApplicationError, FormatterRegistry,
    ports::{Filesystem, TemplateRenderer, TemplateStore},
};
use crate::domain::ProjectDescriptor;
use crate::error::ExtkitResult;

/// Everything a scaffolding task reads or mutates during one run.
pub struct ScaffoldContext<'a> {
    pub descriptor: ProjectDescriptor,
    pub fs: &'a dyn Filesystem,
    pub store: &'a dyn TemplateStore,
    pub renderer: &'a dyn TemplateRenderer,
    pub formatters: &'a FormatterRegistry,
}

/// Read a template from the store and render it against the descriptor.
fn render_template(ctx: &ScaffoldContext<'_>, path: &Path) -> ExtkitResult<String> {
    let bytes = ctx.store.open(path)?;
    let name = path.display().to_string();
    let source = String::from_utf8(bytes).map_err(|e| ApplicationError::RenderingFailed {
        template: name.clone(),
        reason: e.to_string(),
    })?;
    ctx.renderer.render(&name, &source, &ctx.descriptor)
}
