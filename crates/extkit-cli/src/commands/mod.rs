//! Subcommand handlers. Each translates arguments into calls on the core
//! services and renders the result; none of them holds scaffolding logic.

use std::path::Path;

use tracing::debug;

use extkit_adapters::{ResolvedStore, resolve_store};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod list;

/// Open the template store: `--templates-dir`, then `templates.local_path`,
/// then `$EXTKIT_TEMPLATES_DIR`, then the built-ins.
pub(crate) fn open_store(flag: Option<&Path>, config: &AppConfig) -> CliResult<ResolvedStore> {
    let explicit = flag.or(config.templates.local_path.as_deref());
    let resolved = resolve_store(explicit)?;
    debug!(source = %resolved.source, "Template store resolved");
    Ok(resolved)
}
