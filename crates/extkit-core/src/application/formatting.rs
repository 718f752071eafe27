//! Formatter registry keyed by file extension.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::ContentFormatter;
use crate::error::ExtkitResult;

/// Maps file extensions to formatters. Unregistered extensions pass through
/// unchanged.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<String, Arc<dyn ContentFormatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `formatter` for each extension (without the leading dot).
    pub fn register<I, S>(mut self, extensions: I, formatter: Arc<dyn ContentFormatter>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for ext in extensions {
            self.formatters
                .insert(ext.into().to_ascii_lowercase(), Arc::clone(&formatter));
        }
        self
    }

    pub fn has_formatter_for(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    /// Format `content` destined for `path`.
    pub fn format(&self, path: &Path, content: String) -> ExtkitResult<String> {
        match self.lookup(path) {
            Some(formatter) => formatter.format(path, &content),
            None => Ok(content),
        }
    }

    fn lookup(&self, path: &Path) -> Option<&Arc<dyn ContentFormatter>> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.formatters.get(&ext)
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("extensions", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}
