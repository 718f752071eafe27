//! Content formatters, one per file type.
//!
//! Formatters normalize generated text before it is written and reject text
//! that does not parse as its file type.

mod json;
mod yaml;

use std::sync::Arc;

use extkit_core::application::FormatterRegistry;

pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

/// Registry with the JSON and YAML formatters installed.
pub fn default_registry() -> FormatterRegistry {
    FormatterRegistry::new()
        .register(["json"], Arc::new(JsonFormatter))
        .register(["yml", "yaml"], Arc::new(YamlFormatter))
}
