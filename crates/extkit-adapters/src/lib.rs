//! Infrastructure adapters for extkit.
//!
//! This crate implements the ports defined in `extkit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod formatter;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use builtin_templates::{ResolvedStore, StoreSource, builtin_store, resolve_store};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use formatter::{JsonFormatter, YamlFormatter, default_registry};
pub use renderer::LiquidRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::{InMemoryStore, InMemoryStoreBuilder};
