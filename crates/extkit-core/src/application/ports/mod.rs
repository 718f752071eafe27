//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `extkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Read-only template tree
//!   - `TemplateRenderer`: Template rendering
//!   - `ContentFormatter`: Per-file-type normalization
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI calls the services directly)

pub mod output;

pub use output::{
    ContentFormatter, EntryKind, Filesystem, TemplateRenderer, TemplateStore, WalkEntry,
};

#[cfg(test)]
pub use output::{MockContentFormatter, MockFilesystem};
