//! Application layer for extkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Pipeline**: Ordered tasks with all-or-nothing rollback
//! - **Tasks**: The four scaffolding steps and their change journals
//! - **Errors**: Application-specific error types
//!
//! Merge rules and request validation live in `crate::domain`.

pub mod error;
pub mod formatting;
pub mod journal;
pub mod layout;
pub mod pipeline;
pub mod ports;
pub mod services;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main services
pub use services::{
    ExtensionTypeInfo, PlannedAction, PlannedFile, ScaffoldPlan, ScaffoldService, TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ContentFormatter, EntryKind, Filesystem, TemplateRenderer, TemplateStore, WalkEntry,
};

pub use error::ApplicationError;
pub use formatting::FormatterRegistry;
pub use pipeline::{Pipeline, Task, TaskState};
