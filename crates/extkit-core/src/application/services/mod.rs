//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold an extension" or "list types".

pub mod scaffold_service;
pub mod template_service;

pub use scaffold_service::{PlannedAction, PlannedFile, ScaffoldPlan, ScaffoldService};
pub use template_service::{ExtensionTypeInfo, TemplateService};
