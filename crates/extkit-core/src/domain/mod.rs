// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for extkit.
//!
//! This module contains pure logic with no I/O. Filesystem, template store,
//! rendering and formatting concerns are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: `tracing` stays in the application layer
//! - **Validated construction**: a `ScaffoldRequest` cannot exist in an invalid state

pub mod descriptor;
pub mod error;
pub mod merge;
pub mod request;

// Re-exports for convenience
pub use descriptor::{MAIN_ENTRY, ProjectDescriptor, SourceFlavor};
pub use error::{DomainError, ErrorCategory};
pub use merge::{ManifestKind, canonical_json, merge_json, merge_yaml};
pub use request::{DEFAULT_BUILD_DIR, ScaffoldRequest, ScaffoldRequestBuilder};
