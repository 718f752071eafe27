//! extkit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the extkit
//! extension scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           extkit-cli (CLI)              │
//! │     (Builds requests, prints results)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, TemplateService)    │
//! │   Pipeline of tasks with rollback       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Store, Filesystem, Renderer, Formatter)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     extkit-adapters (Infrastructure)    │
//! │ (InMemoryStore, LocalFilesystem, Liquid)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ScaffoldRequest, ProjectDescriptor,    │
//! │  manifest merge strategies)             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use extkit_core::prelude::*;
//!
//! // 1. Build and validate a request
//! let request = ScaffoldRequest::builder()
//!     .extension_type("checkout-ui")
//!     .renderer_name("react")
//!     .template_id("typescript-react")
//!     .root_dir("./ext1")
//!     .build()?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = ScaffoldService::new(store, renderer, filesystem);
//! let descriptor = service.scaffold(&request)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ContentFormatter, FormatterRegistry, ScaffoldService, TemplateService,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{ProjectDescriptor, ScaffoldRequest, SourceFlavor};
    pub use crate::error::{ErrorKind, ExtkitError, ExtkitResult};
}
