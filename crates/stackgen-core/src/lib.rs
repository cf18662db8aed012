//! Stackgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stackgen
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, CatalogService,    │
//! │   CredentialResolver, ConfigStore)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Environment, Filesystem, Http) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackgen-adapters (Infrastructure)   │
//! │ (ProcessEnvironment, LocalFilesystem,   │
//! │  ReqwestTransport)                      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectDescription, SchemaValidator)   │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackgen_core::{
//!     application::{GenerateOptions, GenerationService},
//!     domain::SchemaValidator,
//! };
//!
//! // 1. Load and validate
//! let config = store.load(None)?.expect("stackgen.yaml");
//! let report = SchemaValidator::validate(&config);
//! assert!(report.valid);
//!
//! // 2. Generate (with injected adapters)
//! let service = GenerationService::new(credentials, transport, filesystem);
//! let outcome = service
//!     .generate(GenerateOptions::new(config).with_output("./out"))
//!     .await;
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CatalogOutcome, CatalogService, ConfigStore, CredentialResolver, GenerateOptions,
        GenerationOutcome, GenerationService, Identity, RetryPolicy,
        ports::{Environment, Filesystem, HttpTransport},
    };
    pub use crate::domain::{
        ModuleDescription, ModuleKind, OutputMode, ProjectDescription, SchemaValidator,
        ValidationResult,
    };
    pub use crate::error::{StackgenError, StackgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
