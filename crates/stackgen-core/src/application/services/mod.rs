//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "who am I".

pub mod catalog_service;
pub mod config_service;
pub mod credential_service;
pub mod generation_service;

pub use catalog_service::{CatalogEntry, CatalogOutcome, CatalogService};
pub use config_service::{ConfigStore, DEFAULT_CONFIG_FILE, SCHEMA_VERSION};
pub use credential_service::{CredentialResolver, Identity};
pub use generation_service::{GenerateOptions, GenerationOutcome, GenerationService};
