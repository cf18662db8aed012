//! Application layer for Stackgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, CatalogService,
//!   CredentialResolver, ConfigStore)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Retry**: The backoff routine shared by network-facing services
//! - **Errors**: Application-specific error types
//!
//! Services never raise request-level failures. HTTP status codes and
//! transport errors come back as [`GenerationOutcome`] / [`CatalogOutcome`]
//! values; only setup problems use [`ApplicationError`].

pub mod api;
pub mod error;
pub mod ports;
pub mod retry;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main services
pub use services::{
    CatalogEntry, CatalogOutcome, CatalogService, ConfigStore, CredentialResolver,
    GenerateOptions, GenerationOutcome, GenerationService, Identity,
};

pub use api::{API_URL_VAR, DEFAULT_API_URL, resolve_api_url};
pub use error::{ApplicationError, AuthError};
pub use retry::{RetryError, RetryPolicy, with_retry};
