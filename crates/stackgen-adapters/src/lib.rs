//! Infrastructure adapters for Stackgen.
//!
//! This crate implements the ports defined in `stackgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod env;
pub mod filesystem;
pub mod http;

// Re-export commonly used adapters
pub use env::{MapEnvironment, ProcessEnvironment};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{ReqwestTransport, TransportBuildError};
