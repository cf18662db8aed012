//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackgen-adapters` crate provides implementations.

mod http;

pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};

use crate::error::StackgenResult;
use async_trait::async_trait;
use std::path::Path;

/// Port for reading process-level settings such as credentials.
///
/// Implemented by:
/// - `stackgen_adapters::env::ProcessEnvironment` (production)
/// - `stackgen_adapters::env::MapEnvironment` (testing, embedding)
pub trait Environment: Send + Sync {
    /// Value of `name`, or `None` when unset or not valid unicode.
    fn var(&self, name: &str) -> Option<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackgen_adapters::filesystem::LocalFilesystem` (production)
/// - `stackgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StackgenResult<String>;

    /// Write text content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> StackgenResult<()>;

    /// Write binary content to a file, replacing it.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> StackgenResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackgenResult<()>;
}

/// Port for outbound HTTP.
///
/// Implemented by:
/// - `stackgen_adapters::http::ReqwestTransport` (production)
///
/// A non-2xx status is a successful `send`; only failures to obtain a
/// response at all (DNS, connect, timeout, body read) are `TransportError`s.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
