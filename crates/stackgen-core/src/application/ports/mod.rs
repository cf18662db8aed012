//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Environment`: process environment lookup
//!   - `Filesystem`: file operations
//!   - `HttpTransport`: outbound HTTP
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Environment, Filesystem, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    TransportError,
};

#[cfg(test)]
pub use output::MockFilesystem;
