//! Domain entities.

pub mod project;

pub use project::{ModuleDescription, ProjectDescription};
