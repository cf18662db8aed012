//! Environment adapters.

mod memory;
mod process;

pub use memory::MapEnvironment;
pub use process::ProcessEnvironment;
