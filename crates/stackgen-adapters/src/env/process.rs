//! Process environment adapter using `std::env`.

use stackgen_core::application::ports::Environment;

/// Reads variables from the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_process_variables() {
        // PATH is set in every test environment we run in.
        assert!(ProcessEnvironment::new().var("PATH").is_some());
        assert!(
            ProcessEnvironment::new()
                .var("STACKGEN_TEST_SURELY_UNSET_VARIABLE")
                .is_none()
        );
    }
}
