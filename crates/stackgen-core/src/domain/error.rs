// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use super::value_objects::ModuleKind;

/// Root domain error type.
///
/// Schema violations in a project description are *not* errors of this
/// type: they are collected into a `ValidationResult`. This type covers
/// conversions that cannot produce a value at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown module kind '{0}'")]
    UnknownModuleKind(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownModuleKind(kind) => vec![
                format!("'{}' is not a module kind", kind),
                format!("Use one of: {}", ModuleKind::expected_list()),
            ],
        }
    }
}
