//! Unified error handling for Stackgen Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.
//!
//! Only setup problems are raised through this type: a missing credential and
//! a malformed project document. Validation findings and network failures are
//! returned as data (`ValidationResult`, `GenerationOutcome`, `CatalogOutcome`).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stackgen Core operations.
#[derive(Debug, Error, Clone)]
pub enum StackgenError {
    /// Errors from the domain layer (model violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (credentials, persistence).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl StackgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when the error means no usable credential is configured.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::Auth(_)))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StackgenResult<T> = Result<T, StackgenError>;
