//! Application layer errors.
//!
//! These errors represent setup failures that stop a command before any
//! useful work can happen. Request-level failures (HTTP status, transport)
//! are never raised; they travel as data inside the service outcomes.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::credential_service::{
    FALLBACK_TOKEN_VAR, PRIMARY_TOKEN_VAR, TOKEN_CREATION_URL,
};
use crate::error::ErrorCategory;

/// No usable credential could be resolved.
///
/// The message is operator-facing and is surfaced verbatim by the
/// generation service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    /// Neither credential variable is set (or both are empty).
    pub fn missing_token() -> Self {
        Self {
            message: format!(
                "GitHub token required. Set the {PRIMARY_TOKEN_VAR} or {FALLBACK_TOKEN_VAR} \
                 environment variable.\nCreate a token at: {TOKEN_CREATION_URL}"
            ),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Credential missing.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The persisted project description is not valid YAML for the schema.
    #[error("Failed to parse {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A value could not be serialized for persistence.
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },

    /// Shared adapter state is unusable (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Auth(_) => vec![
                format!("export {PRIMARY_TOKEN_VAR}=<your token>"),
                format!("Create a token at: {TOKEN_CREATION_URL}"),
            ],
            Self::ConfigParse { path, .. } => vec![
                format!("Fix the YAML syntax in {}", path.display()),
                "Or recreate it with: stackgen init --force".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::ConfigParse { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::Serialization { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
