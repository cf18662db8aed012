//! Error handling for the Stackgen CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stackgen_core::application::services::credential_service::{
    PRIMARY_TOKEN_VAR, TOKEN_CREATION_URL,
};
use stackgen_core::error::StackgenError;

pub use stackgen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (missing or malformed flag values).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The project description failed validation.
    #[error("{} is invalid ({})", .path.display(), error_count(.errors))]
    InvalidConfig { path: PathBuf, errors: Vec<String> },

    /// No project description at the given path.
    #[error("No project description found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// `init` would overwrite an existing description.
    #[error("Project description already exists at {}", .path.display())]
    ConfigExists { path: PathBuf },

    /// The generation service returned a failure outcome.
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    /// The module catalog could not be listed.
    #[error("Could not list modules: {message}")]
    CatalogFailed { message: String },

    /// No credential, or the credential was rejected.
    #[error("Not authenticated: {reason}")]
    NotAuthenticated { reason: String },

    // ── Settings errors ────────────────────────────────────────────────────
    /// Application settings could not be read or a key is unknown.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `stackgen-core`.
    #[error(transparent)]
    Core(#[from] StackgenError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

fn error_count(errors: &[String]) -> String {
    match errors.len() {
        1 => "1 error".to_string(),
        n => format!("{n} errors"),
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::InvalidConfig { errors, .. } => {
                let mut suggestions: Vec<String> =
                    errors.iter().map(|e| format!("  \u{2022} {e}")).collect();
                suggestions.push("Fix the fields above and run: stackgen validate".into());
                suggestions
            }

            Self::ConfigNotFound { .. } => vec![
                "Create one with: stackgen init".into(),
                "Or point at an existing file with --file <path>".into(),
            ],

            Self::ConfigExists { .. } => vec![
                "Use --force to overwrite it".into(),
                "Or write somewhere else with --file <path>".into(),
            ],

            Self::GenerationFailed { .. } => vec![
                "Check the project description with: stackgen validate".into(),
                "Re-run with -vv to see the request that was sent".into(),
            ],

            Self::CatalogFailed { .. } => vec![
                "Check your network connection".into(),
                "Override the service address with --api-url or STACKGEN_API_URL".into(),
            ],

            Self::NotAuthenticated { .. } => vec![
                format!("export {PRIMARY_TOKEN_VAR}=<your token>"),
                format!("Create a token at: {TOKEN_CREATION_URL}"),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Show the active settings file with: stackgen config path".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidConfig { .. }
            | Self::ConfigExists { .. }
            | Self::GenerationFailed { .. }
            | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigNotFound { .. } => ErrorCategory::NotFound,
            Self::NotAuthenticated { .. } | Self::ConfigError { .. } => {
                ErrorCategory::Configuration
            }
            Self::CatalogFailed { .. } | Self::IoError { .. } => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Authentication | CoreCategory::Configuration => {
                    ErrorCategory::Configuration
                }
                CoreCategory::Internal => ErrorCategory::Internal,
            },
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold()
        );
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = writeln!(
                    output,
                    "\n  {} {}",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                );
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(output, "\n{}", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                output,
                "\n{} {}",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\nError: {self}");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error (settings, credentials).
    Configuration,
    /// Internal/system error.
    Internal,
}

/// Attach a context message to foreign errors at call-sites.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
