//! Command handlers. One module per subcommand; each exposes `execute`.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod modules;
pub mod validate;
pub mod whoami;

use stackgen_core::domain::ValidationResult;

use crate::output::OutputManager;

/// Print validation findings in human or plain form.
pub(crate) fn print_findings(
    output: &OutputManager,
    report: &ValidationResult,
) -> std::io::Result<()> {
    for error in &report.errors {
        output.error(error)?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    Ok(())
}
