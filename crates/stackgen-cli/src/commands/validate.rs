//! `stackgen validate`: check a project description without generating.

use serde::Serialize;
use stackgen_core::{
    application::ConfigStore,
    domain::{SchemaValidator, ValidationResult},
};
use tracing::instrument;

use crate::{
    cli::ValidateArgs,
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct ValidationReport<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

#[instrument(skip_all)]
pub fn execute(args: ValidateArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let path = ConfigStore::resolve_path(args.file.as_deref());
    let config = ctx
        .store()
        .load(Some(&path))?
        .ok_or_else(|| CliError::ConfigNotFound { path: path.clone() })?;

    let report = SchemaValidator::validate(&config);

    if output.is_json() {
        output.json(&ValidationReport {
            file: path.display().to_string(),
            result: &report,
        })?;
    } else {
        super::print_findings(output, &report)?;
        if report.valid {
            output.success(&format!("{} is valid", path.display()))?;
        }
    }

    if report.valid {
        Ok(())
    } else {
        Err(CliError::InvalidConfig {
            path,
            errors: report.errors,
        })
    }
}
