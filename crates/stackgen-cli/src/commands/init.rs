//! `stackgen init`: write a starter project description.

use stackgen_core::{
    application::ConfigStore,
    domain::{ModuleDescription, ModuleKind, ProjectDescription, SchemaValidator},
};
use tracing::{info, instrument};

use crate::{
    cli::InitArgs,
    context::AppContext,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompt,
};

const DEFAULT_ENVIRONMENTS: [&str; 2] = ["dev", "prod"];

#[instrument(skip_all)]
pub fn execute(args: InitArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    write_starter(args, &ctx.store(), output)
}

fn write_starter(args: InitArgs, store: &ConfigStore, output: &OutputManager) -> CliResult<()> {
    let path = std::path::absolute(ConfigStore::resolve_path(args.file.as_deref()))
        .with_cli_context(|| "failed to resolve the description path")?;

    if store.exists(Some(&path))? && !args.force {
        let question = format!("{} already exists. Overwrite?", path.display());
        if !prompt::is_interactive() || !prompt::confirm(&question, false)? {
            return Err(CliError::ConfigExists { path });
        }
    }

    let description = collect_description(&args)?;

    let report = SchemaValidator::validate(&description);
    if !report.valid {
        return Err(CliError::InvalidConfig {
            path,
            errors: report.errors,
        });
    }

    let written = store.save(&description, Some(&path))?;
    info!(path = %written.display(), "Project description created");

    if output.is_json() {
        output.json(&serde_json::json!({ "file": written, "warnings": report.warnings }))?;
    } else {
        for warning in &report.warnings {
            output.warning(warning)?;
        }
        output.success(&format!("Created {}", written.display()))?;
        output.info("Next: stackgen validate, then stackgen generate --output <dir>")?;
    }

    Ok(())
}

/// Flags win; anything missing is asked for.
fn collect_description(args: &InitArgs) -> CliResult<ProjectDescription> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompt::text("Project name", "--name", None, |v| field_check("projectName", v))?,
    };
    let domain = match &args.domain {
        Some(domain) => domain.clone(),
        None => prompt::text("Domain", "--domain", None, |v| field_check("domain", v))?,
    };
    let owner = match &args.owner {
        Some(owner) => owner.clone(),
        None => prompt::text("Owner email", "--owner", None, |v| field_check("owner", v))?,
    };

    Ok(starter_description(name, domain, owner, args.description.clone()))
}

/// Description with a single web-app code module and the default
/// environments.
fn starter_description(
    name: String,
    domain: String,
    owner: String,
    description: Option<String>,
) -> ProjectDescription {
    let mut project = ProjectDescription::new(name, domain, owner)
        .with_module(
            ModuleDescription::new(ModuleKind::Code, "nextjs", "web-app").with_layers(["frontend"]),
        )
        .with_environments(DEFAULT_ENVIRONMENTS);
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        project = project.with_description(description);
    }
    project
}

/// First validation error about `field` when `value` is used for it.
fn field_check(field: &str, value: &str) -> Result<(), String> {
    let mut candidate = starter_description(
        "sample".into(),
        "example.com".into(),
        "dev@example.com".into(),
        None,
    );
    match field {
        "projectName" => candidate.project_name = Some(value.to_string()),
        "domain" => candidate.domain = Some(value.to_string()),
        _ => candidate.owner = Some(value.to_string()),
    }

    match SchemaValidator::validate(&candidate)
        .errors
        .into_iter()
        .find(|e| e.starts_with(field))
    {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
