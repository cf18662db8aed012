//! `stackgen generate`: build the project through the generation service.

use std::path::PathBuf;

use stackgen_core::{
    application::{ConfigStore, GenerateOptions, GenerationOutcome},
    domain::{ProjectDescription, SchemaValidator},
};
use tracing::{info, instrument};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

#[instrument(skip_all)]
pub async fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    ctx: &AppContext,
    output: &OutputManager,
) -> CliResult<()> {
    let path = ConfigStore::resolve_path(args.file.as_deref());
    let config = ctx
        .store()
        .load(Some(&path))?
        .ok_or_else(|| CliError::ConfigNotFound { path: path.clone() })?;

    let report = SchemaValidator::validate(&config);
    if !output.is_json() {
        for warning in &report.warnings {
            output.warning(warning)?;
        }
    }
    if !report.valid {
        return Err(CliError::InvalidConfig {
            path,
            errors: report.errors,
        });
    }

    if let Err(e) = ctx.credentials().resolve_token() {
        return Err(CliError::NotAuthenticated {
            reason: e.message().to_string(),
        });
    }

    let options = build_options(&args, config, global.verbose >= 2);

    if !args.yes && !output.is_quiet() && !output.is_json() {
        let question = format!("Generate '{}' {}?", options.config.name(), destination(&options));
        if !prompt::confirm(&question, true)? {
            return Err(CliError::Cancelled);
        }
    }

    let spinner = output.spinner(&format!("Generating {}...", options.config.name()));
    let outcome = ctx.generation().generate(options).await;
    spinner.finish_and_clear();

    if output.is_json() {
        output.json(&outcome)?;
    }

    match outcome {
        GenerationOutcome::Success {
            file_count,
            output_path,
            repo_url,
            clone_command,
        } => {
            info!(file_count, "Generation finished");
            if !output.is_json() {
                report_success(output, file_count, output_path, repo_url, clone_command)?;
            }
            Ok(())
        }
        GenerationOutcome::Failure { error } => Err(CliError::GenerationFailed { message: error }),
    }
}

fn build_options(args: &GenerateArgs, config: ProjectDescription, verbose: bool) -> GenerateOptions {
    let mut options = GenerateOptions::new(config).verbose(verbose);
    if let Some(api_url) = &args.api_url {
        options = options.with_api_url(api_url.clone());
    }
    if let Some(dir) = &args.output {
        options = options.with_output(dir.clone());
    }
    if args.github {
        options = options
            .push_to_github(args.repo_name.clone())
            .private(args.private);
    }
    options
}

fn destination(options: &GenerateOptions) -> String {
    if options.push_to_github {
        let repo = options
            .repo_name
            .as_deref()
            .unwrap_or_else(|| options.config.name());
        let visibility = if options.private { "private" } else { "public" };
        format!("into a new {visibility} GitHub repository '{repo}'")
    } else {
        match &options.output {
            Some(dir) => format!("into {}", dir.display()),
            None => "(no destination given)".to_string(),
        }
    }
}

fn report_success(
    output: &OutputManager,
    file_count: u64,
    output_path: Option<PathBuf>,
    repo_url: Option<String>,
    clone_command: Option<String>,
) -> CliResult<()> {
    output.success(&format!("Generated {file_count} files"))?;
    if let Some(path) = output_path {
        output.print(&format!("  Archive: {}", path.display()))?;
    }
    if let Some(url) = repo_url {
        output.print(&format!("  Repository: {url}"))?;
    }
    if let Some(command) = clone_command {
        output.print(&format!("  Clone with: {command}"))?;
    }
    Ok(())
}
