//! `stackgen modules`: list what the generation service can build.

use stackgen_core::{application::CatalogEntry, domain::ModuleKind};
use tracing::instrument;

use crate::{
    cli::{ModulesArgs, ModulesFormat},
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(args: ModulesArgs, ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let spinner = output.spinner("Fetching module catalog...");
    let outcome = ctx.catalog().list_modules(args.api_url.as_deref()).await;
    spinner.finish_and_clear();

    if let Some(error) = outcome.error() {
        return Err(CliError::CatalogFailed {
            message: error.to_string(),
        });
    }

    let kind = args.kind.map(ModuleKind::from);
    let modules = filter_by_kind(outcome.modules(), kind);

    let format = if output.is_json() {
        ModulesFormat::Json
    } else {
        args.format
    };

    match format {
        ModulesFormat::Json => output.json(&modules)?,
        ModulesFormat::List => {
            for module in &modules {
                output.print(&module.id)?;
            }
        }
        ModulesFormat::Table => {
            if modules.is_empty() {
                output.info("No modules available")?;
                return Ok(());
            }
            output.header(&format!("Available modules ({})", modules.len()))?;
            for line in render_table(&modules) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

/// Entries of the given kind, in catalog order. `None` keeps all.
fn filter_by_kind(modules: &[CatalogEntry], kind: Option<ModuleKind>) -> Vec<&CatalogEntry> {
    modules
        .iter()
        .filter(|m| kind.is_none_or(|k| m.kind == k.as_str()))
        .collect()
}

fn render_table(modules: &[&CatalogEntry]) -> Vec<String> {
    let id_width = column_width("ID", modules.iter().map(|m| m.id.as_str()));
    let kind_width = column_width("KIND", modules.iter().map(|m| m.kind.as_str()));
    let name_width = column_width("NAME", modules.iter().map(|m| m.name.as_str()));

    let mut lines = Vec::with_capacity(modules.len() + 1);
    lines.push(format!(
        "{:id_width$}  {:kind_width$}  {:name_width$}  DESCRIPTION",
        "ID", "KIND", "NAME"
    ));
    for m in modules {
        let description = match &m.layers {
            Some(layers) if !layers.is_empty() => {
                format!("{} [{}]", m.description, layers.join(", "))
            }
            _ => m.description.clone(),
        };
        lines.push(
            format!(
                "{:id_width$}  {:kind_width$}  {:name_width$}  {}",
                m.id, m.kind, m.name, description
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).chain([header.len()]).max().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kind: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            kind: kind.into(),
            module_type: id.into(),
            name: id.to_uppercase(),
            description: format!("{id} module"),
            layers: None,
        }
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let modules = [entry("nextjs", "code"), entry("github", "vcs"), entry("fastapi", "code")];
        let ids: Vec<_> = filter_by_kind(&modules, Some(ModuleKind::Code))
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["nextjs", "fastapi"]);
        assert_eq!(filter_by_kind(&modules, None).len(), 3);
    }

    #[test]
    fn table_aligns_columns() {
        let mut web = entry("nextjs", "code");
        web.layers = Some(vec!["frontend".into()]);
        let vcs = entry("github", "vcs");

        let lines = render_table(&[&web, &vcs]);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID      KIND  NAME  "));
        assert!(lines[1].ends_with("nextjs module [frontend]"));
        assert!(lines[2].starts_with("github  vcs "));
    }
}
