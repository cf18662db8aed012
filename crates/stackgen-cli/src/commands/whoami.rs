//! `stackgen whoami`: show the GitHub account behind the token.

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    context::AppContext,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(ctx: &AppContext, output: &OutputManager) -> CliResult<()> {
    let credentials = ctx.credentials();
    if let Err(e) = credentials.resolve_token() {
        return Err(CliError::NotAuthenticated {
            reason: e.message().to_string(),
        });
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Interrupt received, cancelling identity lookup");
                cancel.cancel();
            }
        }
    });

    let spinner = output.spinner("Looking up GitHub account...");
    let identity = credentials.fetch_identity_with_cancel(&cancel).await;
    spinner.finish_and_clear();
    watcher.abort();

    if cancel.is_cancelled() {
        return Err(CliError::Cancelled);
    }

    let identity = identity.ok_or_else(|| CliError::NotAuthenticated {
        reason: "the token was rejected or GitHub could not be reached".into(),
    })?;

    if output.is_json() {
        output.json(&identity)?;
    } else {
        let mut line = format!("Logged in as {}", identity.login);
        if let Some(name) = &identity.name {
            line.push_str(&format!(" ({name})"));
        }
        output.success(&line)?;
        if let Some(email) = &identity.email {
            output.print(&format!("  Email: {email}"))?;
        }
    }

    Ok(())
}
