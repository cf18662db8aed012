//! Shared pieces of the generation API contract.

use serde::Deserialize;

use crate::application::ports::Environment;

pub const DEFAULT_API_URL: &str = "https://api.stackgen.dev";

/// Overrides [`DEFAULT_API_URL`] when no explicit URL is given.
pub const API_URL_VAR: &str = "STACKGEN_API_URL";

/// Base URL for API calls: `explicit`, else [`API_URL_VAR`], else
/// [`DEFAULT_API_URL`]. Empty values are skipped and a trailing `/` is
/// dropped so paths can be appended directly.
pub fn resolve_api_url(explicit: Option<&str>, env: &dyn Environment) -> String {
    explicit
        .map(str::to_owned)
        .filter(|url| !url.trim().is_empty())
        .or_else(|| env.var(API_URL_VAR).filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
        .trim()
        .trim_end_matches('/')
        .to_owned()
}

/// `{ success, data?, error? }` wrapper used by every JSON endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
