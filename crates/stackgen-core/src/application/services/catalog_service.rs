//! Catalog Service - lists the modules the generation API offers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::{
    api::{ApiEnvelope, resolve_api_url},
    ports::{Environment, HttpRequest, HttpTransport},
};

/// One module available for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Success(Vec<CatalogEntry>),
    Failure { error: String },
}

impl CatalogOutcome {
    fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Entries in API order; empty on failure.
    pub fn modules(&self) -> &[CatalogEntry] {
        match self {
            Self::Success(modules) => modules,
            Self::Failure { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogData {
    #[serde(default)]
    modules: Vec<CatalogEntry>,
}

pub struct CatalogService {
    transport: Arc<dyn HttpTransport>,
    env: Arc<dyn Environment>,
}

impl CatalogService {
    pub fn new(transport: Arc<dyn HttpTransport>, env: Arc<dyn Environment>) -> Self {
        Self { transport, env }
    }

    /// GET `<api_url>/api/modules`. Always returns; failures are data.
    #[instrument(skip(self))]
    pub async fn list_modules(&self, api_url: Option<&str>) -> CatalogOutcome {
        let url = format!("{}/api/modules", resolve_api_url(api_url, self.env.as_ref()));
        debug!(%url, "Listing modules");

        let response = match self
            .transport
            .send(HttpRequest::get(&url).header("Accept", "application/json"))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Module catalog request failed");
                return CatalogOutcome::failure(e.message());
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Module catalog returned an error");
            return CatalogOutcome::failure(format!("API error ({})", response.status));
        }

        match response.json::<ApiEnvelope<CatalogData>>() {
            Ok(envelope) if envelope.success => {
                let modules = envelope.data.unwrap_or_default().modules;
                debug!(count = modules.len(), "Module catalog received");
                CatalogOutcome::Success(modules)
            }
            Ok(envelope) => CatalogOutcome::failure(
                envelope
                    .error
                    .unwrap_or_else(|| "Failed to list modules".to_string()),
            ),
            Err(e) => CatalogOutcome::failure(format!("Invalid API response: {e}")),
        }
    }
}
