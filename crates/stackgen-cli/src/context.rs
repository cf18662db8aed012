//! Composition root: builds the adapters once and hands out services.

use std::sync::Arc;

use stackgen_adapters::{LocalFilesystem, ProcessEnvironment, ReqwestTransport};
use stackgen_core::application::{
    CatalogService, ConfigStore, CredentialResolver, GenerationService,
    ports::{Environment, Filesystem, HttpTransport},
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Production adapters shared by every command of one invocation.
pub struct AppContext {
    env: Arc<dyn Environment>,
    filesystem: Arc<dyn Filesystem>,
    transport: Arc<dyn HttpTransport>,
    config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> CliResult<Self> {
        let transport = ReqwestTransport::new(config.timeout(), &config.http.user_agent)
            .map_err(|e| CliError::ConfigError {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            env: Arc::new(ProcessEnvironment::new()),
            filesystem: Arc::new(LocalFilesystem::new()),
            transport: Arc::new(transport),
            config,
        })
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(Arc::clone(&self.filesystem))
    }

    pub fn credentials(&self) -> CredentialResolver {
        CredentialResolver::new(Arc::clone(&self.env), Arc::clone(&self.transport))
            .with_user_agent(self.config.http.user_agent.clone())
            .with_retry_policy(self.config.retry_policy())
    }

    pub fn generation(&self) -> GenerationService {
        GenerationService::new(
            self.credentials(),
            Arc::clone(&self.transport),
            Arc::clone(&self.filesystem),
        )
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.transport), Arc::clone(&self.env))
    }
}
