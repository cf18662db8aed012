//! Config Store - persists the project description as YAML.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::ProjectDescription,
    error::StackgenResult,
};

/// File used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "stackgen.yaml";

/// Stamped on save when the caller did not set a version.
pub const SCHEMA_VERSION: &str = "1.0";

/// Loads and saves [`ProjectDescription`] documents through the
/// [`Filesystem`] port.
#[derive(Clone)]
pub struct ConfigStore {
    filesystem: Arc<dyn Filesystem>,
}

impl ConfigStore {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// `path` unchanged, or [`DEFAULT_CONFIG_FILE`].
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf)
    }

    /// Whether a document is already stored at `path`.
    pub fn exists(&self, path: Option<&Path>) -> StackgenResult<bool> {
        let path = absolute(&Self::resolve_path(path))?;
        Ok(self.filesystem.exists(&path))
    }

    /// Read the document at `path`.
    ///
    /// `Ok(None)` when the file does not exist. Malformed YAML is an
    /// [`ApplicationError::ConfigParse`] carrying the parser's message.
    #[instrument(skip(self))]
    pub fn load(&self, path: Option<&Path>) -> StackgenResult<Option<ProjectDescription>> {
        let path = absolute(&Self::resolve_path(path))?;

        if !self.filesystem.exists(&path) {
            debug!(path = %path.display(), "No project description found");
            return Ok(None);
        }

        let raw = self.filesystem.read_to_string(&path)?;
        let config = serde_yaml::from_str::<ProjectDescription>(&raw).map_err(|e| {
            ApplicationError::ConfigParse {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(path = %path.display(), project = config.name(), "Loaded project description");
        Ok(Some(config))
    }

    /// Write `config` to `path`, replacing any existing file.
    ///
    /// Returns the absolute path written. A missing `version` is stamped
    /// with [`SCHEMA_VERSION`]; the caller's value is otherwise kept.
    #[instrument(skip(self, config), fields(project = config.name()))]
    pub fn save(
        &self,
        config: &ProjectDescription,
        path: Option<&Path>,
    ) -> StackgenResult<PathBuf> {
        let path = absolute(&Self::resolve_path(path))?;

        let mut document = config.clone();
        document
            .version
            .get_or_insert_with(|| SCHEMA_VERSION.to_string());

        let mut yaml =
            serde_yaml::to_string(&document).map_err(|e| ApplicationError::Serialization {
                reason: e.to_string(),
            })?;
        if !yaml.ends_with('\n') {
            yaml.push('\n');
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem.write_file(&path, &yaml)?;
        info!(path = %path.display(), "Saved project description");
        Ok(path)
    }
}

fn absolute(path: &Path) -> StackgenResult<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
