//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Resolve the credential (no network call without one)
//! 2. Build the request body from the project description
//! 3. POST it to the generation API
//! 4. Turn the response into a [`GenerationOutcome`], persisting an archive
//!    payload to disk in local mode
//!
//! Request-level problems (HTTP status, transport, malformed payload) are
//! returned as [`GenerationOutcome::Failure`], never raised.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        api::{ApiEnvelope, resolve_api_url},
        ports::{Filesystem, HttpRequest, HttpResponse, HttpTransport},
        services::credential_service::CredentialResolver,
    },
    domain::{ModuleDescription, OutputMode, ProjectDescription},
};

/// Header carrying the number of files inside an archive payload.
pub const FILE_COUNT_HEADER: &str = "x-file-count";

/// Inputs for a single [`GenerationService::generate`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub config: ProjectDescription,
    pub api_url: Option<String>,
    /// Local destination: a directory, or a `.zip` file path.
    pub output: Option<PathBuf>,
    pub push_to_github: bool,
    /// Repository name when pushing; defaults to the project name.
    pub repo_name: Option<String>,
    pub private: bool,
    /// Log the outgoing request body.
    pub verbose: bool,
}

impl GenerateOptions {
    pub fn new(config: ProjectDescription) -> Self {
        Self {
            config,
            api_url: None,
            output: None,
            push_to_github: false,
            repo_name: None,
            private: false,
            verbose: false,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use]
    pub fn push_to_github(mut self, repo_name: Option<String>) -> Self {
        self.push_to_github = true;
        self.repo_name = repo_name;
        self
    }

    #[must_use]
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Where the result goes. Pushing wins when both are requested.
    pub fn output_mode(&self) -> Option<OutputMode> {
        if self.push_to_github {
            Some(OutputMode::Github)
        } else if self.output.is_some() {
            Some(OutputMode::Local)
        } else {
            None
        }
    }
}

/// Result of a generation run.
///
/// A success carries `output_path` in local mode and `repo_url` in GitHub
/// mode, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum GenerationOutcome {
    Success {
        file_count: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        output_path: Option<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        clone_command: Option<String>,
    },
    Failure {
        error: String,
    },
}

impl GenerationOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success { .. } => None,
        }
    }
}

// ── wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    project: ProjectPayload<'a>,
    modules: &'a [ModuleDescription],
    output: OutputPayload<'a>,
}

#[derive(Debug, Serialize)]
struct ProjectPayload<'a> {
    name: Option<&'a str>,
    domain: Option<&'a str>,
    owner: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputPayload<'a> {
    #[serde(rename = "type")]
    mode: OutputMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateData {
    #[serde(default)]
    file_count: u64,
    repo_url: Option<String>,
    clone_command: Option<String>,
    error: Option<String>,
}

/// Orchestrates generation runs against the remote API.
pub struct GenerationService {
    credentials: CredentialResolver,
    transport: Arc<dyn HttpTransport>,
    filesystem: Arc<dyn Filesystem>,
}

impl GenerationService {
    pub fn new(
        credentials: CredentialResolver,
        transport: Arc<dyn HttpTransport>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            credentials,
            transport,
            filesystem,
        }
    }

    /// Run one generation. Always returns; failures are data.
    #[instrument(skip_all, fields(project = options.config.name()))]
    pub async fn generate(&self, options: GenerateOptions) -> GenerationOutcome {
        let auth = match self.credentials.build_auth_header() {
            Ok(auth) => auth,
            Err(e) => return GenerationOutcome::failure(e.message()),
        };

        let Some(mode) = options.output_mode() else {
            return GenerationOutcome::failure("No output option specified");
        };

        let repo_name = options
            .repo_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(options.config.project_name.as_deref());
        let body = GenerateRequest {
            project: ProjectPayload {
                name: options.config.project_name.as_deref(),
                domain: options.config.domain.as_deref(),
                owner: options.config.owner.as_deref(),
                description: options.config.description.as_deref(),
            },
            modules: options.config.module_list(),
            output: match mode {
                OutputMode::Github => OutputPayload {
                    mode,
                    repo_name,
                    private: Some(options.private),
                },
                OutputMode::Local => OutputPayload {
                    mode,
                    repo_name: None,
                    private: None,
                },
            },
        };

        let base = resolve_api_url(options.api_url.as_deref(), self.credentials.environment());
        let url = format!("{base}/api/generate");

        let request = match HttpRequest::post(&url).headers(auth).json(&body) {
            Ok(request) => request,
            Err(e) => return GenerationOutcome::failure(format!("Failed to encode request: {e}")),
        };
        if options.verbose {
            debug!(body = %String::from_utf8_lossy(request.body.as_deref().unwrap_or_default()), "Generation request body");
        }

        info!(%url, %mode, modules = body.modules.len(), "Requesting generation");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Generation request failed");
                return GenerationOutcome::failure(e.message());
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Generation API returned an error");
            return GenerationOutcome::failure(format!(
                "API error ({}): {}",
                response.status,
                response.text()
            ));
        }

        if response.is_json() {
            Self::outcome_from_json(&response, mode, options.output)
        } else {
            self.persist_archive(&response, mode, options.output.as_deref(), options.config.name())
        }
    }

    fn outcome_from_json(
        response: &HttpResponse,
        mode: OutputMode,
        output: Option<PathBuf>,
    ) -> GenerationOutcome {
        let envelope = match response.json::<ApiEnvelope<GenerateData>>() {
            Ok(envelope) => envelope,
            Err(e) => return GenerationOutcome::failure(format!("Invalid API response: {e}")),
        };
        let data = envelope.data.unwrap_or_default();

        if !envelope.success {
            let error = envelope
                .error
                .or(data.error)
                .unwrap_or_else(|| "Generation failed".to_string());
            warn!(%error, "Generation rejected by API");
            return GenerationOutcome::Failure { error };
        }

        match mode {
            OutputMode::Github => match data.repo_url {
                Some(repo_url) => {
                    info!(%repo_url, files = data.file_count, "Repository created");
                    GenerationOutcome::Success {
                        file_count: data.file_count,
                        output_path: None,
                        repo_url: Some(repo_url),
                        clone_command: data.clone_command,
                    }
                }
                None => GenerationOutcome::failure("API response missing repoUrl"),
            },
            OutputMode::Local => {
                info!(files = data.file_count, "Generation completed");
                GenerationOutcome::Success {
                    file_count: data.file_count,
                    output_path: output,
                    repo_url: None,
                    clone_command: None,
                }
            }
        }
    }

    fn persist_archive(
        &self,
        response: &HttpResponse,
        mode: OutputMode,
        output: Option<&Path>,
        project_name: &str,
    ) -> GenerationOutcome {
        let (OutputMode::Local, Some(output)) = (mode, output) else {
            return GenerationOutcome::failure("Unexpected archive response for GitHub push");
        };

        let archive = archive_path(output, project_name);
        let target_dir = archive.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = target_dir {
            if !self.filesystem.exists(dir) {
                if let Err(e) = self.filesystem.create_dir_all(dir) {
                    return GenerationOutcome::failure(e.to_string());
                }
            }
        }
        if let Err(e) = self.filesystem.write_bytes(&archive, &response.body) {
            return GenerationOutcome::failure(e.to_string());
        }

        let file_count = response
            .header(FILE_COUNT_HEADER)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        info!(path = %archive.display(), bytes = response.body.len(), "Archive written");

        GenerationOutcome::Success {
            file_count,
            output_path: Some(archive),
            repo_url: None,
            clone_command: None,
        }
    }
}

/// `output` itself when it names a `.zip` file, else
/// `<output>/<project>.zip`.
fn archive_path(output: &Path, project_name: &str) -> PathBuf {
    let is_zip = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        output.to_path_buf()
    } else {
        let stem = if project_name.is_empty() {
            "project"
        } else {
            project_name
        };
        output.join(format!("{stem}.zip"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::application::retry::RetryPolicy;
    use crate::application::services::credential_service::PRIMARY_TOKEN_VAR;
    use crate::application::test_support::{FakeEnv, ScriptedTransport};
    use crate::domain::ModuleKind;
    use serde_json::json;
    use std::sync::Mutex;

    fn config() -> ProjectDescription {
        ProjectDescription::new("my-app", "example.com", "dev@example.com")
            .with_description("demo")
            .with_module(
                ModuleDescription::new(ModuleKind::Code, "nextjs", "web-app")
                    .with_layers(["frontend"]),
            )
    }

    fn service_with(
        env: FakeEnv,
        transport: Arc<ScriptedTransport>,
        fs: MockFilesystem,
    ) -> GenerationService {
        let transport: Arc<dyn HttpTransport> = transport;
        let credentials = CredentialResolver::new(Arc::new(env), Arc::clone(&transport))
            .with_retry_policy(RetryPolicy::default().with_max_attempts(1));
        GenerationService::new(credentials, transport, Arc::new(fs))
    }

    fn authed() -> FakeEnv {
        FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok")
    }

    fn request_json(transport: &ScriptedTransport) -> serde_json::Value {
        let request = transport.last_request().unwrap();
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn missing_credential_fails_without_network() {
        let transport = ScriptedTransport::new();
        let service = service_with(FakeEnv::new(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert!(outcome.error().unwrap().contains("GitHub token required"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn missing_output_option_fails() {
        let transport = ScriptedTransport::new();
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service.generate(GenerateOptions::new(config())).await;

        assert_eq!(outcome, GenerationOutcome::failure("No output option specified"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn local_request_shape_and_endpoint() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200).with_json(&json!({"success": true, "data": {"fileCount": 12}})),
        );
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(
                GenerateOptions::new(config())
                    .with_output("./out")
                    .with_api_url("http://api.test/"),
            )
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::Success {
                file_count: 12,
                output_path: Some(PathBuf::from("./out")),
                repo_url: None,
                clone_command: None,
            }
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/generate");
        assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
        assert_eq!(request.header_value("content-type"), Some("application/json"));

        let body = request_json(&transport);
        assert_eq!(body["project"]["name"], "my-app");
        assert_eq!(body["project"]["description"], "demo");
        assert_eq!(body["modules"][0]["moduleId"], "web-app");
        assert_eq!(body["modules"][0]["type"], "nextjs");
        assert_eq!(body["output"], json!({"type": "local"}));
    }

    #[tokio::test]
    async fn api_url_falls_back_to_environment() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(200).with_json(&json!({"success": true})));
        let env = authed().with("STACKGEN_API_URL", "http://localhost:9000");
        let service = service_with(env, Arc::clone(&transport), MockFilesystem::new());

        service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert_eq!(
            transport.last_request().unwrap().url,
            "http://localhost:9000/api/generate"
        );
    }

    #[tokio::test]
    async fn github_push_wins_and_defaults_repo_name() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(201).with_json(&json!({
            "success": true,
            "data": {
                "fileCount": 30,
                "repoUrl": "https://github.com/dev/my-app",
                "cloneCommand": "git clone https://github.com/dev/my-app.git"
            }
        })));
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(
                GenerateOptions::new(config())
                    .with_output("./out")
                    .push_to_github(None)
                    .private(true),
            )
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::Success {
                file_count: 30,
                output_path: None,
                repo_url: Some("https://github.com/dev/my-app".into()),
                clone_command: Some("git clone https://github.com/dev/my-app.git".into()),
            }
        );
        assert_eq!(
            request_json(&transport)["output"],
            json!({"type": "github", "repoName": "my-app", "private": true})
        );
    }

    #[tokio::test]
    async fn github_success_without_repo_url_is_a_failure() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200).with_json(&json!({"success": true, "data": {"fileCount": 3}})),
        );
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).push_to_github(Some("repo".into())))
            .await;

        assert_eq!(outcome, GenerationOutcome::failure("API response missing repoUrl"));
    }

    #[tokio::test]
    async fn api_rejection_message_is_verbatim() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200)
                .with_json(&json!({"success": false, "error": "Module not found"})),
        );
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert_eq!(outcome, GenerationOutcome::failure("Module not found"));
    }

    #[tokio::test]
    async fn rejection_error_may_live_under_data() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(200).with_json(
            &json!({"success": false, "data": {"error": "Quota exceeded"}}),
        ));
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert_eq!(outcome.error(), Some("Quota exceeded"));
    }

    #[tokio::test]
    async fn non_success_status_includes_body() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(422).with_body("bad module"));
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert_eq!(outcome, GenerationOutcome::failure("API error (422): bad module"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let transport = ScriptedTransport::new();
        transport.push_error("connection refused");
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert_eq!(outcome, GenerationOutcome::failure("connection refused"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200)
                .with_header("content-type", "application/json")
                .with_body("{not json"),
        );
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("./out"))
            .await;

        assert!(outcome.error().unwrap().starts_with("Invalid API response:"));
    }

    #[tokio::test]
    async fn archive_is_written_under_output_directory() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("out"))
            .times(1)
            .returning(|_| Ok(()));
        let sink = Arc::clone(&written);
        fs.expect_write_bytes().returning(move |p, bytes| {
            sink.lock().unwrap().push((p.to_path_buf(), bytes.to_vec()));
            Ok(())
        });

        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200)
                .with_header("Content-Type", "application/zip")
                .with_header("X-File-Count", "7")
                .with_body(vec![0x50, 0x4b, 0x03, 0x04]),
        );
        let service = service_with(authed(), Arc::clone(&transport), fs);

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("out"))
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::Success {
                file_count: 7,
                output_path: Some(PathBuf::from("out/my-app.zip")),
                repo_url: None,
                clone_command: None,
            }
        );
        let written = written.lock().unwrap();
        assert_eq!(written[0].0, PathBuf::from("out/my-app.zip"));
        assert_eq!(written[0].1, vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn archive_goes_straight_to_zip_path() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_bytes()
            .withf(|p, _| p == Path::new("dist/bundle.zip"))
            .times(1)
            .returning(|_, _| Ok(()));

        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(200).with_body(vec![1, 2, 3]));
        let service = service_with(authed(), Arc::clone(&transport), fs);

        let outcome = service
            .generate(GenerateOptions::new(config()).with_output("dist/bundle.zip"))
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn archive_in_github_mode_is_a_failure() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(200).with_body(vec![1, 2, 3]));
        let service = service_with(authed(), Arc::clone(&transport), MockFilesystem::new());

        let outcome = service
            .generate(GenerateOptions::new(config()).push_to_github(None))
            .await;

        assert_eq!(
            outcome,
            GenerationOutcome::failure("Unexpected archive response for GitHub push")
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let value = serde_json::to_value(GenerationOutcome::Success {
            file_count: 2,
            output_path: Some(PathBuf::from("out")),
            repo_url: None,
            clone_command: None,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"status": "success", "fileCount": 2, "outputPath": "out"})
        );
    }
}
