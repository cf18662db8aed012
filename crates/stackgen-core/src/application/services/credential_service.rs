//! Credential Resolver - bearer token resolution and GitHub identity lookup.
//!
//! Only [`CredentialResolver::resolve_token`] and
//! [`CredentialResolver::build_auth_header`] fail (with [`AuthError`]).
//! Every other operation degrades to `false`/`None` so "am I
//! authenticated?" callers never handle errors.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::application::{
    AuthError,
    ports::{Environment, HttpRequest, HttpTransport, TransportError},
    retry::{RetryError, RetryPolicy, with_retry},
};

/// Checked first.
pub const PRIMARY_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Checked when the primary variable is unset or empty.
pub const FALLBACK_TOKEN_VAR: &str = "GH_TOKEN";
pub const TOKEN_CREATION_URL: &str = "https://github.com/settings/tokens";
pub const GITHUB_USER_URL: &str = "https://api.github.com/user";
pub const GITHUB_API_VERSION: &str = "2022-11-28";
pub const DEFAULT_USER_AGENT: &str = concat!("stackgen/", env!("CARGO_PKG_VERSION"));

/// The authenticated GitHub account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub id: u64,
}

/// Why a single identity attempt failed.
#[derive(Debug, Error)]
enum IdentityFailure {
    #[error("identity rejected with HTTP {0}")]
    Rejected(u16),

    #[error("identity endpoint returned HTTP {0}")]
    Server(u16),

    #[error(transparent)]
    Transport(TransportError),

    #[error("unreadable identity payload: {0}")]
    Malformed(String),
}

impl IdentityFailure {
    /// A 4xx means the token is bad; asking again will not help.
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Server(_) | Self::Transport(_))
    }
}

/// Resolves credentials from an injected [`Environment`].
#[derive(Clone)]
pub struct CredentialResolver {
    env: Arc<dyn Environment>,
    transport: Arc<dyn HttpTransport>,
    identity_url: String,
    user_agent: String,
    retry: RetryPolicy,
}

impl CredentialResolver {
    pub fn new(env: Arc<dyn Environment>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            env,
            transport,
            identity_url: GITHUB_USER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The environment this resolver reads from.
    pub fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    /// Token from the primary variable, else the fallback. Empty values
    /// count as unset.
    pub fn resolve_token(&self) -> Result<String, AuthError> {
        [PRIMARY_TOKEN_VAR, FALLBACK_TOKEN_VAR]
            .into_iter()
            .filter_map(|name| self.env.var(name))
            .find(|value| !value.is_empty())
            .ok_or_else(AuthError::missing_token)
    }

    pub fn has_credential(&self) -> bool {
        self.resolve_token().is_ok()
    }

    /// `{"Authorization": "Bearer <token>"}`
    pub fn build_auth_header(&self) -> Result<BTreeMap<String, String>, AuthError> {
        let token = self.resolve_token()?;
        Ok(BTreeMap::from([(
            "Authorization".to_string(),
            format!("Bearer {token}"),
        )]))
    }

    /// Look up the account behind the current token.
    ///
    /// `None` without a network call when no credential is configured, on
    /// any 4xx, or once the retry budget for 5xx/transport failures is
    /// spent.
    pub async fn fetch_identity(&self) -> Option<Identity> {
        self.lookup_identity(None).await
    }

    /// [`Self::fetch_identity`] that gives up (returning `None`) as soon as
    /// `cancel` fires.
    pub async fn fetch_identity_with_cancel(&self, cancel: &CancellationToken) -> Option<Identity> {
        self.lookup_identity(Some(cancel)).await
    }

    #[instrument(skip_all, fields(url = %self.identity_url))]
    async fn lookup_identity(&self, cancel: Option<&CancellationToken>) -> Option<Identity> {
        let Ok(auth) = self.build_auth_header() else {
            debug!("No credential configured; skipping identity lookup");
            return None;
        };

        let result = with_retry(
            &self.retry,
            cancel,
            |attempt| {
                let request = self.identity_request(&auth);
                async move {
                    debug!(attempt, "Requesting identity");
                    self.attempt_identity(request).await
                }
            },
            IdentityFailure::is_retryable,
        )
        .await;

        match result {
            Ok(identity) => {
                info!(login = %identity.login, "Identity resolved");
                Some(identity)
            }
            Err(RetryError::Failed { error, attempts }) => {
                warn!(attempts, error = %error, "Identity lookup failed");
                None
            }
            Err(RetryError::Cancelled { attempts }) => {
                debug!(attempts, "Identity lookup cancelled");
                None
            }
        }
    }

    fn identity_request(&self, auth: &BTreeMap<String, String>) -> HttpRequest {
        HttpRequest::get(&self.identity_url)
            .headers(auth.clone())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", &self.user_agent)
    }

    async fn attempt_identity(&self, request: HttpRequest) -> Result<Identity, IdentityFailure> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(IdentityFailure::Transport)?;

        if response.is_success() {
            response
                .json::<Identity>()
                .map_err(|e| IdentityFailure::Malformed(e.to_string()))
        } else if response.is_server_error() {
            Err(IdentityFailure::Server(response.status))
        } else {
            Err(IdentityFailure::Rejected(response.status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::HttpResponse;
    use crate::application::test_support::{FakeEnv, ScriptedTransport};
    use std::time::Duration;

    fn resolver(env: FakeEnv, transport: Arc<ScriptedTransport>) -> CredentialResolver {
        CredentialResolver::new(Arc::new(env), transport)
            .with_retry_policy(RetryPolicy::default().with_base_delay(Duration::ZERO))
    }

    fn identity_body() -> serde_json::Value {
        serde_json::json!({"login": "octocat", "name": "The Octocat", "id": 583231})
    }

    // ── token resolution ─────────────────────────────────────────────────────

    #[test]
    fn primary_variable_wins() {
        let env = FakeEnv::new()
            .with(PRIMARY_TOKEN_VAR, "A")
            .with(FALLBACK_TOKEN_VAR, "B");
        let r = resolver(env, ScriptedTransport::new());
        assert_eq!(r.resolve_token().unwrap(), "A");
    }

    #[test]
    fn fallback_used_when_primary_unset() {
        let env = FakeEnv::new().with(FALLBACK_TOKEN_VAR, "B");
        assert_eq!(resolver(env, ScriptedTransport::new()).resolve_token().unwrap(), "B");
    }

    #[test]
    fn empty_primary_falls_through() {
        let env = FakeEnv::new()
            .with(PRIMARY_TOKEN_VAR, "")
            .with(FALLBACK_TOKEN_VAR, "B");
        assert_eq!(resolver(env, ScriptedTransport::new()).resolve_token().unwrap(), "B");
    }

    #[test]
    fn missing_token_is_an_auth_error() {
        let r = resolver(FakeEnv::new(), ScriptedTransport::new());
        let err = r.resolve_token().unwrap_err();
        assert!(err.message().contains("GitHub token required"));
        assert!(!r.has_credential());
        assert!(r.build_auth_header().is_err());
    }

    #[test]
    fn empty_values_are_not_credentials() {
        let env = FakeEnv::new()
            .with(PRIMARY_TOKEN_VAR, "")
            .with(FALLBACK_TOKEN_VAR, "");
        assert!(!resolver(env, ScriptedTransport::new()).has_credential());
    }

    #[test]
    fn auth_header_is_bearer() {
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");
        let header = resolver(env, ScriptedTransport::new())
            .build_auth_header()
            .unwrap();
        assert_eq!(header.get("Authorization").unwrap(), "Bearer tok");
        assert_eq!(header.len(), 1);
    }

    // ── identity lookup ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn no_credential_means_no_request() {
        let transport = ScriptedTransport::new();
        let r = resolver(FakeEnv::new(), Arc::clone(&transport));
        assert_eq!(r.fetch_identity().await, None);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn success_parses_identity_and_sends_github_headers() {
        let transport = ScriptedTransport::new();
        transport.push_response(HttpResponse::new(200).with_json(&identity_body()));
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

        let identity = resolver(env, Arc::clone(&transport))
            .fetch_identity()
            .await
            .unwrap();

        assert_eq!(identity.login, "octocat");
        assert_eq!(identity.name.as_deref(), Some("The Octocat"));
        assert_eq!(identity.email, None);
        assert_eq!(identity.id, 583231);

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, GITHUB_USER_URL);
        assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
        assert_eq!(
            request.header_value("x-github-api-version"),
            Some(GITHUB_API_VERSION)
        );
        assert!(request.header_value("user-agent").is_some());
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        for status in [401, 403, 404] {
            let transport = ScriptedTransport::new();
            transport.push_response(HttpResponse::new(status));
            let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

            let identity = resolver(env, Arc::clone(&transport)).fetch_identity().await;

            assert_eq!(identity, None);
            assert_eq!(transport.calls(), 1, "status {status}");
        }
    }

    #[tokio::test]
    async fn server_errors_use_three_attempts() {
        let transport = ScriptedTransport::new();
        for _ in 0..5 {
            transport.push_response(HttpResponse::new(500));
        }
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

        assert_eq!(resolver(env, Arc::clone(&transport)).fetch_identity().await, None);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn transport_errors_use_three_attempts() {
        let transport = ScriptedTransport::new();
        for _ in 0..5 {
            transport.push_error("connection refused");
        }
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

        assert_eq!(resolver(env, Arc::clone(&transport)).fetch_identity().await, None);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let transport = ScriptedTransport::new();
        transport.push_error("timed out");
        transport.push_response(HttpResponse::new(502));
        transport.push_response(HttpResponse::new(200).with_json(&identity_body()));
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

        let identity = resolver(env, Arc::clone(&transport)).fetch_identity().await;

        assert_eq!(identity.map(|i| i.login).as_deref(), Some("octocat"));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_retried() {
        let transport = ScriptedTransport::new();
        transport.push_response(
            HttpResponse::new(200).with_json(&serde_json::json!({"unexpected": true})),
        );
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");

        assert_eq!(resolver(env, Arc::clone(&transport)).fetch_identity().await, None);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_lookup_makes_no_request() {
        let transport = ScriptedTransport::new();
        let env = FakeEnv::new().with(PRIMARY_TOKEN_VAR, "tok");
        let token = CancellationToken::new();
        token.cancel();

        let identity = resolver(env, Arc::clone(&transport))
            .fetch_identity_with_cancel(&token)
            .await;

        assert_eq!(identity, None);
        assert_eq!(transport.calls(), 0);
    }
}
