use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetcmd_model::{AuthToken, Credentials, SessionId, TargetId, TargetQuery, WireTimeout};

use crate::config::ClientConfig;
use crate::errors::ClientError;

const TOKEN_PATH: &str = "/oauth2/token";
const DEVICE_QUERY_PATH: &str = "/devices/queries/devices/v1";
const SESSION_INIT_PATH: &str = "/real-time-response/combined/batch-init-session/v1";
const COMMAND_PATH: &str = "/real-time-response/combined/batch-admin-command/v1";

/// Unauthenticated handle to the remote API.
///
/// Holds the transport only; [`ApiClient::authenticate`] exchanges
/// credentials for an [`ExecClient`] that can reach the protected endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Build the HTTP transport. No network I/O happens here.
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        let base = cfg.base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|_| ClientError::InvalidBaseUrl(cfg.base_url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .danger_accept_invalid_certs(!cfg.verify_tls)
            .build()?;

        Ok(Self { http, base })
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// The token endpoint answers HTTP 201 on success; any other status is
    /// an authentication failure carrying the raw response body.
    pub async fn authenticate(self, creds: &Credentials) -> Result<ExecClient, ClientError> {
        debug!("requesting access token");

        let response = self
            .http
            .post(format!("{}{}", self.base, TOKEN_PATH))
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() != 201 {
            return Err(ClientError::AuthenticationFailed(body));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("token endpoint: {e}")))?;
        let token = AuthToken::new(token.access_token, token.token_type);

        let mut authorization = HeaderValue::from_str(&token.authorization_value())
            .map_err(|_| ClientError::InvalidResponse("token is not header-safe".to_string()))?;
        authorization.set_sensitive(true);

        debug!(kind = token.kind(), "access token acquired");
        Ok(ExecClient {
            http: self.http,
            base: self.base,
            authorization,
            token,
        })
    }
}

/// Authenticated handle to the remote API.
///
/// The authorization header is captured once at authentication time and
/// never mutated afterwards, so the client can be shared across concurrent
/// per-target runs behind an `Arc`.
pub struct ExecClient {
    http: reqwest::Client,
    base: String,
    authorization: HeaderValue,
    token: AuthToken,
}

impl ExecClient {
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Query the target inventory, returning the raw list of matching IDs.
    ///
    /// Non-200 answers are discovery failures carrying the response body.
    pub async fn discover_targets(&self, query: &TargetQuery) -> Result<Vec<TargetId>, ClientError> {
        let filter = query.filter_expression();
        let limit = query.limit.to_string();
        debug!(%filter, limit = query.limit, "querying target inventory");

        let response = self
            .http
            .get(format!("{}{}", self.base, DEVICE_QUERY_PATH))
            .header(AUTHORIZATION, self.authorization.clone())
            .query(&[("filter", filter.as_str()), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() != 200 {
            return Err(ClientError::DiscoveryFailed {
                status: status.as_u16(),
                body,
            });
        }

        let result: DeviceQueryResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("device query: {e}")))?;

        Ok(result.resources.into_iter().map(TargetId::from).collect())
    }

    /// Initialize a batch session over the given targets.
    ///
    /// Both the numeric timeout and the duration string go out as separate
    /// query parameters; the service configures its init and exec timeouts
    /// independently and does not default one from the other.
    pub async fn init_session(
        &self,
        targets: &[TargetId],
        timeout: &WireTimeout,
    ) -> Result<SessionId, ClientError> {
        let secs = timeout.secs.to_string();
        let response = self
            .http
            .post(format!("{}{}", self.base, SESSION_INIT_PATH))
            .header(AUTHORIZATION, self.authorization.clone())
            .query(&[
                ("timeout", secs.as_str()),
                ("timeout_duration", timeout.duration.as_str()),
            ])
            .json(&SessionInitRequest { host_ids: targets })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() != 201 {
            return Err(ClientError::SessionInitFailed {
                status: status.as_u16(),
                body,
            });
        }

        let result: SessionInitResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("session init: {e}")))?;

        debug!(session = %result.batch_id, "session initialized");
        Ok(SessionId::from(result.batch_id))
    }

    /// Dispatch a command into a session, optionally scoped to a subset of
    /// the session's targets.
    ///
    /// Returns the raw response body for any status that completes
    /// transport; envelope parsing is the codec's concern. Only a failed
    /// HTTP exchange is an error here.
    pub async fn run_command(
        &self,
        session: &SessionId,
        base_command: &str,
        command_string: &str,
        timeout: &WireTimeout,
        targets: &[TargetId],
    ) -> Result<Vec<u8>, ClientError> {
        let request = CommandRequest {
            base_command,
            batch_id: session.as_str(),
            command_string,
            optional_hosts: if targets.is_empty() {
                None
            } else {
                Some(targets)
            },
        };

        let secs = timeout.secs.to_string();
        let response = self
            .http
            .post(format!("{}{}", self.base, COMMAND_PATH))
            .header(AUTHORIZATION, self.authorization.clone())
            .query(&[
                ("timeout", secs.as_str()),
                ("timeout_duration", timeout.duration.as_str()),
            ])
            .json(&request)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

// ============================================================================
// Wire DTOs
// ============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
}

#[derive(Deserialize)]
struct DeviceQueryResponse {
    #[serde(default)]
    resources: Vec<String>,
}

#[derive(Serialize)]
struct SessionInitRequest<'a> {
    host_ids: &'a [TargetId],
}

#[derive(Deserialize)]
struct SessionInitResponse {
    batch_id: String,
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    base_command: &'a str,
    batch_id: &'a str,
    command_string: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_hosts: Option<&'a [TargetId]>,
}
