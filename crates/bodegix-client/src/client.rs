use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use bodegix_domain::id::{LockerId, TenantId, UserId};
use bodegix_domain::qr::SessionStatus;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with its `{kind, message}` error body.
    #[error("{kind} ({status}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },
}

impl ClientError {
    /// Error kind reported by the service, if it answered at all.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Api { kind, .. } => Some(kind),
            Self::Transport(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    kind: String,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub locker_id: LockerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u32>,
    pub as_url: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedQrSession {
    pub code: String,
    pub payload: String,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanGrant {
    pub outcome: String,
    pub locker_id: LockerId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanBody<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    locker_id: Option<LockerId>,
}

#[derive(Deserialize)]
struct StatusBody {
    status: SessionStatus,
}

/// Access service client authenticated with a bearer token.
#[derive(Clone, Debug)]
pub struct AccessClient {
    client: Client,
    base_url: String,
    token: String,
}

impl AccessClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.bearer_auth(&self.token).send().await?;
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(api_error(response).await)
    }

    /// `POST /qr-sessions`
    pub async fn issue(&self, request: &IssueRequest) -> Result<IssuedQrSession, ClientError> {
        self.send(self.client.post(self.url("/qr-sessions")).json(request))
            .await
    }

    /// `POST /qr/scan`
    pub async fn scan(
        &self,
        code: &str,
        locker_id: Option<LockerId>,
    ) -> Result<ScanGrant, ClientError> {
        self.send(
            self.client
                .post(self.url("/qr/scan"))
                .json(&ScanBody { code, locker_id }),
        )
        .await
    }

    /// `GET /qr-sessions/{code}/status`
    pub async fn status(&self, code: &str) -> Result<SessionStatus, ClientError> {
        let body: StatusBody = self
            .send(
                self.client
                    .get(self.url(&format!("/qr-sessions/{code}/status"))),
            )
            .await?;
        Ok(body.status)
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            kind: body.kind,
            message: body.message,
        },
        Err(_) => ClientError::Api {
            status: status.as_u16(),
            kind: "UNKNOWN".to_owned(),
            message: status.canonical_reason().unwrap_or("error").to_owned(),
        },
    }
}
