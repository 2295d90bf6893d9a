use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bodegix_auth_types::identity::Identity;
use bodegix_core::serde::to_rfc3339_ms;
use bodegix_domain::id::{LockerId, TenantId};
use bodegix_domain::qr::SessionStatus;

use crate::error::AccessServiceError;
use crate::state::AppState;
use crate::usecase::issue::IssueQrSessionInput;

// ── POST /qr-sessions ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrSessionRequest {
    #[serde(alias = "locker_id")]
    pub locker_id: LockerId,
    /// Optional; must match the caller's tenant when present.
    #[serde(default, alias = "tenant_id", alias = "empresaId", alias = "empresa_id")]
    pub tenant_id: Option<TenantId>,
    #[serde(default, alias = "ttl_seconds")]
    pub ttl_seconds: Option<u32>,
    #[serde(default, alias = "as_url")]
    pub as_url: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrSessionResponse {
    pub code: String,
    pub payload: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u32,
}

pub async fn create_qr_session(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateQrSessionRequest>,
) -> Result<impl IntoResponse, AccessServiceError> {
    let out = state
        .issue_usecase()
        .execute(IssueQrSessionInput {
            user_id: identity.user_id,
            caller_tenant: identity.tenant_id,
            locker_id: body.locker_id,
            requested_tenant: body.tenant_id,
            ttl_seconds: body.ttl_seconds,
            as_url: body.as_url,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQrSessionResponse {
            code: out.code,
            payload: out.payload,
            expires_at: out.expires_at,
            ttl_seconds: out.ttl_seconds,
        }),
    ))
}

// ── GET /qr-sessions/{code}/status ────────────────────────────────────────────

#[derive(Serialize)]
pub struct QrSessionStatusResponse {
    pub status: SessionStatus,
}

pub async fn get_qr_session_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<QrSessionStatusResponse>, AccessServiceError> {
    let status = state
        .status_usecase()
        .execute(&code, identity.tenant_id)
        .await?;
    Ok(Json(QrSessionStatusResponse { status }))
}
