use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use bodegix_auth_types::identity::Identity;
use bodegix_domain::id::{LockerId, TenantId, UserId};

use crate::domain::types::{AccessOutcome, ReaderScope};
use crate::error::AccessServiceError;
use crate::state::AppState;
use crate::usecase::scan::ScanInput;

// ── POST /qr/scan ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub code: String,
    /// Locker the reader is mounted on. When present the session must target it.
    #[serde(default, alias = "locker_id")]
    pub locker_id: Option<LockerId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub outcome: &'static str,
    pub locker_id: LockerId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

/// Refusals come back as error bodies with a distinct `kind` each.
pub async fn scan_qr_code(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AccessServiceError> {
    let scope = state
        .scan_usecase()
        .execute(ScanInput {
            code: body.code,
            reader: ReaderScope {
                tenant_id: identity.tenant_id,
                locker_id: body.locker_id,
            },
        })
        .await?;

    Ok(Json(ScanResponse {
        outcome: AccessOutcome::Granted.as_str(),
        locker_id: scope.locker_id,
        tenant_id: scope.tenant_id,
        user_id: scope.user_id,
    }))
}
