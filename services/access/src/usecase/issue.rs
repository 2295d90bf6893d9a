use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

use bodegix_domain::id::{LockerId, TenantId, UserId};
use bodegix_domain::qr::QrStatus;

use crate::domain::repository::{LockerDirectory, QrSessionStore};
use crate::domain::types::{QR_CODE_BYTES, QrPolicy, QrSession};
use crate::error::AccessServiceError;

/// Lower-case hex alphabet; two characters per random byte.
const CHARSET: &[u8] = b"0123456789abcdef";

/// 128-bit code from the thread-local CSPRNG.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..QR_CODE_BYTES * 2)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// String to render in the QR image. Both forms are accepted by the reader's
/// code extractor.
pub fn render_payload(code: &str, as_url: bool, public_base_url: &str) -> String {
    if as_url {
        format!("{}/open?c={}", public_base_url.trim_end_matches('/'), code)
    } else {
        code.to_owned()
    }
}

pub struct IssueQrSessionInput {
    pub user_id: UserId,
    /// Tenant of the verified caller.
    pub caller_tenant: Option<TenantId>,
    pub locker_id: LockerId,
    /// Tenant named in the request body, if any. Must match the caller's.
    pub requested_tenant: Option<TenantId>,
    pub ttl_seconds: Option<u32>,
    pub as_url: bool,
}

#[derive(Debug, Clone)]
pub struct IssuedQrSession {
    pub code: String,
    pub payload: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u32,
}

pub struct IssueQrSessionUseCase<L, S>
where
    L: LockerDirectory,
    S: QrSessionStore,
{
    pub lockers: L,
    pub sessions: S,
    pub policy: QrPolicy,
}

impl<L, S> IssueQrSessionUseCase<L, S>
where
    L: LockerDirectory,
    S: QrSessionStore,
{
    pub async fn execute(
        &self,
        input: IssueQrSessionInput,
    ) -> Result<IssuedQrSession, AccessServiceError> {
        // 1. Tenant scoping: the verified caller's tenant is authoritative
        let tenant_id = input.caller_tenant.ok_or(AccessServiceError::Forbidden)?;
        if input.requested_tenant.is_some_and(|t| t != tenant_id) {
            return Err(AccessServiceError::Forbidden);
        }

        // 2. TTL bounds
        let ttl_seconds = input.ttl_seconds.unwrap_or(self.policy.default_ttl_secs);
        if ttl_seconds == 0 || ttl_seconds > self.policy.max_ttl_secs {
            return Err(AccessServiceError::InvalidTtl {
                max: self.policy.max_ttl_secs,
            });
        }

        // 3. Locker must be active and belong to the tenant → 404 otherwise
        let locker = self
            .lockers
            .find(input.locker_id)
            .await?
            .filter(|l| l.tenant_id == tenant_id && l.active)
            .ok_or(AccessServiceError::LockerNotFound)?;
        if locker.user_id.is_some_and(|owner| owner != input.user_id) {
            return Err(AccessServiceError::Forbidden);
        }

        // 4. Persist a fresh pending session, regenerating on collision
        for attempt in 1..=self.policy.code_attempts {
            let now = Utc::now();
            let session = QrSession {
                code: generate_code(),
                locker_id: locker.id,
                tenant_id,
                user_id: input.user_id,
                status: QrStatus::Pending,
                ttl_seconds,
                issued_at: now,
                expires_at: now + Duration::seconds(i64::from(ttl_seconds)),
                used_at: None,
            };

            match self.sessions.create(&session).await {
                Ok(()) => {
                    tracing::info!(
                        locker_id = %session.locker_id,
                        tenant_id = %session.tenant_id,
                        user_id = %session.user_id,
                        ttl_seconds,
                        "qr session issued"
                    );
                    return Ok(IssuedQrSession {
                        payload: render_payload(
                            &session.code,
                            input.as_url,
                            &self.policy.public_base_url,
                        ),
                        code: session.code,
                        issued_at: session.issued_at,
                        expires_at: session.expires_at,
                        ttl_seconds,
                    });
                }
                Err(AccessServiceError::CodeConflict) => {
                    tracing::warn!(attempt, "qr code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AccessServiceError::CodeGenerationExhausted)
    }
}
