use chrono::Utc;

use bodegix_domain::id::TenantId;
use bodegix_domain::qr::SessionStatus;

use crate::domain::repository::QrSessionStore;
use crate::error::AccessServiceError;
use crate::usecase::normalize_code;

/// Read-only status lookup for client polling. Applies the same lazy expiry
/// rule as validation but never writes.
pub struct QrSessionStatusUseCase<S: QrSessionStore> {
    pub sessions: S,
}

impl<S: QrSessionStore> QrSessionStatusUseCase<S> {
    pub async fn execute(
        &self,
        code: &str,
        caller_tenant: Option<TenantId>,
    ) -> Result<SessionStatus, AccessServiceError> {
        let code = normalize_code(code);
        let status = match self.sessions.get(&code).await? {
            // Sessions of other tenants are reported as unknown rather than forbidden.
            Some(session) if caller_tenant == Some(session.tenant_id) => {
                session.effective_status(Utc::now()).into()
            }
            _ => SessionStatus::Unknown,
        };
        Ok(status)
    }
}
