use chrono::Utc;

use bodegix_domain::qr::QrStatus;

use crate::domain::repository::QrSessionStore;
use crate::domain::types::{ReaderScope, SessionScope};
use crate::error::AccessServiceError;
use crate::usecase::normalize_code;

/// Outcome of a validation together with whatever the lookup revealed about
/// the session, so failed attempts can still be attributed in the access log.
#[derive(Debug)]
pub struct ValidationReport {
    pub code: String,
    /// Scope of the looked-up session; `None` when the code is unknown.
    pub session: Option<SessionScope>,
    pub result: Result<SessionScope, AccessServiceError>,
}

pub struct ValidateQrSessionUseCase<S: QrSessionStore> {
    pub sessions: S,
}

impl<S: QrSessionStore> ValidateQrSessionUseCase<S> {
    pub async fn execute(
        &self,
        code: &str,
        reader: ReaderScope,
    ) -> Result<SessionScope, AccessServiceError> {
        self.validate(code, reader).await.result
    }

    pub async fn validate(&self, code: &str, reader: ReaderScope) -> ValidationReport {
        let code = normalize_code(code);

        let session = match self.sessions.get(&code).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                return ValidationReport {
                    code,
                    session: None,
                    result: Err(AccessServiceError::UnknownCode),
                };
            }
            Err(e) => {
                return ValidationReport {
                    code,
                    session: None,
                    result: Err(e),
                };
            }
        };
        let scope = session.scope();

        // Scope mismatch never mutates the session.
        let result = if !reader.permits(&scope) {
            Err(AccessServiceError::Forbidden)
        } else {
            let now = Utc::now();
            match session.effective_status(now) {
                QrStatus::Used => Err(AccessServiceError::AlreadyUsed),
                QrStatus::Expired => {
                    if session.status == QrStatus::Pending {
                        if let Err(e) = self.sessions.mark_expired(&code, now).await {
                            tracing::warn!(error = %e, "failed to persist qr session expiry");
                        }
                    }
                    Err(AccessServiceError::Expired)
                }
                QrStatus::Pending => self
                    .sessions
                    .mark_used(&code, now)
                    .await
                    .map(|redeemed| redeemed.scope()),
            }
        };

        ValidationReport {
            code,
            session: Some(scope),
            result,
        }
    }
}
