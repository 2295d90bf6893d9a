use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AccessEventLog, QrSessionStore, UnlockActuator};
use crate::domain::types::{AccessEvent, AccessOutcome, ReaderScope, SessionScope};
use crate::error::AccessServiceError;
use crate::usecase::validate::ValidateQrSessionUseCase;

pub struct ScanInput {
    pub code: String,
    pub reader: ReaderScope,
}

/// Handles a reader scan: validates the code, triggers the unlock on success
/// and records the attempt whatever the outcome.
pub struct ScanUseCase<S, E, U>
where
    S: QrSessionStore,
    E: AccessEventLog,
    U: UnlockActuator,
{
    pub validator: ValidateQrSessionUseCase<S>,
    pub events: E,
    pub actuator: U,
}

impl<S, E, U> ScanUseCase<S, E, U>
where
    S: QrSessionStore,
    E: AccessEventLog,
    U: UnlockActuator,
{
    pub async fn execute(&self, input: ScanInput) -> Result<SessionScope, AccessServiceError> {
        let report = self.validator.validate(&input.code, input.reader).await;

        // The session stays `used` when the actuator fails; the code is spent.
        let result = match report.result {
            Ok(scope) => match self.actuator.unlock(scope.locker_id).await {
                Ok(()) => Ok(scope),
                Err(e) => {
                    tracing::error!(error = %e, locker_id = %scope.locker_id, "unlock failed");
                    Err(AccessServiceError::UnlockFailed)
                }
            },
            Err(e) => Err(e),
        };

        let outcome = match &result {
            Ok(_) => AccessOutcome::Granted,
            Err(e) => AccessOutcome::from_error(e),
        };
        let event = AccessEvent {
            id: Uuid::now_v7(),
            code: report.code,
            user_id: report.session.map(|s| s.user_id),
            locker_id: report.session.map(|s| s.locker_id).or(input.reader.locker_id),
            tenant_id: report.session.map(|s| s.tenant_id).or(input.reader.tenant_id),
            outcome,
            occurred_at: Utc::now(),
        };
        if let Err(e) = self.events.append(&event).await {
            tracing::error!(error = %e, "failed to record access event");
        }

        match outcome {
            AccessOutcome::Granted => tracing::info!(
                locker_id = ?event.locker_id,
                tenant_id = ?event.tenant_id,
                user_id = ?event.user_id,
                "access granted"
            ),
            _ => tracing::warn!(
                outcome = outcome.as_str(),
                locker_id = ?event.locker_id,
                tenant_id = ?event.tenant_id,
                "access refused"
            ),
        }

        result
    }
}
