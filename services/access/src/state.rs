use axum::extract::FromRef;

use bodegix_auth_types::identity::JwtSecret;

use crate::domain::types::QrPolicy;
use crate::infra::actuator::Actuator;
use crate::infra::backend::{EventBackend, LockerBackend, SessionBackend};
use crate::usecase::issue::IssueQrSessionUseCase;
use crate::usecase::scan::ScanUseCase;
use crate::usecase::status::QrSessionStatusUseCase;
use crate::usecase::validate::ValidateQrSessionUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionBackend,
    pub lockers: LockerBackend,
    pub events: EventBackend,
    pub actuator: Actuator,
    pub jwt_secret: JwtSecret,
    pub policy: QrPolicy,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn issue_usecase(&self) -> IssueQrSessionUseCase<LockerBackend, SessionBackend> {
        IssueQrSessionUseCase {
            lockers: self.lockers.clone(),
            sessions: self.sessions.clone(),
            policy: self.policy.clone(),
        }
    }

    pub fn scan_usecase(&self) -> ScanUseCase<SessionBackend, EventBackend, Actuator> {
        ScanUseCase {
            validator: ValidateQrSessionUseCase {
                sessions: self.sessions.clone(),
            },
            events: self.events.clone(),
            actuator: self.actuator.clone(),
        }
    }

    pub fn status_usecase(&self) -> QrSessionStatusUseCase<SessionBackend> {
        QrSessionStatusUseCase {
            sessions: self.sessions.clone(),
        }
    }
}
