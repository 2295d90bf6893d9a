#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use bodegix_domain::id::LockerId;

use crate::domain::types::{AccessEvent, LockerRecord, QrSession};
use crate::error::AccessServiceError;

/// Keyed storage of QR sessions with atomic check-and-set for redemption.
pub trait QrSessionStore: Send + Sync {
    /// Insert a new session. Fails with `CodeConflict` if the code already
    /// exists; an existing session is never overwritten.
    async fn create(&self, session: &QrSession) -> Result<(), AccessServiceError>;

    async fn get(&self, code: &str) -> Result<Option<QrSession>, AccessServiceError>;

    /// Atomically move `pending → used` if the session is pending and `now < expires_at`.
    ///
    /// Of any number of concurrent calls for the same code at most one succeeds.
    /// Returns the redeemed session, or `UnknownCode` / `AlreadyUsed` / `Expired`.
    async fn mark_used(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<QrSession, AccessServiceError>;

    /// Persist the lazily observed `pending → expired` transition.
    /// Returns `true` if this call changed the stored status.
    async fn mark_expired(&self, code: &str, now: DateTime<Utc>)
    -> Result<bool, AccessServiceError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), AccessServiceError>;
}

/// Read access to locker master data.
pub trait LockerDirectory: Send + Sync {
    async fn find(&self, id: LockerId) -> Result<Option<LockerRecord>, AccessServiceError>;
}

/// Append-only log of scan attempts.
pub trait AccessEventLog: Send + Sync {
    async fn append(&self, event: &AccessEvent) -> Result<(), AccessServiceError>;
}

/// Physical unlock signal for a locker.
pub trait UnlockActuator: Send + Sync {
    async fn unlock(&self, locker_id: LockerId) -> Result<(), AccessServiceError>;
}
