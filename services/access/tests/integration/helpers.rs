use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use bodegix_access::domain::repository::{AccessEventLog, QrSessionStore, UnlockActuator};
use bodegix_access::domain::types::{AccessEvent, LockerRecord, QrSession, ReaderScope};
use bodegix_access::error::AccessServiceError;
use bodegix_access::infra::memory::InMemoryQrSessionStore;
use bodegix_domain::id::{LockerId, TenantId, UserId};
use bodegix_domain::qr::QrStatus;

pub use bodegix_testing::auth::{MockAuth, TEST_JWT_SECRET};

pub const TENANT: TenantId = TenantId(3);
pub const OTHER_TENANT: TenantId = TenantId(9);
pub const LOCKER: LockerId = LockerId(7);
pub const OWNER: UserId = UserId(42);

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn assigned_locker() -> LockerRecord {
    LockerRecord {
        id: LOCKER,
        tenant_id: TENANT,
        user_id: Some(OWNER),
        active: true,
    }
}

pub fn pending_session(code: &str, ttl_seconds: u32) -> QrSession {
    session_issued_at(code, Utc::now(), ttl_seconds)
}

pub fn session_issued_at(code: &str, issued_at: DateTime<Utc>, ttl_seconds: u32) -> QrSession {
    QrSession {
        code: code.to_owned(),
        locker_id: LOCKER,
        tenant_id: TENANT,
        user_id: OWNER,
        status: QrStatus::Pending,
        ttl_seconds,
        issued_at,
        expires_at: issued_at + Duration::seconds(i64::from(ttl_seconds)),
        used_at: None,
    }
}

/// Pending in storage, but its deadline has already passed.
pub fn lapsed_session(code: &str) -> QrSession {
    session_issued_at(code, Utc::now() - Duration::seconds(60), 15)
}

pub fn reader(tenant_id: TenantId) -> ReaderScope {
    ReaderScope {
        tenant_id: Some(tenant_id),
        locker_id: None,
    }
}

pub async fn store_with(sessions: &[QrSession]) -> InMemoryQrSessionStore {
    let store = InMemoryQrSessionStore::default();
    for session in sessions {
        store.create(session).await.unwrap();
    }
    store
}

// ── CollidingStore ───────────────────────────────────────────────────────────

/// Reports `CodeConflict` for the first `collisions` inserts.
pub struct CollidingStore {
    pub inner: InMemoryQrSessionStore,
    remaining: AtomicU32,
    pub attempts: Arc<AtomicU32>,
}

impl CollidingStore {
    pub fn new(collisions: u32) -> Self {
        Self {
            inner: InMemoryQrSessionStore::default(),
            remaining: AtomicU32::new(collisions),
            attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl QrSessionStore for CollidingStore {
    async fn create(&self, session: &QrSession) -> Result<(), AccessServiceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let collided = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if collided {
            return Err(AccessServiceError::CodeConflict);
        }
        self.inner.create(session).await
    }

    async fn get(&self, code: &str) -> Result<Option<QrSession>, AccessServiceError> {
        self.inner.get(code).await
    }

    async fn mark_used(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<QrSession, AccessServiceError> {
        self.inner.mark_used(code, now).await
    }

    async fn mark_expired(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccessServiceError> {
        self.inner.mark_expired(code, now).await
    }

    async fn ping(&self) -> Result<(), AccessServiceError> {
        Ok(())
    }
}

// ── Actuators ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingActuator {
    pub unlocked: Arc<Mutex<Vec<LockerId>>>,
}

impl RecordingActuator {
    pub fn unlocked(&self) -> Vec<LockerId> {
        self.unlocked.lock().unwrap().clone()
    }
}

impl UnlockActuator for RecordingActuator {
    async fn unlock(&self, locker_id: LockerId) -> Result<(), AccessServiceError> {
        self.unlocked.lock().unwrap().push(locker_id);
        Ok(())
    }
}

pub struct FailingActuator;

impl UnlockActuator for FailingActuator {
    async fn unlock(&self, _locker_id: LockerId) -> Result<(), AccessServiceError> {
        Err(anyhow::anyhow!("controller unreachable").into())
    }
}

// ── FailingEventLog ──────────────────────────────────────────────────────────

pub struct FailingEventLog;

impl AccessEventLog for FailingEventLog {
    async fn append(&self, _event: &AccessEvent) -> Result<(), AccessServiceError> {
        Err(anyhow::anyhow!("event table unavailable").into())
    }
}
