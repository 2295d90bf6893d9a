//! In-process implementations. Used for single-node deployments
//! (`QR_SESSION_STORE=memory`) and by tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use bodegix_domain::id::LockerId;
use bodegix_domain::qr::QrStatus;

use crate::domain::repository::{AccessEventLog, LockerDirectory, QrSessionStore};
use crate::domain::types::{AccessEvent, LockerRecord, QrSession};
use crate::error::AccessServiceError;

// ── QR session store ──────────────────────────────────────────────────────────

/// Check-and-set happens under one mutex; no await points while it is held.
#[derive(Clone, Default)]
pub struct InMemoryQrSessionStore {
    sessions: Arc<Mutex<HashMap<String, QrSession>>>,
}

impl InMemoryQrSessionStore {
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QrSessionStore for InMemoryQrSessionStore {
    async fn create(&self, session: &QrSession) -> Result<(), AccessServiceError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.entry(session.code.clone()) {
            Entry::Occupied(_) => Err(AccessServiceError::CodeConflict),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<QrSession>, AccessServiceError> {
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(sessions.get(code).cloned())
    }

    async fn mark_used(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<QrSession, AccessServiceError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get_mut(code)
            .ok_or(AccessServiceError::UnknownCode)?;
        match session.effective_status(now) {
            QrStatus::Used => Err(AccessServiceError::AlreadyUsed),
            QrStatus::Expired => {
                session.status = QrStatus::Expired;
                Err(AccessServiceError::Expired)
            }
            QrStatus::Pending => {
                session.status = QrStatus::Used;
                session.used_at = Some(now);
                Ok(session.clone())
            }
        }
    }

    async fn mark_expired(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccessServiceError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.get_mut(code) {
            Some(session) if session.status == QrStatus::Pending && now >= session.expires_at => {
                session.status = QrStatus::Expired;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AccessServiceError> {
        Ok(())
    }
}

// ── Locker directory ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryLockerDirectory {
    lockers: Arc<HashMap<LockerId, LockerRecord>>,
}

impl InMemoryLockerDirectory {
    pub fn new(lockers: impl IntoIterator<Item = LockerRecord>) -> Self {
        Self {
            lockers: Arc::new(lockers.into_iter().map(|l| (l.id, l)).collect()),
        }
    }
}

impl LockerDirectory for InMemoryLockerDirectory {
    async fn find(&self, id: LockerId) -> Result<Option<LockerRecord>, AccessServiceError> {
        Ok(self.lockers.get(&id).cloned())
    }
}

// ── Access event log ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryAccessEventLog {
    events: Arc<Mutex<Vec<AccessEvent>>>,
}

impl InMemoryAccessEventLog {
    /// Snapshot of recorded events in append order.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AccessEventLog for InMemoryAccessEventLog {
    async fn append(&self, event: &AccessEvent) -> Result<(), AccessServiceError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
