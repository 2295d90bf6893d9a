//! Runtime selection between database-backed and in-process implementations.
//! Each enum dispatches statically to the selected variant.

use chrono::{DateTime, Utc};

use bodegix_domain::id::LockerId;

use crate::domain::repository::{AccessEventLog, LockerDirectory, QrSessionStore};
use crate::domain::types::{AccessEvent, LockerRecord, QrSession};
use crate::error::AccessServiceError;
use crate::infra::db::{DbAccessEventLog, DbLockerDirectory, DbQrSessionStore};
use crate::infra::memory::{InMemoryAccessEventLog, InMemoryLockerDirectory, InMemoryQrSessionStore};

#[derive(Clone)]
pub enum SessionBackend {
    Db(DbQrSessionStore),
    Memory(InMemoryQrSessionStore),
}

impl QrSessionStore for SessionBackend {
    async fn create(&self, session: &QrSession) -> Result<(), AccessServiceError> {
        match self {
            Self::Db(s) => s.create(session).await,
            Self::Memory(s) => s.create(session).await,
        }
    }

    async fn get(&self, code: &str) -> Result<Option<QrSession>, AccessServiceError> {
        match self {
            Self::Db(s) => s.get(code).await,
            Self::Memory(s) => s.get(code).await,
        }
    }

    async fn mark_used(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<QrSession, AccessServiceError> {
        match self {
            Self::Db(s) => s.mark_used(code, now).await,
            Self::Memory(s) => s.mark_used(code, now).await,
        }
    }

    async fn mark_expired(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccessServiceError> {
        match self {
            Self::Db(s) => s.mark_expired(code, now).await,
            Self::Memory(s) => s.mark_expired(code, now).await,
        }
    }

    async fn ping(&self) -> Result<(), AccessServiceError> {
        match self {
            Self::Db(s) => s.ping().await,
            Self::Memory(s) => s.ping().await,
        }
    }
}

#[derive(Clone)]
pub enum LockerBackend {
    Db(DbLockerDirectory),
    Memory(InMemoryLockerDirectory),
}

impl LockerDirectory for LockerBackend {
    async fn find(&self, id: LockerId) -> Result<Option<LockerRecord>, AccessServiceError> {
        match self {
            Self::Db(d) => d.find(id).await,
            Self::Memory(d) => d.find(id).await,
        }
    }
}

#[derive(Clone)]
pub enum EventBackend {
    Db(DbAccessEventLog),
    Memory(InMemoryAccessEventLog),
}

impl AccessEventLog for EventBackend {
    async fn append(&self, event: &AccessEvent) -> Result<(), AccessServiceError> {
        match self {
            Self::Db(l) => l.append(event).await,
            Self::Memory(l) => l.append(event).await,
        }
    }
}
