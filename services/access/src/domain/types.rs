use chrono::{DateTime, Utc};
use uuid::Uuid;

use bodegix_domain::id::{LockerId, TenantId, UserId};
use bodegix_domain::qr::QrStatus;

use crate::error::AccessServiceError;

/// One issued, time-bound, single-use access code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSession {
    pub code: String,
    pub locker_id: LockerId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub status: QrStatus,
    /// Lifetime configured at issuance; later config changes do not affect it.
    pub ttl_seconds: u32,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl QrSession {
    /// Status as every reader must see it at `now`.
    ///
    /// A pending session past `expires_at` is expired even if nothing wrote
    /// that yet. `used` always wins over time-based expiry.
    pub fn effective_status(&self, now: DateTime<Utc>) -> QrStatus {
        match self.status {
            QrStatus::Pending if now >= self.expires_at => QrStatus::Expired,
            status => status,
        }
    }

    pub fn scope(&self) -> SessionScope {
        SessionScope {
            locker_id: self.locker_id,
            tenant_id: self.tenant_id,
            user_id: self.user_id,
        }
    }
}

/// Identifiers a session is bound to. Returned on successful validation so
/// the caller can authorize the physical unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionScope {
    pub locker_id: LockerId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

/// Context of the reader that scanned a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderScope {
    pub tenant_id: Option<TenantId>,
    /// Set when the reader is mounted at a specific locker.
    pub locker_id: Option<LockerId>,
}

impl ReaderScope {
    pub fn permits(&self, session: &SessionScope) -> bool {
        self.tenant_id == Some(session.tenant_id)
            && self.locker_id.is_none_or(|id| id == session.locker_id)
    }
}

/// Locker master data needed to authorize issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockerRecord {
    pub id: LockerId,
    pub tenant_id: TenantId,
    /// User the locker is assigned to, if any.
    pub user_id: Option<UserId>,
    pub active: bool,
}

/// Result of one scan attempt as recorded in the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    UnknownCode,
    AlreadyUsed,
    Expired,
    Forbidden,
    UnlockFailed,
    Error,
}

impl AccessOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::UnknownCode => "unknown_code",
            Self::AlreadyUsed => "already_used",
            Self::Expired => "expired",
            Self::Forbidden => "forbidden",
            Self::UnlockFailed => "unlock_failed",
            Self::Error => "error",
        }
    }

    pub fn from_error(err: &AccessServiceError) -> Self {
        match err {
            AccessServiceError::UnknownCode => Self::UnknownCode,
            AccessServiceError::AlreadyUsed => Self::AlreadyUsed,
            AccessServiceError::Expired => Self::Expired,
            AccessServiceError::Forbidden => Self::Forbidden,
            AccessServiceError::UnlockFailed => Self::UnlockFailed,
            _ => Self::Error,
        }
    }
}

/// Immutable record of a scan attempt. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub id: Uuid,
    pub code: String,
    pub user_id: Option<UserId>,
    pub locker_id: Option<LockerId>,
    pub tenant_id: Option<TenantId>,
    pub outcome: AccessOutcome,
    pub occurred_at: DateTime<Utc>,
}

/// Issuance limits.
#[derive(Debug, Clone)]
pub struct QrPolicy {
    pub default_ttl_secs: u32,
    pub max_ttl_secs: u32,
    /// Generation attempts before giving up on code collisions.
    pub code_attempts: u32,
    /// Base for URL payloads (`{base}/open?c=<code>`).
    pub public_base_url: String,
}

impl Default for QrPolicy {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_QR_TTL_SECS,
            max_ttl_secs: MAX_QR_TTL_SECS,
            code_attempts: DEFAULT_CODE_ATTEMPTS,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_owned(),
        }
    }
}

/// Default session lifetime in seconds.
pub const DEFAULT_QR_TTL_SECS: u32 = 15;

/// Upper bound for a requested lifetime.
pub const MAX_QR_TTL_SECS: u32 = 300;

/// Random bytes per code (128 bits), hex-encoded to twice as many characters.
pub const QR_CODE_BYTES: usize = 16;

pub const DEFAULT_CODE_ATTEMPTS: u32 = 5;

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://bodegix.app";
