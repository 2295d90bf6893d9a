use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr, sea_query::Expr,
};

use bodegix_access_schema::{access_events, lockers, qr_sessions};
use bodegix_domain::id::{LockerId, TenantId, UserId};
use bodegix_domain::qr::QrStatus;

use crate::domain::repository::{AccessEventLog, LockerDirectory, QrSessionStore};
use crate::domain::types::{AccessEvent, LockerRecord, QrSession};
use crate::error::AccessServiceError;

// ── QR session store ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbQrSessionStore {
    pub db: DatabaseConnection,
}

impl QrSessionStore for DbQrSessionStore {
    async fn create(&self, session: &QrSession) -> Result<(), AccessServiceError> {
        let result = qr_sessions::ActiveModel {
            code: Set(session.code.clone()),
            locker_id: Set(session.locker_id.0),
            tenant_id: Set(session.tenant_id.0),
            user_id: Set(session.user_id.0),
            status: Set(session.status.as_str().to_owned()),
            ttl_seconds: Set(i32::try_from(session.ttl_seconds).context("ttl out of range")?),
            issued_at: Set(session.issued_at),
            expires_at: Set(session.expires_at),
            used_at: Set(session.used_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccessServiceError::CodeConflict)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create qr session").into()),
        }
    }

    async fn get(&self, code: &str) -> Result<Option<QrSession>, AccessServiceError> {
        let model = qr_sessions::Entity::find_by_id(code.to_owned())
            .one(&self.db)
            .await
            .context("find qr session")?;
        model.map(session_from_model).transpose()
    }

    async fn mark_used(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<QrSession, AccessServiceError> {
        // Single conditional UPDATE: the row lock makes concurrent redemptions
        // of the same code serialize, and only the first still sees `pending`.
        let updated = qr_sessions::Entity::update_many()
            .col_expr(
                qr_sessions::Column::Status,
                Expr::value(QrStatus::Used.as_str()),
            )
            .col_expr(qr_sessions::Column::UsedAt, Expr::value(now))
            .filter(qr_sessions::Column::Code.eq(code))
            .filter(qr_sessions::Column::Status.eq(QrStatus::Pending.as_str()))
            .filter(qr_sessions::Column::ExpiresAt.gt(now))
            .exec_with_returning(&self.db)
            .await
            .context("mark qr session used")?;

        if let Some(model) = updated.into_iter().next() {
            return session_from_model(model);
        }

        // Nothing matched: classify from the current row.
        match self.get(code).await? {
            None => Err(AccessServiceError::UnknownCode),
            Some(session) => match session.effective_status(now) {
                QrStatus::Used => Err(AccessServiceError::AlreadyUsed),
                QrStatus::Pending | QrStatus::Expired => Err(AccessServiceError::Expired),
            },
        }
    }

    async fn mark_expired(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccessServiceError> {
        let result = qr_sessions::Entity::update_many()
            .col_expr(
                qr_sessions::Column::Status,
                Expr::value(QrStatus::Expired.as_str()),
            )
            .filter(qr_sessions::Column::Code.eq(code))
            .filter(qr_sessions::Column::Status.eq(QrStatus::Pending.as_str()))
            .filter(qr_sessions::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("mark qr session expired")?;
        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> Result<(), AccessServiceError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

fn session_from_model(model: qr_sessions::Model) -> Result<QrSession, AccessServiceError> {
    Ok(QrSession {
        status: model
            .status
            .parse()
            .with_context(|| format!("qr session {}", model.code))?,
        ttl_seconds: u32::try_from(model.ttl_seconds).context("negative ttl_seconds")?,
        code: model.code,
        locker_id: LockerId(model.locker_id),
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        issued_at: model.issued_at,
        expires_at: model.expires_at,
        used_at: model.used_at,
    })
}

// ── Locker directory ──────────────────────────────────────────────────────────

const LOCKER_ACTIVE: &str = "activo";

#[derive(Clone)]
pub struct DbLockerDirectory {
    pub db: DatabaseConnection,
}

impl LockerDirectory for DbLockerDirectory {
    async fn find(&self, id: LockerId) -> Result<Option<LockerRecord>, AccessServiceError> {
        let model = lockers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find locker")?;
        Ok(model.map(|m| LockerRecord {
            id: LockerId(m.id),
            tenant_id: TenantId(m.tenant_id),
            user_id: m.user_id.map(UserId),
            active: m.estado == LOCKER_ACTIVE,
        }))
    }
}

// ── Access event log ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessEventLog {
    pub db: DatabaseConnection,
}

impl AccessEventLog for DbAccessEventLog {
    async fn append(&self, event: &AccessEvent) -> Result<(), AccessServiceError> {
        access_events::ActiveModel {
            id: Set(event.id),
            code: Set(event.code.clone()),
            user_id: Set(event.user_id.map(|id| id.0)),
            locker_id: Set(event.locker_id.map(|id| id.0)),
            tenant_id: Set(event.tenant_id.map(|id| id.0)),
            outcome: Set(event.outcome.as_str().to_owned()),
            occurred_at: Set(event.occurred_at),
        }
        .insert(&self.db)
        .await
        .context("append access event")?;
        Ok(())
    }
}
