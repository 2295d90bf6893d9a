use sea_orm::entity::prelude::*;

/// Single-use QR access code bound to a locker, tenant and user.
/// `status` is "pending" | "used" | "expired"; expiry is also derived from `expires_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub locker_id: i32,
    pub tenant_id: i32,
    pub user_id: i32,
    pub status: String,
    pub ttl_seconds: i32,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
