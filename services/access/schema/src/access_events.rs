use sea_orm::entity::prelude::*;

/// Append-only record of one scan attempt. Identifiers are null when the
/// scanned code was never issued.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub user_id: Option<i32>,
    pub locker_id: Option<i32>,
    pub tenant_id: Option<i32>,
    pub outcome: String,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
