use sea_orm::entity::prelude::*;

/// Locker master data, owned by the admin backend. Read-only here.
/// Column names follow the product schema (`empresa_id` is the tenant).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lockers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub identificador: String,
    pub ubicacion: Option<String>,
    /// "activo" | "inactivo"
    pub estado: String,
    #[sea_orm(column_name = "empresa_id")]
    pub tenant_id: i32,
    #[sea_orm(column_name = "usuario_id")]
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
