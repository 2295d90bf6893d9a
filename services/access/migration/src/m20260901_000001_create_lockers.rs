use sea_orm_migration::prelude::*;

/// The admin backend owns `lockers`; this only creates it for standalone
/// deployments and leaves an existing table untouched.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lockers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lockers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lockers::Identificador).string_len(50).not_null())
                    .col(ColumnDef::new(Lockers::Ubicacion).string_len(150))
                    .col(
                        ColumnDef::new(Lockers::Estado)
                            .string_len(16)
                            .not_null()
                            .default("activo"),
                    )
                    .col(ColumnDef::new(Lockers::EmpresaId).integer().not_null())
                    .col(ColumnDef::new(Lockers::UsuarioId).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Lockers::Table)
                    .col(Lockers::EmpresaId)
                    .col(Lockers::Identificador)
                    .unique()
                    .name("unq_empresa_identificador")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Never drop master data owned by another component.
        Ok(())
    }
}

#[derive(Iden)]
enum Lockers {
    Table,
    Id,
    Identificador,
    Ubicacion,
    Estado,
    EmpresaId,
    UsuarioId,
}
