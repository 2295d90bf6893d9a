use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessEvents::Code).string_len(64).not_null())
                    .col(ColumnDef::new(AccessEvents::UserId).integer())
                    .col(ColumnDef::new(AccessEvents::LockerId).integer())
                    .col(ColumnDef::new(AccessEvents::TenantId).integer())
                    .col(ColumnDef::new(AccessEvents::Outcome).string_len(32).not_null())
                    .col(
                        ColumnDef::new(AccessEvents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AccessEvents::Table)
                    .col(AccessEvents::TenantId)
                    .col(AccessEvents::OccurredAt)
                    .name("idx_access_events_tenant_id_occurred_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccessEvents {
    Table,
    Id,
    Code,
    UserId,
    LockerId,
    TenantId,
    Outcome,
    OccurredAt,
}
