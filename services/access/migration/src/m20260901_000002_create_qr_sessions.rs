use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QrSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QrSessions::Code)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QrSessions::LockerId).integer().not_null())
                    .col(ColumnDef::new(QrSessions::TenantId).integer().not_null())
                    .col(ColumnDef::new(QrSessions::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(QrSessions::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(QrSessions::TtlSeconds).integer().not_null())
                    .col(
                        ColumnDef::new(QrSessions::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrSessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QrSessions::UsedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(QrSessions::Table)
                    .col(QrSessions::ExpiresAt)
                    .name("idx_qr_sessions_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QrSessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum QrSessions {
    Table,
    Code,
    LockerId,
    TenantId,
    UserId,
    Status,
    TtlSeconds,
    IssuedAt,
    ExpiresAt,
    UsedAt,
}
