use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LockLease::Table)
                    .if_not_exists()
                    .col(string(LockLease::Key).primary_key())
                    .col(string(LockLease::Holder))
                    .col(timestamp_with_time_zone(LockLease::ExpiresAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LockLease::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LockLease {
    Table,
    Key,
    Holder,
    ExpiresAt,
}
