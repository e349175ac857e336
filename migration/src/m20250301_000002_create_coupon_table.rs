use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupon::Table)
                    .if_not_exists()
                    .col(pk_auto(Coupon::Id))
                    .col(string(Coupon::Name))
                    .col(integer(Coupon::Discount))
                    .col(integer(Coupon::TotalStock))
                    .col(integer(Coupon::Remaining))
                    .col(timestamp_with_time_zone(Coupon::StartsAt))
                    .col(timestamp_with_time_zone(Coupon::EndsAt))
                    .col(string_null(Coupon::Brand))
                    .col(timestamp_with_time_zone(Coupon::CreatedAt))
                    .col(timestamp_with_time_zone_null(Coupon::DeletedAt))
                    .check(
                        Expr::col(Coupon::Remaining)
                            .gte(0)
                            .and(Expr::col(Coupon::Remaining).lte(Expr::col(Coupon::TotalStock))),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Coupon::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Coupon {
    Table,
    Id,
    Name,
    Discount,
    TotalStock,
    Remaining,
    StartsAt,
    EndsAt,
    Brand,
    CreatedAt,
    DeletedAt,
}
