use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_user_table::User;
use super::m20250301_000002_create_coupon_table::Coupon;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IssuedCoupon::Table)
                    .if_not_exists()
                    .col(integer(IssuedCoupon::UserId))
                    .col(integer(IssuedCoupon::CouponId))
                    .col(timestamp_with_time_zone(IssuedCoupon::IssuedAt))
                    .col(timestamp_with_time_zone_null(IssuedCoupon::UsedAt))
                    .primary_key(
                        Index::create()
                            .name("pk_issued_coupon")
                            .col(IssuedCoupon::UserId)
                            .col(IssuedCoupon::CouponId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issued_coupon_user_id")
                            .from(IssuedCoupon::Table, IssuedCoupon::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issued_coupon_coupon_id")
                            .from(IssuedCoupon::Table, IssuedCoupon::CouponId)
                            .to(Coupon::Table, Coupon::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issued_coupon_coupon_id")
                    .table(IssuedCoupon::Table)
                    .col(IssuedCoupon::CouponId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IssuedCoupon::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum IssuedCoupon {
    Table,
    UserId,
    CouponId,
    IssuedAt,
    UsedAt,
}
