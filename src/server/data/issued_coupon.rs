use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::server::model::coupon::{
    Coupon, IssuedCoupon, RecordIssuance, UseCoupon, UserCoupon,
};

pub struct IssuedCouponRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> IssuedCouponRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find(&self, user_id: i32, coupon_id: i32) -> Result<Option<IssuedCoupon>, DbErr> {
        let issued = entity::prelude::IssuedCoupon::find_by_id((user_id, coupon_id))
            .one(self.conn)
            .await?;

        Ok(issued.map(IssuedCoupon::from_entity))
    }

    pub async fn has_issued(&self, user_id: i32, coupon_id: i32) -> Result<bool, DbErr> {
        Ok(self.find(user_id, coupon_id).await?.is_some())
    }

    /// Inserts the issuance record for the pair.
    ///
    /// The composite primary key rejects a second record for the same pair, which is
    /// reported as `AlreadyIssued` rather than an error.
    pub async fn record_issuance(
        &self,
        user_id: i32,
        coupon_id: i32,
    ) -> Result<RecordIssuance, DbErr> {
        let issued_at = Utc::now();
        let record = entity::issued_coupon::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            coupon_id: ActiveValue::Set(coupon_id),
            issued_at: ActiveValue::Set(issued_at),
            used_at: ActiveValue::Set(None),
        };

        match entity::prelude::IssuedCoupon::insert(record)
            .exec_without_returning(self.conn)
            .await
        {
            Ok(_) => Ok(RecordIssuance::Recorded(IssuedCoupon {
                user_id,
                coupon_id,
                issued_at,
                used_at: None,
            })),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(RecordIssuance::AlreadyIssued),
                _ => Err(err),
            },
        }
    }

    /// Gets every coupon issued to a user with its definition, oldest first.
    ///
    /// Soft-deleted definitions are included so users still see what they hold.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<UserCoupon>, DbErr> {
        let rows = entity::prelude::IssuedCoupon::find()
            .filter(entity::issued_coupon::Column::UserId.eq(user_id))
            .order_by_asc(entity::issued_coupon::Column::IssuedAt)
            .order_by_asc(entity::issued_coupon::Column::CouponId)
            .find_also_related(entity::prelude::Coupon)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(issued, coupon)| {
                coupon.map(|c| UserCoupon {
                    coupon: Coupon::from_entity(c),
                    issued_at: issued.issued_at,
                    used_at: issued.used_at,
                })
            })
            .collect())
    }

    /// Marks an issued coupon as used.
    ///
    /// The update only matches unused records so a coupon is consumed at most once.
    pub async fn mark_used(&self, user_id: i32, coupon_id: i32) -> Result<UseCoupon, DbErr> {
        let result = entity::prelude::IssuedCoupon::update_many()
            .col_expr(entity::issued_coupon::Column::UsedAt, Expr::value(Utc::now()))
            .filter(entity::issued_coupon::Column::UserId.eq(user_id))
            .filter(entity::issued_coupon::Column::CouponId.eq(coupon_id))
            .filter(entity::issued_coupon::Column::UsedAt.is_null())
            .exec(self.conn)
            .await?;

        let current = self.find(user_id, coupon_id).await?;

        Ok(match (result.rows_affected, current) {
            (1, Some(issued)) => UseCoupon::Used(issued),
            (_, Some(_)) => UseCoupon::AlreadyUsed,
            (_, None) => UseCoupon::NotIssued,
        })
    }

    /// Counts issuance records for a coupon.
    pub async fn count_for_coupon(&self, coupon_id: i32) -> Result<u64, DbErr> {
        entity::prelude::IssuedCoupon::find()
            .filter(entity::issued_coupon::Column::CouponId.eq(coupon_id))
            .count(self.conn)
            .await
    }
}
