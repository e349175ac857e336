//! Atomic stock counter operations on the `coupon` table.
//!
//! Every mutation is a single guarded `UPDATE` so the counter can never go negative
//! or exceed the total, even without the coupon lock held.

use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::coupon::{StockDecrement, StockLevel};

pub struct StockLedger<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> StockLedger<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Takes one unit of stock if any is left.
    ///
    /// # Returns
    /// - `Ok(StockDecrement::Remaining(n))` - Unit taken, `n` left
    /// - `Ok(StockDecrement::OutOfStock)` - Counter was zero or the coupon is missing
    /// - `Err(DbErr)` - Database error
    pub async fn try_decrement(&self, coupon_id: i32) -> Result<StockDecrement, DbErr> {
        let result = entity::prelude::Coupon::update_many()
            .col_expr(
                entity::coupon::Column::Remaining,
                Expr::col(entity::coupon::Column::Remaining).sub(1),
            )
            .filter(entity::coupon::Column::Id.eq(coupon_id))
            .filter(entity::coupon::Column::Remaining.gt(0))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(StockDecrement::OutOfStock);
        }

        let level = self.level(coupon_id).await?.ok_or(DbErr::RecordNotFound(format!(
            "Coupon {} disappeared after stock decrement",
            coupon_id
        )))?;

        Ok(StockDecrement::Remaining(level.remaining))
    }

    /// Adds `delta` units to both the total and remaining stock of a live coupon.
    ///
    /// The update is skipped when the new total would exceed `max_total`.
    ///
    /// # Returns
    /// - `Ok(Some(StockLevel))` - New stock level
    /// - `Ok(None)` - Coupon missing, deleted, or the cap would be exceeded
    pub async fn increase_stock(
        &self,
        coupon_id: i32,
        delta: i32,
        max_total: i32,
    ) -> Result<Option<StockLevel>, DbErr> {
        let result = entity::prelude::Coupon::update_many()
            .col_expr(
                entity::coupon::Column::TotalStock,
                Expr::col(entity::coupon::Column::TotalStock).add(delta),
            )
            .col_expr(
                entity::coupon::Column::Remaining,
                Expr::col(entity::coupon::Column::Remaining).add(delta),
            )
            .filter(entity::coupon::Column::Id.eq(coupon_id))
            .filter(entity::coupon::Column::DeletedAt.is_null())
            .filter(
                Expr::col(entity::coupon::Column::TotalStock)
                    .add(delta)
                    .lte(max_total),
            )
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.level(coupon_id).await
    }

    /// Reads the current stock level.
    pub async fn level(&self, coupon_id: i32) -> Result<Option<StockLevel>, DbErr> {
        let coupon = entity::prelude::Coupon::find_by_id(coupon_id)
            .one(self.conn)
            .await?;

        Ok(coupon.map(|c| StockLevel {
            total: c.total_stock,
            remaining: c.remaining,
        }))
    }
}
