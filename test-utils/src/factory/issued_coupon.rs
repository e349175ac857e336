//! Issued coupon factory for creating issuance records.
//!
//! Inserts records directly, without touching the coupon's stock counter.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating issuance records.
pub struct IssuedCouponFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    coupon_id: i32,
    used_at: Option<DateTime<Utc>>,
}

impl<'a> IssuedCouponFactory<'a> {
    /// Creates a new factory for the given user/coupon pair, unused by default.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, coupon_id: i32) -> Self {
        Self {
            db,
            user_id,
            coupon_id,
            used_at: None,
        }
    }

    /// Marks the issued coupon as already consumed.
    pub fn used(mut self) -> Self {
        self.used_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the issuance record.
    ///
    /// # Returns
    /// - `Ok(entity::issued_coupon::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert (including duplicate pair)
    pub async fn build(self) -> Result<entity::issued_coupon::Model, DbErr> {
        entity::issued_coupon::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            coupon_id: ActiveValue::Set(self.coupon_id),
            issued_at: ActiveValue::Set(Utc::now()),
            used_at: ActiveValue::Set(self.used_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unused issuance record for the pair.
pub async fn create_issued_coupon(
    db: &DatabaseConnection,
    user_id: i32,
    coupon_id: i32,
) -> Result<entity::issued_coupon::Model, DbErr> {
    IssuedCouponFactory::new(db, user_id, coupon_id)
        .build()
        .await
}
