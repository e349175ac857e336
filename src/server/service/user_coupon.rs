use sea_orm::DatabaseConnection;

use crate::server::{
    data::issued_coupon::IssuedCouponRepository,
    error::AppError,
    model::coupon::{IssuedCoupon, UseCoupon, UserCoupon},
};

/// A user's coupon wallet: listing and consuming issued coupons.
pub struct UserCouponService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserCouponService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every coupon issued to the user, with its definition.
    pub async fn list(&self, user_id: i32) -> Result<Vec<UserCoupon>, AppError> {
        Ok(IssuedCouponRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// Consumes an issued coupon at checkout.
    ///
    /// # Returns
    /// - `Ok(IssuedCoupon)` - Coupon consumed
    /// - `Err(AppError::Conflict)` - Already used (`ALREADY_USED`)
    /// - `Err(AppError::NotFound)` - Coupon was never issued to the user
    pub async fn use_coupon(&self, user_id: i32, coupon_id: i32) -> Result<IssuedCoupon, AppError> {
        match IssuedCouponRepository::new(self.db)
            .mark_used(user_id, coupon_id)
            .await?
        {
            UseCoupon::Used(issued) => {
                tracing::info!("User {} used coupon {}", user_id, coupon_id);
                Ok(issued)
            }
            UseCoupon::AlreadyUsed => Err(AppError::Conflict {
                message: "Coupon has already been used".to_string(),
                code: "ALREADY_USED",
            }),
            UseCoupon::NotIssued => Err(AppError::NotFound(format!(
                "Coupon {} was not issued to you",
                coupon_id
            ))),
        }
    }
}
