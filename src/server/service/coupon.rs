use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::server::{
    data::{coupon::CouponRepository, stock_ledger::StockLedger},
    error::AppError,
    model::coupon::{Coupon, CreateCouponParams, PaginatedCoupons, UpdateCouponParams},
};

/// Largest page size a listing may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Administrative management and browsing of coupon definitions.
pub struct CouponService<'a> {
    db: &'a DatabaseConnection,
    /// Upper bound for a coupon's total stock.
    max_stock: i32,
}

impl<'a> CouponService<'a> {
    pub fn new(db: &'a DatabaseConnection, max_stock: i32) -> Self {
        Self { db, max_stock }
    }

    /// Creates a coupon definition after validating its fields.
    ///
    /// # Returns
    /// - `Ok(Coupon)` - Created coupon with full stock
    /// - `Err(AppError::BadRequest)` - Blank name, non-positive discount, stock out of
    ///   range, or an empty validity window
    pub async fn create(&self, params: CreateCouponParams) -> Result<Coupon, AppError> {
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Coupon name must not be blank".to_string()));
        }
        if params.discount <= 0 {
            return Err(AppError::BadRequest("Discount must be positive".to_string()));
        }
        if params.total_stock <= 0 || params.total_stock > self.max_stock {
            return Err(AppError::BadRequest(format!(
                "Stock must be between 1 and {}",
                self.max_stock
            )));
        }
        if params.starts_at >= params.ends_at {
            return Err(AppError::BadRequest(
                "Coupon must start before it ends".to_string(),
            ));
        }

        let coupon = CouponRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Created coupon {} '{}' with stock {}",
            coupon.id,
            coupon.name,
            coupon.total_stock
        );

        Ok(coupon)
    }

    /// Gets a page of live coupons ordered by ID.
    ///
    /// # Returns
    /// - `Ok(PaginatedCoupons)` - Requested page, empty past the last page
    /// - `Err(AppError::BadRequest)` - Page size outside `1..=MAX_PAGE_SIZE`, or a page
    ///   whose row offset cannot be represented
    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<PaginatedCoupons, AppError> {
        if per_page == 0 || per_page > MAX_PAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if page
            .checked_mul(per_page)
            .is_none_or(|offset| offset > i64::MAX as u64)
        {
            return Err(AppError::BadRequest(format!("Page {} is out of range", page)));
        }

        let (coupons, total) = CouponRepository::new(self.db)
            .get_paginated(page, per_page)
            .await?;

        let total_pages = total.div_ceil(per_page);

        Ok(PaginatedCoupons {
            coupons,
            total,
            page,
            size: per_page,
            total_pages,
        })
    }

    /// Applies an administrative edit.
    ///
    /// Stock can only grow; the increase is applied through the stock ledger so it
    /// stays atomic with concurrent issuance. The stock increase and the detail
    /// changes commit together or not at all.
    ///
    /// # Returns
    /// - `Ok(Some(Coupon))` - Updated coupon
    /// - `Ok(None)` - Coupon missing or soft deleted
    /// - `Err(AppError::BadRequest)` - Invalid edit
    pub async fn update(&self, params: UpdateCouponParams) -> Result<Option<Coupon>, AppError> {
        if params.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Coupon name must not be blank".to_string()));
        }
        if params.add_stock.is_some_and(|delta| delta <= 0) {
            return Err(AppError::BadRequest(
                "Stock can only be increased by a positive amount".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        match self.apply_update(&txn, &params).await {
            Ok(updated) => {
                txn.commit().await?;
                Ok(updated)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(
                        "Failed to roll back edit of coupon {}: {}",
                        params.id,
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    async fn apply_update(
        &self,
        txn: &DatabaseTransaction,
        params: &UpdateCouponParams,
    ) -> Result<Option<Coupon>, AppError> {
        let repo = CouponRepository::new(txn);

        let Some(current) = repo.find_active_by_id(params.id).await? else {
            return Ok(None);
        };

        let starts_at = params.starts_at.unwrap_or(current.starts_at);
        let ends_at = params.ends_at.unwrap_or(current.ends_at);
        if starts_at >= ends_at {
            return Err(AppError::BadRequest(
                "Coupon must start before it ends".to_string(),
            ));
        }

        if let Some(delta) = params.add_stock {
            let Some(level) = StockLedger::new(txn)
                .increase_stock(params.id, delta, self.max_stock)
                .await?
            else {
                return Err(AppError::BadRequest(format!(
                    "Total stock cannot exceed {}",
                    self.max_stock
                )));
            };

            tracing::info!(
                "Increased stock of coupon {} by {} to {} ({} remaining)",
                params.id,
                delta,
                level.total,
                level.remaining
            );
        }

        Ok(repo.update_details(params).await?)
    }

    /// Soft deletes a coupon.
    ///
    /// # Returns
    /// - `Ok(true)` - Coupon deleted
    /// - `Ok(false)` - Coupon missing or already deleted
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let deleted = CouponRepository::new(self.db).soft_delete(id).await?;

        if deleted {
            tracing::info!("Deleted coupon {}", id);
        }

        Ok(deleted)
    }
}
