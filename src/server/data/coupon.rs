use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::coupon::{Coupon, CreateCouponParams, UpdateCouponParams};

pub struct CouponRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CouponRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a coupon definition with its stock counter set to the full stock.
    pub async fn create(&self, params: CreateCouponParams) -> Result<Coupon, DbErr> {
        let coupon = entity::coupon::ActiveModel {
            name: ActiveValue::Set(params.name),
            discount: ActiveValue::Set(params.discount),
            total_stock: ActiveValue::Set(params.total_stock),
            remaining: ActiveValue::Set(params.total_stock),
            starts_at: ActiveValue::Set(params.starts_at),
            ends_at: ActiveValue::Set(params.ends_at),
            brand: ActiveValue::Set(params.brand),
            created_at: ActiveValue::Set(Utc::now()),
            deleted_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Coupon::from_entity(coupon))
    }

    /// Gets a coupon by ID, including soft-deleted ones.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Coupon>, DbErr> {
        let coupon = entity::prelude::Coupon::find_by_id(id).one(self.db).await?;

        Ok(coupon.map(Coupon::from_entity))
    }

    /// Gets a coupon by ID unless it has been soft deleted.
    pub async fn find_active_by_id(&self, id: i32) -> Result<Option<Coupon>, DbErr> {
        let coupon = entity::prelude::Coupon::find_by_id(id)
            .filter(entity::coupon::Column::DeletedAt.is_null())
            .one(self.db)
            .await?;

        Ok(coupon.map(Coupon::from_entity))
    }

    /// Gets a page of non-deleted coupons ordered by ID.
    ///
    /// # Arguments
    /// - `page` - Zero-based page index
    /// - `per_page` - Page size, must be greater than zero
    ///
    /// # Returns
    /// - `Ok((coupons, total))` - Coupons on the page and total non-deleted count
    pub async fn get_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Coupon>, u64), DbErr> {
        let paginator = entity::prelude::Coupon::find()
            .filter(entity::coupon::Column::DeletedAt.is_null())
            .order_by_asc(entity::coupon::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let coupons = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Coupon::from_entity)
            .collect();

        Ok((coupons, total))
    }

    /// Updates the editable details (name and validity window) of a live coupon.
    ///
    /// Stock is changed only through the stock ledger.
    ///
    /// # Returns
    /// - `Ok(Some(Coupon))` - Updated coupon
    /// - `Ok(None)` - Coupon missing or soft deleted
    pub async fn update_details(&self, params: &UpdateCouponParams) -> Result<Option<Coupon>, DbErr> {
        let Some(coupon) = entity::prelude::Coupon::find_by_id(params.id)
            .filter(entity::coupon::Column::DeletedAt.is_null())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if params.name.is_none() && params.starts_at.is_none() && params.ends_at.is_none() {
            return Ok(Some(Coupon::from_entity(coupon)));
        }

        let mut active_model = coupon.into_active_model();
        if let Some(name) = &params.name {
            active_model.name = ActiveValue::Set(name.clone());
        }
        if let Some(starts_at) = params.starts_at {
            active_model.starts_at = ActiveValue::Set(starts_at);
        }
        if let Some(ends_at) = params.ends_at {
            active_model.ends_at = ActiveValue::Set(ends_at);
        }

        let updated = active_model.update(self.db).await?;

        Ok(Some(Coupon::from_entity(updated)))
    }

    /// Soft deletes a coupon. Issued coupons are kept.
    ///
    /// # Returns
    /// - `Ok(true)` - Coupon was live and is now deleted
    /// - `Ok(false)` - Coupon missing or already deleted
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Coupon::update_many()
            .col_expr(entity::coupon::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::coupon::Column::Id.eq(id))
            .filter(entity::coupon::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
