//! Coupon factory for creating test coupon definitions.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test coupons with customizable fields.
///
/// The stock counter (`remaining`) starts equal to the total stock unless
/// overridden with `remaining`.
pub struct CouponFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    discount: i32,
    total_stock: i32,
    remaining: Option<i32>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    brand: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> CouponFactory<'a> {
    /// Creates a new CouponFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Coupon {id}"`
    /// - discount: `1000`
    /// - stock: `100`
    /// - validity window: one day ago until seven days from now
    /// - brand: none, not deleted
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            name: format!("Coupon {}", id),
            discount: 1000,
            total_stock: 100,
            remaining: None,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(7),
            brand: None,
            deleted_at: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn discount(mut self, discount: i32) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the total stock; remaining follows it unless set explicitly.
    pub fn stock(mut self, total_stock: i32) -> Self {
        self.total_stock = total_stock;
        self
    }

    pub fn remaining(mut self, remaining: i32) -> Self {
        self.remaining = Some(remaining);
        self
    }

    pub fn window(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Marks the coupon as soft deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the coupon entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::coupon::Model)` - Created coupon entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::coupon::Model, DbErr> {
        entity::coupon::ActiveModel {
            name: ActiveValue::Set(self.name),
            discount: ActiveValue::Set(self.discount),
            total_stock: ActiveValue::Set(self.total_stock),
            remaining: ActiveValue::Set(self.remaining.unwrap_or(self.total_stock)),
            starts_at: ActiveValue::Set(self.starts_at),
            ends_at: ActiveValue::Set(self.ends_at),
            brand: ActiveValue::Set(self.brand),
            created_at: ActiveValue::Set(Utc::now()),
            deleted_at: ActiveValue::Set(self.deleted_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active coupon with default values.
pub async fn create_coupon(db: &DatabaseConnection) -> Result<entity::coupon::Model, DbErr> {
    CouponFactory::new(db).build().await
}
