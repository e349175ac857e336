use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CouponDto {
    pub id: i32,
    pub name: String,
    pub discount: i32,
    pub total_stock: i32,
    pub remaining: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCouponDto {
    pub name: String,
    pub discount: i32,
    pub total_stock: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Partial administrative edit of a coupon definition.
///
/// Absent fields are left unchanged. `add_stock` increases both the total
/// stock and the remaining counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCouponDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub add_stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedCouponsDto {
    pub coupons: Vec<CouponDto>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IssuedCouponDto {
    pub user_id: i32,
    pub coupon_id: i32,
    pub issued_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

/// An issued coupon together with its definition, for the user's wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCouponDto {
    pub coupon: CouponDto,
    pub issued_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}
