//! Coupon domain models and parameters.
//!
//! Covers coupon definitions with their stock counter, issuance records, and the
//! rules deciding whether a definition can be issued at a given time.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::coupon::{
    CouponDto, CreateCouponDto, IssuedCouponDto, PaginatedCouponsDto, UpdateCouponDto,
    UserCouponDto,
};

/// Why a coupon definition cannot be issued right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceRejection {
    /// Soft deleted by an administrator.
    Disabled,
    /// Validity window has not opened yet.
    NotStarted,
    /// Validity window has closed.
    Expired,
}

impl IssuanceRejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Disabled => "COUPON_DISABLED",
            Self::NotStarted => "COUPON_NOT_STARTED",
            Self::Expired => "COUPON_EXPIRED",
        }
    }
}

impl fmt::Display for IssuanceRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Disabled => "coupon is disabled",
            Self::NotStarted => "coupon is not active yet",
            Self::Expired => "coupon has expired",
        };
        f.write_str(reason)
    }
}

/// Coupon definition together with its stock counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    pub id: i32,
    pub name: String,
    /// Discount amount granted by the coupon.
    pub discount: i32,
    pub total_stock: i32,
    /// Units still available for issuance; `0 <= remaining <= total_stock`.
    pub remaining: i32,
    /// Start of the validity window (inclusive).
    pub starts_at: DateTime<Utc>,
    /// End of the validity window (exclusive).
    pub ends_at: DateTime<Utc>,
    /// Optional owning brand or scope reference.
    pub brand: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set when an administrator deletes the coupon.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Converts an entity model to a coupon domain model at the repository boundary.
    pub fn from_entity(entity: entity::coupon::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            discount: entity.discount,
            total_stock: entity.total_stock,
            remaining: entity.remaining,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            brand: entity.brand,
            created_at: entity.created_at,
            deleted_at: entity.deleted_at,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Checks whether the coupon may be issued at `now`.
    ///
    /// A coupon is issuable when it is not deleted and `starts_at <= now < ends_at`.
    /// Stock is not considered here; it is only checked under the coupon lock.
    ///
    /// # Returns
    /// - `Ok(())` - Coupon is active
    /// - `Err(IssuanceRejection)` - Reason the coupon is not issuable
    pub fn check_issuable(&self, now: DateTime<Utc>) -> Result<(), IssuanceRejection> {
        if self.is_deleted() {
            return Err(IssuanceRejection::Disabled);
        }
        if now < self.starts_at {
            return Err(IssuanceRejection::NotStarted);
        }
        if now >= self.ends_at {
            return Err(IssuanceRejection::Expired);
        }
        Ok(())
    }

    pub fn into_dto(self) -> CouponDto {
        CouponDto {
            id: self.id,
            name: self.name,
            discount: self.discount,
            total_stock: self.total_stock,
            remaining: self.remaining,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            brand: self.brand,
        }
    }
}

/// Snapshot of a coupon's stock counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub total: i32,
    pub remaining: i32,
}

/// Result of trying to take one unit of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// One unit taken; holds the new remaining count.
    Remaining(i32),
    /// Nothing left, counter untouched.
    OutOfStock,
}

/// A coupon granted to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedCoupon {
    pub user_id: i32,
    pub coupon_id: i32,
    pub issued_at: DateTime<Utc>,
    /// Set once the coupon is consumed at checkout.
    pub used_at: Option<DateTime<Utc>>,
}

impl IssuedCoupon {
    pub fn from_entity(entity: entity::issued_coupon::Model) -> Self {
        Self {
            user_id: entity.user_id,
            coupon_id: entity.coupon_id,
            issued_at: entity.issued_at,
            used_at: entity.used_at,
        }
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    pub fn into_dto(self) -> IssuedCouponDto {
        IssuedCouponDto {
            user_id: self.user_id,
            coupon_id: self.coupon_id,
            issued_at: self.issued_at,
            used_at: self.used_at,
        }
    }
}

/// Result of inserting an issuance record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssuance {
    Recorded(IssuedCoupon),
    AlreadyIssued,
}

/// Result of consuming an issued coupon.
#[derive(Debug, Clone, PartialEq)]
pub enum UseCoupon {
    Used(IssuedCoupon),
    AlreadyUsed,
    NotIssued,
}

/// Issued coupon joined with its definition.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCoupon {
    pub coupon: Coupon,
    pub issued_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl UserCoupon {
    pub fn into_dto(self) -> UserCouponDto {
        UserCouponDto {
            coupon: self.coupon.into_dto(),
            issued_at: self.issued_at,
            used_at: self.used_at,
        }
    }
}

/// Parameters for creating a coupon definition.
#[derive(Debug, Clone)]
pub struct CreateCouponParams {
    pub name: String,
    pub discount: i32,
    pub total_stock: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub brand: Option<String>,
}

impl CreateCouponParams {
    pub fn from_dto(dto: CreateCouponDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            discount: dto.discount,
            total_stock: dto.total_stock,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            brand: dto
                .brand
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
        }
    }
}

/// Parameters for an administrative coupon edit.
///
/// Only name, validity window and stock increases are editable.
#[derive(Debug, Clone)]
pub struct UpdateCouponParams {
    pub id: i32,
    pub name: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub add_stock: Option<i32>,
}

impl UpdateCouponParams {
    pub fn from_dto(id: i32, dto: UpdateCouponDto) -> Self {
        Self {
            id,
            name: dto.name.map(|n| n.trim().to_string()),
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            add_stock: dto.add_stock,
        }
    }
}

/// One page of coupon definitions.
#[derive(Debug, Clone)]
pub struct PaginatedCoupons {
    pub coupons: Vec<Coupon>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub total_pages: u64,
}

impl PaginatedCoupons {
    pub fn into_dto(self) -> PaginatedCouponsDto {
        PaginatedCouponsDto {
            coupons: self.coupons.into_iter().map(Coupon::into_dto).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
        }
    }
}
