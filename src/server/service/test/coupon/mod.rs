use crate::server::{
    error::AppError,
    model::coupon::{CreateCouponParams, UpdateCouponParams},
    service::coupon::{CouponService, MAX_PAGE_SIZE},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod get_paginated;

const MAX_STOCK: i32 = 1_000;

fn create_params(total_stock: i32) -> CreateCouponParams {
    let now = Utc::now();
    CreateCouponParams {
        name: "Summer Sale".to_string(),
        discount: 2000,
        total_stock,
        starts_at: now,
        ends_at: now + Duration::days(14),
        brand: None,
    }
}

fn edit(id: i32) -> UpdateCouponParams {
    UpdateCouponParams {
        id,
        name: None,
        starts_at: None,
        ends_at: None,
        add_stock: None,
    }
}
