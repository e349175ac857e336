use crate::server::{
    data::coupon::CouponRepository,
    model::coupon::{CreateCouponParams, UpdateCouponParams},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update_details;
