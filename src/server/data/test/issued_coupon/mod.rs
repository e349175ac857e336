use crate::server::{
    data::issued_coupon::IssuedCouponRepository,
    model::coupon::{RecordIssuance, UseCoupon},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_for_coupon;
mod get_by_user;
