use crate::server::data::lock_lease::LockLeaseRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod try_insert;
