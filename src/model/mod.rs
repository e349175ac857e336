//! Serializable DTOs exchanged over the HTTP API.

pub mod api;
pub mod coupon;
pub mod user;
