//! HTTP request handlers.
//!
//! Controllers check access through `AuthGuard`, convert DTOs to parameters, call
//! a service and convert the resulting domain model back to a DTO.

pub mod coupon;
pub mod user;
