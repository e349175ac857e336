//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Operation parameters carry
//! validated input from controllers into services.

pub mod coupon;
pub mod user;
