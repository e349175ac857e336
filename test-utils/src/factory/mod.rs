//! Factory methods for creating test data.
//!
//! Factories create entities with sensible defaults so tests only spell out the
//! fields they care about. Each entity has a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(db).await?;
//! let coupon = factory::coupon::CouponFactory::new(db)
//!     .stock(1)
//!     .build()
//!     .await?;
//! let issued = factory::create_issued_coupon(db, user.id, coupon.id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `coupon` - Create coupon definitions with their stock counter
//! - `issued_coupon` - Create user/coupon issuance records
//! - `helpers` - Shared ID generation and multi-entity helpers

pub mod coupon;
pub mod helpers;
pub mod issued_coupon;
pub mod user;

pub use coupon::create_coupon;
pub use issued_coupon::create_issued_coupon;
pub use user::create_user;
