//! Revibe Test Utils
//!
//! Shared setup for repository, service and middleware tests. Every test gets its own
//! in-memory SQLite database holding only the tables it asks for, an optional session
//! backed by the same database, and factories that fill in sensible defaults.
//!
//! - `builder::TestBuilder` selects tables, extra SQL statements and builds the context
//! - `context::TestContext` owns the connection and lazily creates a session
//! - `error::TestError` covers setup failures
//! - `factory` inserts users, coupons and issued coupons
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn issues_once() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_coupon_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let coupon = factory::coupon::create_coupon(db).await?;
//!     // Exercise the repository or service under test...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
