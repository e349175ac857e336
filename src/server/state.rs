//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction.

use sea_orm::DatabaseConnection;

use crate::server::lock::LockManager;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `LockManager` holds its store behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Lock manager guarding per-coupon critical sections across instances.
    pub locks: LockManager,

    /// Upper bound for a coupon's total stock.
    pub coupon_max_stock: i32,
}

impl AppState {
    pub fn new(db: DatabaseConnection, locks: LockManager, coupon_max_stock: i32) -> Self {
        Self {
            db,
            locks,
            coupon_max_stock,
        }
    }
}
