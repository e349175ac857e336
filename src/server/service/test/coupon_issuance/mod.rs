use crate::server::{
    data::{issued_coupon::IssuedCouponRepository, stock_ledger::StockLedger},
    error::issuance::IssuanceError,
    lock::{DatabaseLockStore, LockManager, LockOptions, MemoryLockStore},
    model::coupon::{IssuanceRejection, StockLevel},
    service::coupon_issuance::{coupon_lock_key, CouponIssuanceService},
};
use chrono::{Duration as ChronoDuration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::{sync::Arc, time::Duration};
use test_utils::{builder::TestBuilder, factory};

mod concurrency;

/// Lock manager over a process-local store with a generous wait.
fn memory_locks() -> LockManager {
    LockManager::new(
        Arc::new(MemoryLockStore::new()),
        LockOptions::new(Duration::from_secs(10), Duration::from_secs(10)),
    )
}

/// Lock manager over the shared lease table, as one server instance would use it.
fn database_locks(db: &DatabaseConnection) -> LockManager {
    LockManager::new(
        Arc::new(DatabaseLockStore::new(db.clone())),
        LockOptions::new(Duration::from_secs(10), Duration::from_secs(10)),
    )
}

/// Reads the stock level and issuance count of a coupon.
async fn snapshot(db: &DatabaseConnection, coupon_id: i32) -> Result<(StockLevel, u64), DbErr> {
    let level = StockLedger::new(db)
        .level(coupon_id)
        .await?
        .ok_or(DbErr::RecordNotFound(format!("Coupon {} missing", coupon_id)))?;
    let issued = IssuedCouponRepository::new(db)
        .count_for_coupon(coupon_id)
        .await?;

    Ok((level, issued))
}
