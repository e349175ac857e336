//! Coupon issuance orchestrator.
//!
//! Issues a limited-stock coupon to a user. A request moves through
//! `Requested → Validated → LockAcquired → StockReserved → Recorded → Completed`
//! and every other exit is one `IssuanceError` variant.
//!
//! The coupon's validity is checked before taking the lock so invalid requests never
//! contend for it, and checked again inside the lock against a fresh read, since an
//! admin may disable the coupon while the request waits. Inside the lock the
//! duplicate check runs before the stock decrement, and the decrement and the
//! issuance record share one transaction; any failure after the decrement rolls it
//! back, restoring the stock counter.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::server::{
    data::{
        coupon::CouponRepository, issued_coupon::IssuedCouponRepository,
        stock_ledger::StockLedger,
    },
    error::{issuance::IssuanceError, lock::LockError},
    lock::{LockManager, LockOptions},
    model::coupon::{IssuedCoupon, RecordIssuance, StockDecrement},
};

/// Lock key guarding the stock and issuance records of one coupon.
pub fn coupon_lock_key(coupon_id: i32) -> String {
    format!("coupon:{}", coupon_id)
}

pub struct CouponIssuanceService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a LockManager,
}

impl<'a> CouponIssuanceService<'a> {
    pub fn new(db: &'a DatabaseConnection, locks: &'a LockManager) -> Self {
        Self { db, locks }
    }

    /// Issues a coupon using the lock manager's default wait and lease.
    pub async fn issue(&self, user_id: i32, coupon_id: i32) -> Result<IssuedCoupon, IssuanceError> {
        self.issue_with(user_id, coupon_id, self.locks.defaults())
            .await
    }

    /// Issues a coupon with explicit lock wait and lease.
    ///
    /// # Returns
    /// - `Ok(IssuedCoupon)` - Completed; one unit of stock consumed
    /// - `Err(IssuanceError::CouponNotFound)` - No such coupon
    /// - `Err(IssuanceError::ValidationFailed)` - Coupon disabled or outside its window
    /// - `Err(IssuanceError::LockTimeout)` - Coupon lock busy for the whole wait, nothing changed
    /// - `Err(IssuanceError::AlreadyIssued)` - User already holds the coupon, stock unchanged
    /// - `Err(IssuanceError::OutOfStock)` - No stock left
    /// - `Err(IssuanceError::PersistenceFailure)` - Storage failed, stock restored
    pub async fn issue_with(
        &self,
        user_id: i32,
        coupon_id: i32,
        options: LockOptions,
    ) -> Result<IssuedCoupon, IssuanceError> {
        tracing::debug!(user_id, coupon_id, "Issuance requested");

        validate(self.db, user_id, coupon_id).await?;

        let key = coupon_lock_key(coupon_id);
        let outcome = self
            .locks
            .scoped(&key, options, |lease_expires_at| {
                self.issue_locked(user_id, coupon_id, lease_expires_at)
            })
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(LockError::Timeout { waited, .. }) => {
                tracing::warn!(
                    user_id,
                    coupon_id,
                    "Timed out after {:?} waiting for coupon lock",
                    waited
                );
                Err(IssuanceError::LockTimeout(coupon_id))
            }
            Err(LockError::Store(err)) => {
                tracing::error!(user_id, coupon_id, "Lock store failure: {}", err);
                Err(IssuanceError::PersistenceFailure(err))
            }
        };

        match &result {
            Ok(_) => tracing::info!(user_id, coupon_id, "Coupon issued"),
            Err(IssuanceError::AlreadyIssued { .. }) | Err(IssuanceError::OutOfStock(_)) => {
                tracing::info!(user_id, coupon_id, "Issuance rejected: {:?}", result)
            }
            Err(_) => {}
        }

        result
    }

    /// Critical section; must only run while the coupon lock is held.
    async fn issue_locked(
        &self,
        user_id: i32,
        coupon_id: i32,
        lease_expires_at: DateTime<Utc>,
    ) -> Result<IssuedCoupon, IssuanceError> {
        tracing::debug!(user_id, coupon_id, "Coupon lock acquired");

        let txn = self
            .db
            .begin()
            .await
            .map_err(IssuanceError::PersistenceFailure)?;

        match reserve_and_record(&txn, user_id, coupon_id).await {
            Ok(issued) => {
                if Utc::now() >= lease_expires_at {
                    tracing::warn!(
                        user_id,
                        coupon_id,
                        "Coupon lock lease lapsed at {} before commit; lease may be too short",
                        lease_expires_at
                    );
                }
                txn.commit().await.map_err(|err| {
                    tracing::error!(user_id, coupon_id, "Failed to commit issuance: {}", err);
                    IssuanceError::PersistenceFailure(err)
                })?;
                tracing::debug!(user_id, coupon_id, "Issuance completed");
                Ok(issued)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(
                        user_id,
                        coupon_id,
                        "Failed to roll back issuance: {}",
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }
}

/// Reads the coupon and checks that it can be issued right now.
///
/// # Returns
/// - `Ok(())` - Coupon exists, is live and inside its window
/// - `Err(IssuanceError::CouponNotFound)` - No such coupon
/// - `Err(IssuanceError::ValidationFailed)` - Coupon disabled or outside its window
async fn validate<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    coupon_id: i32,
) -> Result<(), IssuanceError> {
    let coupon = CouponRepository::new(conn)
        .find_by_id(coupon_id)
        .await
        .map_err(IssuanceError::PersistenceFailure)?
        .ok_or(IssuanceError::CouponNotFound(coupon_id))?;

    if let Err(rejection) = coupon.check_issuable(Utc::now()) {
        tracing::info!(
            user_id,
            coupon_id,
            code = rejection.code(),
            "Issuance rejected: {}",
            rejection
        );
        return Err(IssuanceError::ValidationFailed(rejection));
    }
    tracing::debug!(user_id, coupon_id, "Issuance validated");

    Ok(())
}

/// Revalidation, duplicate check, stock decrement and record insert inside one
/// transaction.
async fn reserve_and_record(
    txn: &DatabaseTransaction,
    user_id: i32,
    coupon_id: i32,
) -> Result<IssuedCoupon, IssuanceError> {
    validate(txn, user_id, coupon_id).await?;

    let records = IssuedCouponRepository::new(txn);

    if records
        .has_issued(user_id, coupon_id)
        .await
        .map_err(IssuanceError::PersistenceFailure)?
    {
        return Err(IssuanceError::AlreadyIssued { user_id, coupon_id });
    }

    match StockLedger::new(txn)
        .try_decrement(coupon_id)
        .await
        .map_err(IssuanceError::PersistenceFailure)?
    {
        StockDecrement::Remaining(remaining) => {
            tracing::debug!(user_id, coupon_id, remaining, "Stock reserved");
        }
        StockDecrement::OutOfStock => return Err(IssuanceError::OutOfStock(coupon_id)),
    }

    match records.record_issuance(user_id, coupon_id).await {
        Ok(RecordIssuance::Recorded(issued)) => {
            tracing::debug!(user_id, coupon_id, "Issuance recorded");
            Ok(issued)
        }
        Ok(RecordIssuance::AlreadyIssued) => {
            tracing::warn!(
                user_id,
                coupon_id,
                "Duplicate issuance detected after stock reservation, rolling back"
            );
            Err(IssuanceError::AlreadyIssued { user_id, coupon_id })
        }
        Err(err) => {
            tracing::warn!(
                user_id,
                coupon_id,
                "Failed to record issuance, rolling back stock reservation: {}",
                err
            );
            Err(IssuanceError::PersistenceFailure(err))
        }
    }
}
