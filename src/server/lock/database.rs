//! Lock store backed by the shared `lock_lease` table.
//!
//! Every server instance pointing at the same database shares these leases, which
//! makes coupon critical sections exclusive across instances.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::time::Duration;

use super::{lease_expiry, LockStore};
use crate::server::{data::lock_lease::LockLeaseRepository, error::lock::LockError};

#[derive(Clone)]
pub struct DatabaseLockStore {
    db: DatabaseConnection,
}

impl DatabaseLockStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LockStore for DatabaseLockStore {
    /// Clears a lapsed lease on `key`, then inserts ours unless a live row exists.
    ///
    /// The primary key on `key` arbitrates concurrent inserts; the delete only
    /// matches expired rows so it can never remove a live lease.
    async fn try_acquire(
        &self,
        key: &str,
        holder: &str,
        lease: Duration,
    ) -> Result<Option<DateTime<Utc>>, LockError> {
        let repo = LockLeaseRepository::new(&self.db);
        let now = Utc::now();

        repo.delete_expired_for_key(key, now).await?;

        let expires_at = lease_expiry(now, lease);
        if repo.try_insert(key, holder, expires_at).await? {
            Ok(Some(expires_at))
        } else {
            Ok(None)
        }
    }

    async fn release(&self, key: &str, holder: &str) -> Result<bool, LockError> {
        let repo = LockLeaseRepository::new(&self.db);

        Ok(repo.delete_held(key, holder, Utc::now()).await?)
    }
}
