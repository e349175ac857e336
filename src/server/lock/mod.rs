//! Named mutual exclusion across server instances.
//!
//! A `LockManager` grants leases on string keys through a shared `LockStore`. A lease
//! is valid until it is released or its expiry passes, whichever comes first, so a
//! crashed holder can stall a key for at most one lease. Callers either pair
//! `acquire`/`release` themselves or use `scoped`, which releases on every exit path.
//!
//! Waiting is done by polling the store with capped exponential backoff; the first
//! attempt is always immediate and the last sleep never overshoots the deadline.

pub mod database;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use crate::server::error::lock::LockError;

pub use database::DatabaseLockStore;
pub use memory::MemoryLockStore;

const INITIAL_BACKOFF: Duration = Duration::from_millis(20);
const MAX_BACKOFF: Duration = Duration::from_millis(200);
const HOLDER_TOKEN_LENGTH: usize = 32;

/// Backing store for lock leases.
///
/// Implementations must make `try_acquire` atomic per key: at most one holder has an
/// unexpired lease on a key at any time, and a lapsed lease never blocks a new grant.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Grants `key` to `holder` for `lease` if no live lease exists.
    ///
    /// # Returns
    /// - `Ok(Some(expires_at))` - Lease granted until `expires_at`
    /// - `Ok(None)` - Another holder has a live lease
    /// - `Err(LockError::Store)` - Store unavailable
    async fn try_acquire(
        &self,
        key: &str,
        holder: &str,
        lease: Duration,
    ) -> Result<Option<DateTime<Utc>>, LockError>;

    /// Drops `holder`'s lease on `key`.
    ///
    /// Releasing a lease that expired, was already released, or now belongs to
    /// someone else is a no-op.
    ///
    /// # Returns
    /// - `Ok(true)` - A lease owned by `holder` was removed
    /// - `Ok(false)` - Nothing to release
    async fn release(&self, key: &str, holder: &str) -> Result<bool, LockError>;
}

/// Wait and lease durations for one acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Longest time `acquire` keeps retrying. Zero means a single attempt.
    pub wait: Duration,
    /// Time after which the grant expires even if never released.
    pub lease: Duration,
}

impl LockOptions {
    pub fn new(wait: Duration, lease: Duration) -> Self {
        Self { wait, lease }
    }
}

/// A granted lease, owned by the task that acquired it.
#[derive(Debug)]
pub struct LockHandle {
    key: String,
    holder: String,
    expires_at: DateTime<Utc>,
}

impl LockHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Acquires and releases leases on a shared `LockStore`.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn LockStore>,
    defaults: LockOptions,
}

impl LockManager {
    /// Creates a lock manager.
    ///
    /// # Arguments
    /// - `store` - Shared lease store
    /// - `defaults` - Options returned by `defaults()` for call sites without overrides
    pub fn new(store: Arc<dyn LockStore>, defaults: LockOptions) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> LockOptions {
        self.defaults
    }

    /// Acquires `key`, waiting up to `options.wait` for the current holder to go away.
    ///
    /// # Returns
    /// - `Ok(LockHandle)` - Lease granted with a fresh holder token
    /// - `Err(LockError::Timeout)` - Key stayed held for the whole wait time
    /// - `Err(LockError::Store)` - Store failure while polling
    pub async fn acquire(&self, key: &str, options: LockOptions) -> Result<LockHandle, LockError> {
        let holder = generate_holder_token();
        let started = Instant::now();
        let deadline = started + options.wait;
        let mut backoff = INITIAL_BACKOFF;

        loop {
            if let Some(expires_at) = self.store.try_acquire(key, &holder, options.lease).await? {
                tracing::debug!("Acquired lock '{}' until {}", key, expires_at);
                return Ok(LockHandle {
                    key: key.to_string(),
                    holder,
                    expires_at,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(LockError::Timeout {
                    key: key.to_string(),
                    waited: now - started,
                });
            }

            tokio::time::sleep(backoff.min(deadline - now)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
    }

    /// Releases a previously acquired lease.
    ///
    /// Idempotent: an expired or already released lease yields `Ok(false)`.
    pub async fn release(&self, handle: LockHandle) -> Result<bool, LockError> {
        let released = self.store.release(&handle.key, &handle.holder).await?;
        if !released {
            tracing::debug!("Lock '{}' had already expired before release", handle.key);
        }
        Ok(released)
    }

    /// Runs `f` while holding `key`. `f` receives the lease expiry.
    ///
    /// The lease is released after `f` completes, whatever it returns. A failed release
    /// is logged and otherwise ignored since the lease expires on its own.
    ///
    /// # Returns
    /// - `Ok(T)` - Output of `f`
    /// - `Err(LockError)` - The lock was never acquired and `f` did not run
    pub async fn scoped<F, Fut, T>(
        &self,
        key: &str,
        options: LockOptions,
        f: F,
    ) -> Result<T, LockError>
    where
        F: FnOnce(DateTime<Utc>) -> Fut,
        Fut: Future<Output = T>,
    {
        let handle = self.acquire(key, options).await?;

        let output = f(handle.expires_at()).await;

        if let Err(e) = self.release(handle).await {
            tracing::warn!("Failed to release lock '{}', lease will expire: {}", key, e);
        }

        Ok(output)
    }
}

/// Generates a random alphanumeric token identifying one lease holder.
fn generate_holder_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..HOLDER_TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Expiry timestamp for a lease starting at `now`.
pub(crate) fn lease_expiry(now: DateTime<Utc>, lease: Duration) -> DateTime<Utc> {
    now + chrono::Duration::milliseconds(lease.as_millis().min(i64::MAX as u128) as i64)
}
