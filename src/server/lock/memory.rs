//! Process-local lock store.
//!
//! Same lease semantics as the database store, but only excludes tasks within
//! one process. Suitable for single-instance runs and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;

use super::{lease_expiry, LockStore};
use crate::server::error::lock::LockError;

#[derive(Debug, Clone)]
struct Lease {
    holder: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct MemoryLockStore {
    leases: Arc<Mutex<HashMap<String, Lease>>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn try_acquire(
        &self,
        key: &str,
        holder: &str,
        lease: Duration,
    ) -> Result<Option<DateTime<Utc>>, LockError> {
        let now = Utc::now();
        let mut leases = self.leases.lock().await;

        if let Some(current) = leases.get(key) {
            if current.expires_at > now {
                return Ok(None);
            }
        }

        let expires_at = lease_expiry(now, lease);
        leases.insert(
            key.to_string(),
            Lease {
                holder: holder.to_string(),
                expires_at,
            },
        );

        Ok(Some(expires_at))
    }

    async fn release(&self, key: &str, holder: &str) -> Result<bool, LockError> {
        let now = Utc::now();
        let mut leases = self.leases.lock().await;

        match leases.get(key) {
            Some(current) if current.holder == holder => {
                let live = current.expires_at > now;
                leases.remove(key);
                Ok(live)
            }
            _ => Ok(false),
        }
    }
}
